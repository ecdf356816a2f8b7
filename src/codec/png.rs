//! # PNG 编码器
//!
//! 在解码缓冲区上建立零拷贝位图视图，并编码写出 PNG 文件。
//!
//! ## 依赖关系
//! - 被 `codec/mod.rs` 调用
//! - 使用 `image` crate 的 PNG 编码器

use crate::error::{ConvertError, Result};
use crate::models::BitmapFormat;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::fs;
use std::path::Path;

/// 借用像素缓冲区的位图视图
#[derive(Debug, Clone, Copy)]
pub struct Bitmap<'a> {
    width: u32,
    height: u32,
    stride: usize,
    format: BitmapFormat,
    data: &'a [u8],
}

impl<'a> Bitmap<'a> {
    /// 创建位图视图，缓冲区不足 `stride * height` 或行距小于行宽时返回 None
    pub fn new(
        width: u32,
        height: u32,
        stride: u32,
        format: BitmapFormat,
        data: &'a [u8],
    ) -> Option<Self> {
        let stride = stride as usize;
        let row_bytes = width as usize * Self::bytes_per_pixel(format);
        if stride < row_bytes || data.len() < stride * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            stride,
            format,
            data,
        })
    }

    fn bytes_per_pixel(format: BitmapFormat) -> usize {
        match format {
            BitmapFormat::Argb32 => 4,
        }
    }

    /// 重排为紧凑的 R,G,B,A 字节序（PNG 编码器输入）
    fn to_rgba8(&self) -> Vec<u8> {
        let row_bytes = self.width as usize * Self::bytes_per_pixel(self.format);
        let mut packed = Vec::with_capacity(row_bytes * self.height as usize);

        for row in self.data.chunks(self.stride).take(self.height as usize) {
            match self.format {
                BitmapFormat::Argb32 => {
                    for px in row[..row_bytes].chunks_exact(4) {
                        packed.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
                    }
                }
            }
        }

        packed
    }
}

/// 将位图编码为 PNG 并写入 `output`（已存在则覆盖）
///
/// 先在内存中完成编码，编码失败时不触碰已有的输出文件。
pub fn encode_png(bitmap: &Bitmap<'_>, output: &Path) -> Result<()> {
    let rgba = bitmap.to_rgba8();

    let mut encoded = Vec::new();
    PngEncoder::new(&mut encoded)
        .write_image(&rgba, bitmap.width, bitmap.height, ExtendedColorType::Rgba8)
        .map_err(|e| write_error(output, e))?;

    fs::write(output, &encoded).map_err(|e| write_error(output, e))
}

fn write_error(path: &Path, reason: impl std::fmt::Display) -> ConvertError {
    ConvertError::WriteError {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
