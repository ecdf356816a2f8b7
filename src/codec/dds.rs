//! # DDS 解码器
//!
//! 读取 DDS 容器，解析像素格式标签，提取顶层 mip 的像素数据。
//!
//! ## 功能
//! - 使用 `ddsfile` 解析文件头（含 DX10 扩展头）
//! - D3D / DXGI 格式映射到 `PixelFormat`
//! - 块压缩格式（DXT1/3/5、BC1-BC7）经 `image_dds` 解压为直通 alpha RGBA
//! - 32 位 RGBA 统一为 B,G,R,A 内存字节序
//!
//! ## 依赖关系
//! - 被 `codec/mod.rs` 调用
//! - 使用 `models/image.rs`

use crate::error::{ConvertError, Result};
use crate::models::{DecodedImage, PixelFormat};

use ddsfile::{D3DFormat, Dds, DxgiFormat};
use log::debug;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// 像素数据的读取方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// 按行读取，字节序不变
    Linear,
    /// 按行读取，交换 R/B 通道
    SwapRedBlue,
    /// 块压缩，需要解压
    Block,
}

/// 解码 DDS 文件
pub fn decode(path: &Path) -> Result<DecodedImage> {
    let file = File::open(path).map_err(|e| decode_error(path, e))?;
    decode_from_reader(BufReader::new(file), path)
}

/// 从任意读取源解码（`path` 仅用于错误信息）
pub fn decode_from_reader<R: Read>(reader: R, path: &Path) -> Result<DecodedImage> {
    let dds = Dds::read(reader).map_err(|e| decode_error(path, e))?;

    let width = dds.header.width;
    let height = dds.header.height;
    if width == 0 || height == 0 {
        return Err(decode_error(
            path,
            format!("empty image ({}x{})", width, height),
        ));
    }

    let (format, layout) = resolve_format(&dds);
    if layout == Layout::Block {
        return decompress(&dds, path);
    }

    // 压缩或未知格式不做行布局校验，由格式映射阶段拒绝
    let Some(bpp) = format.bytes_per_pixel() else {
        return Ok(DecodedImage {
            format,
            width,
            height,
            stride: 0,
            data: dds.data,
        });
    };

    let row_bytes = row_bytes(path, width, bpp)?;
    let stride = dds
        .header
        .pitch
        .filter(|&pitch| pitch >= row_bytes)
        .unwrap_or(row_bytes);

    let top_level = stride as usize * height as usize;
    let mut data = dds.data;
    if data.len() < top_level {
        return Err(decode_error(
            path,
            format!(
                "truncated pixel data: expected {} bytes, found {}",
                top_level,
                data.len()
            ),
        ));
    }
    data.truncate(top_level);

    if layout == Layout::SwapRedBlue {
        swizzle_rgba_to_bgra(&mut data, width as usize, stride as usize);
    }

    Ok(DecodedImage {
        format,
        width,
        height,
        stride,
        data,
    })
}

/// 解压顶层 mip 的第一层为紧凑 B,G,R,A
fn decompress(dds: &Dds, path: &Path) -> Result<DecodedImage> {
    let width = dds.header.width;
    let height = dds.header.height;
    let stride = row_bytes(path, width, 4)?;

    let rgba = image_dds::image_from_dds(dds, 0).map_err(|e| decode_error(path, e))?;
    debug!(
        "Decompressed {}: {}x{} -> {}x{}",
        path.display(),
        width,
        height,
        rgba.width(),
        rgba.height()
    );

    // 数组纹理的各层纵向堆叠，只保留第一层
    let top_level = stride as usize * height as usize;
    let mut data = rgba.into_raw();
    if data.len() < top_level {
        return Err(decode_error(
            path,
            format!(
                "decompressed data too short: expected {} bytes, found {}",
                top_level,
                data.len()
            ),
        ));
    }
    data.truncate(top_level);
    swizzle_rgba_to_bgra(&mut data, width as usize, stride as usize);

    Ok(DecodedImage {
        format: PixelFormat::Rgba32,
        width,
        height,
        stride,
        data,
    })
}

fn row_bytes(path: &Path, width: u32, bpp: u32) -> Result<u32> {
    width
        .checked_mul(bpp)
        .ok_or_else(|| decode_error(path, format!("row size overflow for width {}", width)))
}

/// 解析像素格式标签及读取方式
///
/// 块压缩格式解压后即为 `Rgba32`。
fn resolve_format(dds: &Dds) -> (PixelFormat, Layout) {
    if let Some(d3d) = dds.get_d3d_format() {
        return from_d3d(d3d);
    }
    if let Some(dxgi) = dds.get_dxgi_format() {
        return from_dxgi(dxgi);
    }
    (
        PixelFormat::Unknown("unrecognized pixel format".to_string()),
        Layout::Linear,
    )
}

fn from_d3d(format: D3DFormat) -> (PixelFormat, Layout) {
    match format {
        D3DFormat::A8R8G8B8 => (PixelFormat::Rgba32, Layout::Linear),
        D3DFormat::A8B8G8R8 => (PixelFormat::Rgba32, Layout::SwapRedBlue),
        D3DFormat::DXT1 | D3DFormat::DXT3 | D3DFormat::DXT5 => {
            (PixelFormat::Rgba32, Layout::Block)
        }
        D3DFormat::X8R8G8B8 | D3DFormat::X8B8G8R8 => (PixelFormat::Rgb32, Layout::Linear),
        D3DFormat::R8G8B8 => (PixelFormat::Rgb24, Layout::Linear),
        D3DFormat::A1R5G5B5 => (PixelFormat::Rgba16, Layout::Linear),
        D3DFormat::R5G6B5 => (PixelFormat::Rgb16, Layout::Linear),
        D3DFormat::L8 | D3DFormat::A8 => (PixelFormat::Rgb8, Layout::Linear),
        other => (tag_unmapped(format!("{:?}", other), "DXT"), Layout::Linear),
    }
}

fn from_dxgi(format: DxgiFormat) -> (PixelFormat, Layout) {
    match format {
        DxgiFormat::B8G8R8A8_UNorm | DxgiFormat::B8G8R8A8_UNorm_sRGB => {
            (PixelFormat::Rgba32, Layout::Linear)
        }
        DxgiFormat::R8G8B8A8_UNorm | DxgiFormat::R8G8B8A8_UNorm_sRGB => {
            (PixelFormat::Rgba32, Layout::SwapRedBlue)
        }
        DxgiFormat::BC1_UNorm
        | DxgiFormat::BC1_UNorm_sRGB
        | DxgiFormat::BC2_UNorm
        | DxgiFormat::BC2_UNorm_sRGB
        | DxgiFormat::BC3_UNorm
        | DxgiFormat::BC3_UNorm_sRGB
        | DxgiFormat::BC4_UNorm
        | DxgiFormat::BC4_SNorm
        | DxgiFormat::BC5_UNorm
        | DxgiFormat::BC5_SNorm
        | DxgiFormat::BC6H_UF16
        | DxgiFormat::BC6H_SF16
        | DxgiFormat::BC7_UNorm
        | DxgiFormat::BC7_UNorm_sRGB => (PixelFormat::Rgba32, Layout::Block),
        DxgiFormat::B8G8R8X8_UNorm => (PixelFormat::Rgb32, Layout::Linear),
        DxgiFormat::B5G6R5_UNorm => (PixelFormat::Rgb16, Layout::Linear),
        DxgiFormat::B5G5R5A1_UNorm => (PixelFormat::Rgba16, Layout::Linear),
        DxgiFormat::R8_UNorm | DxgiFormat::A8_UNorm => (PixelFormat::Rgb8, Layout::Linear),
        other => (tag_unmapped(format!("{:?}", other), "BC"), Layout::Linear),
    }
}

/// 未映射格式：预乘 alpha 的 DXT2/DXT4 与无类型 BC 仍标记为压缩格式
fn tag_unmapped(name: String, compressed_prefix: &str) -> PixelFormat {
    if name.starts_with(compressed_prefix) {
        PixelFormat::Compressed(name)
    } else {
        PixelFormat::Unknown(name)
    }
}

/// R,G,B,A -> B,G,R,A（逐行，跳过行尾填充）
fn swizzle_rgba_to_bgra(data: &mut [u8], width: usize, stride: usize) {
    for row in data.chunks_mut(stride) {
        for pixel in row[..width * 4].chunks_exact_mut(4) {
            pixel.swap(0, 2);
        }
    }
}

fn decode_error(path: &Path, reason: impl std::fmt::Display) -> ConvertError {
    ConvertError::DecodeError {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
