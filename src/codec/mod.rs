//! # 编解码模块
//!
//! 单个 DDS 文件到 PNG 的完整转换流程。
//!
//! ## 流程
//! ```text
//! decode (ddsfile, 块压缩经 image_dds 解压) -> map_format -> Bitmap 视图 -> encode_png (image) -> 写出 .png
//! ```
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 的后台工作线程调用
//! - 子模块: dds, png
//! - 使用 `models/image.rs`

pub mod dds;
pub mod png;

use crate::error::{ConvertError, Result};
use crate::models::{BitmapFormat, PixelFormat};
use self::png::Bitmap;

use log::debug;
use std::path::{Path, PathBuf};

/// 输出文件扩展名
pub const OUTPUT_EXTENSION: &str = "png";

/// 像素格式映射：仅支持 32 位直通 alpha RGBA
pub fn map_format(path: &Path, format: &PixelFormat) -> Result<BitmapFormat> {
    match format {
        PixelFormat::Rgba32 => Ok(BitmapFormat::Argb32),
        other => Err(ConvertError::UnsupportedFormat {
            path: path.display().to_string(),
            format: other.to_string(),
        }),
    }
}

/// 同目录下替换扩展名为 `.png` 的输出路径
pub fn output_path(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}

/// 转换单个文件，返回写出的 PNG 路径
pub fn convert_file(path: &Path) -> Result<PathBuf> {
    let image = dds::decode(path)?;
    debug!(
        "Decoded {}: {}x{} {} (stride {})",
        path.display(),
        image.width,
        image.height,
        image.format,
        image.stride
    );

    let format = map_format(path, &image.format)?;
    let bitmap = Bitmap::new(image.width, image.height, image.stride, format, &image.data)
        .ok_or_else(|| ConvertError::DecodeError {
            path: path.display().to_string(),
            reason: "pixel buffer does not cover stride * height".to_string(),
        })?;

    let output = output_path(path);
    png::encode_png(&bitmap, &output)?;
    debug!("Wrote {}", output.display());

    Ok(output)
}
