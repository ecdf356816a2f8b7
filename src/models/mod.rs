//! # 数据模型模块
//!
//! 定义解码图像和批量转换结果的数据模型。
//!
//! ## 依赖关系
//! - 被 `codec/`, `batch/` 和 `commands/` 使用
//! - 子模块: image, batch

pub mod batch;
pub mod image;

pub use batch::{BatchFailure, BatchResult, ConversionFailure};
pub use image::{BitmapFormat, DecodedImage, PixelFormat};
