//! # 图像数据模型
//!
//! 存储 DDS 解码后的像素数据及其格式标签。
//!
//! ## 依赖关系
//! - 被 `codec/dds.rs` 构造
//! - 被 `codec/mod.rs`, `codec/png.rs` 使用

/// 解码后像素格式标签
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelFormat {
    /// 32 位，直通 alpha，内存字节序 B,G,R,A
    Rgba32,
    /// 32 位，无 alpha（X8R8G8B8）
    Rgb32,
    /// 24 位 RGB
    Rgb24,
    /// 16 位，1 位 alpha（A1R5G5B5）
    Rgba16,
    /// 16 位 R5G6B5
    Rgb16,
    /// 8 位单通道（亮度或 alpha）
    Rgb8,
    /// 块压缩格式（DXT1..DXT5, BC*）
    Compressed(String),
    /// 无法识别的格式
    Unknown(String),
}

impl PixelFormat {
    /// 每像素字节数（压缩或未知格式返回 None）
    pub fn bytes_per_pixel(&self) -> Option<u32> {
        match self {
            PixelFormat::Rgba32 | PixelFormat::Rgb32 => Some(4),
            PixelFormat::Rgb24 => Some(3),
            PixelFormat::Rgba16 | PixelFormat::Rgb16 => Some(2),
            PixelFormat::Rgb8 => Some(1),
            PixelFormat::Compressed(_) | PixelFormat::Unknown(_) => None,
        }
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixelFormat::Rgba32 => write!(f, "RGBA32"),
            PixelFormat::Rgb32 => write!(f, "RGB32"),
            PixelFormat::Rgb24 => write!(f, "RGB24"),
            PixelFormat::Rgba16 => write!(f, "RGBA16"),
            PixelFormat::Rgb16 => write!(f, "RGB16"),
            PixelFormat::Rgb8 => write!(f, "RGB8"),
            PixelFormat::Compressed(name) => write!(f, "compressed ({})", name),
            PixelFormat::Unknown(name) => write!(f, "unknown ({})", name),
        }
    }
}

/// 输出位图格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitmapFormat {
    /// 32 位 ARGB（小端内存字节序 B,G,R,A）
    Argb32,
}

/// DDS 解码结果
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub format: PixelFormat,
    pub width: u32,
    pub height: u32,
    /// 每行字节数（可能大于 width * bpp）
    pub stride: u32,
    pub data: Vec<u8>,
}
