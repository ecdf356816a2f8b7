//! # 统一错误处理模块
//!
//! 定义 dds2png 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 使用 `models/batch.rs` 中的批量结果类型

use crate::models::BatchFailure;
use thiserror::Error;

/// 错误类别（用于汇总报告）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Decode,
    UnsupportedFormat,
    Write,
    Other,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidInput => write!(f, "invalid input"),
            ErrorKind::Decode => write!(f, "decode"),
            ErrorKind::UnsupportedFormat => write!(f, "unsupported format"),
            ErrorKind::Write => write!(f, "write"),
            ErrorKind::Other => write!(f, "other"),
        }
    }
}

/// dds2png 统一错误类型
#[derive(Error, Debug)]
pub enum ConvertError {
    // ─────────────────────────────────────────────────────────────
    // 提交错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ─────────────────────────────────────────────────────────────
    // 单文件转换错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to decode DDS file: {path}\nReason: {reason}")]
    DecodeError { path: String, reason: String },

    #[error("Unsupported pixel format {format} in {path}")]
    UnsupportedFormat { path: String, format: String },

    #[error("Failed to write file: {path}\nReason: {reason}")]
    WriteError { path: String, reason: String },

    #[error("Conversion of {path} panicked: {reason}")]
    ConversionPanicked { path: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 批量错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to start conversion worker thread")]
    WorkerSpawn(#[source] std::io::Error),

    #[error("Conversion worker thread panicked")]
    WorkerPanicked,

    #[error("{0}")]
    BatchFailed(BatchFailure),
}

impl ConvertError {
    /// 错误类别
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::InvalidInput(_) => ErrorKind::InvalidInput,
            ConvertError::DecodeError { .. } => ErrorKind::Decode,
            ConvertError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            ConvertError::WriteError { .. } => ErrorKind::Write,
            _ => ErrorKind::Other,
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ConvertError>;
