//! # 转换参数 CLI 定义
//!
//! 输入路径（文件或目录）及目录搜索模式。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/convert.rs`

use clap::Args;
use std::path::PathBuf;

/// 转换参数
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// DDS files or directories (directories are searched recursively)
    #[arg(required = true, value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Glob pattern(s) for files inside directories, comma separated (case-insensitive)
    #[arg(short, long, default_value = "*.dds", env = "DDS2PNG_PATTERN")]
    pub pattern: String,
}
