//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。
//!
//! ## 命令结构
//! `dds2png [OPTIONS] <PATHS>...`
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: convert

pub mod convert;

use clap::Parser;

/// dds2png - DDS 纹理批量转换为 PNG
#[derive(Parser, Debug)]
#[command(name = "dds2png")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Bulk convert DDS textures to sibling PNG files", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub convert: convert::ConvertArgs,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
