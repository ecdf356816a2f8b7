//! # dds2png - DDS 纹理批量转换工具
//!
//! 遍历输入路径（文件或目录），将 DDS 纹理解码并在原文件旁写出同名 PNG。
//!
//! ## 用法
//! `dds2png <path>...`
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     └── batch/     (收集器、后台转换器、报告)
//!   │           ├── codec/   (DDS 解码、PNG 编码)
//!   │           └── models/  (数据模型)
//!   ├── utils/      (输出与日志)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod codec;
mod commands;
mod error;
mod models;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    utils::logging::init(cli.verbose);

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
