//! # 美化输出工具
//!
//! 提供统一的终端输出样式。
//!
//! ## 依赖关系
//! - 被 `main.rs`, `batch/report.rs` 使用
//! - 使用 `colored` crate

use colored::Colorize;

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印单个文件转换成功消息
pub fn print_converted(path: &str) {
    println!("{} {}", "Converted".green(), path);
}

/// 打印批次成功完成
pub fn print_finished_ok() {
    println!("{}", "Finished successfully".green().bold());
}

/// 打印批次带错误完成
pub fn print_finished_with_errors() {
    println!("{}", "Finished with errors".red().bold());
}
