//! # 批量转换模块
//!
//! 生产者/消费者流水线：收集路径、排队、后台顺序转换、汇总报告。
//!
//! ## 功能
//! - 自动检测输入类型（文件/目录）
//! - 收集匹配文件列表
//! - 单一后台工作线程顺序转换
//! - 结果汇总与终端报告
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 使用
//! - 使用 `codec/` 执行单文件转换
//! - 使用 `walkdir`, `glob` 收集文件

pub mod collector;
pub mod report;
pub mod runner;

pub use collector::PathCollector;
pub use report::ConsoleReporter;
pub use runner::BulkConverter;
