//! # 工具函数模块
//!
//! 提供美化输出和日志初始化。
//!
//! ## 依赖关系
//! - 被 `main.rs`, `batch/` 使用
//! - 子模块: output, logging

pub mod logging;
pub mod output;
