//! # 日志初始化
//!
//! 使用 `env_logger` 作为 `log` 门面的后端，`RUST_LOG` 优先于命令行级别。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用

use env_logger::Env;

/// 初始化日志（默认 warn，`--verbose` 时为 debug）
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
