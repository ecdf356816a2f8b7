//! # 转换结果报告
//!
//! 后台工作线程通过 `Reporter` 输出逐文件成功通知和批次完成状态。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用（在工作线程内）
//! - `ConsoleReporter` 使用 `utils/output.rs` 和 `tabled`

use crate::models::ConversionFailure;
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};

/// 转换事件接收者
///
/// 由工作线程独占，所有回调按处理顺序在同一线程上调用。
pub trait Reporter: Send + 'static {
    /// 单个文件转换成功
    fn on_item_success(&mut self, path: &Path);

    /// 队列关闭且全部处理完毕
    fn on_batch_complete(&mut self, ok: bool, failures: &[ConversionFailure]);
}

/// 终端输出报告
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

/// 失败汇总表格行
#[derive(Debug, Clone, Tabled)]
struct FailureRow {
    #[tabled(rename = "File")]
    path: String,
    #[tabled(rename = "Error")]
    kind: String,
    #[tabled(rename = "Detail")]
    detail: String,
}

impl Reporter for ConsoleReporter {
    fn on_item_success(&mut self, path: &Path) {
        output::print_converted(&path.display().to_string());
    }

    fn on_batch_complete(&mut self, ok: bool, failures: &[ConversionFailure]) {
        if ok {
            output::print_finished_ok();
            return;
        }

        output::print_finished_with_errors();

        let rows: Vec<FailureRow> = failures
            .iter()
            .map(|f| FailureRow {
                path: f.path.display().to_string(),
                kind: f.kind().to_string(),
                detail: f.detail(),
            })
            .collect();
        eprintln!("{}", Table::new(&rows));
    }
}
