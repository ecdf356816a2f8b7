//! # 转换命令实现
//!
//! 收集输入路径，提交到后台转换器，等待批次完成。
//!
//! ## 功能
//! - 目录递归搜索 DDS 文件，文件参数原样提交
//! - 单一后台工作线程顺序转换
//! - 任一文件失败时返回聚合错误
//!
//! ## 依赖关系
//! - 使用 `cli/convert.rs` 定义的参数
//! - 使用 `batch/`
//! - 使用 `utils/output.rs`

use crate::batch::{BulkConverter, ConsoleReporter, PathCollector};
use crate::cli::convert::ConvertArgs;
use crate::error::{ConvertError, Result};
use crate::utils::output;

use log::info;

/// 执行转换命令
pub fn execute(args: ConvertArgs) -> Result<()> {
    let collector = PathCollector::new(&args.pattern)?;

    // 提交出错时 converter 在 Drop 中关闭队列并等待工作线程
    let converter = BulkConverter::new(ConsoleReporter::new())?;
    let submitted = collector.submit_all(&args.paths, &converter)?;

    if submitted == 0 {
        output::print_warning(&format!(
            "No files matched '{}' under the given paths",
            args.pattern
        ));
    }
    info!("Queued {} file(s) for conversion", submitted);

    match converter.finish() {
        Ok(result) => {
            info!("Converted {} file(s)", result.succeeded.len());
            Ok(())
        }
        Err(ConvertError::BatchFailed(failure)) => {
            info!(
                "Converted {} file(s), {} failed",
                failure.succeeded().len(),
                failure.failures().len()
            );
            Err(ConvertError::BatchFailed(failure))
        }
        Err(e) => Err(e),
    }
}
