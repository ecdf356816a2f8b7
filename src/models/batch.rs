//! # 批量转换结果数据模型
//!
//! 汇总一次批量转换中每个文件的成功/失败结果。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 构造
//! - 被 `batch/report.rs`, `commands/convert.rs`, `error.rs` 使用

use crate::error::{ConvertError, ErrorKind};
use std::path::PathBuf;

/// 单个文件的转换失败记录
#[derive(Debug)]
pub struct ConversionFailure {
    pub path: PathBuf,
    pub error: ConvertError,
}

impl ConversionFailure {
    pub fn new(path: PathBuf, error: ConvertError) -> Self {
        Self { path, error }
    }

    /// 错误类别
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    /// 单行错误描述
    pub fn detail(&self) -> String {
        self.error.to_string().replace('\n', " ")
    }
}

/// 批量转换结果（按处理顺序）
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 转换成功的文件
    pub succeeded: Vec<PathBuf>,
    /// 转换失败的文件
    pub failed: Vec<ConversionFailure>,
}

impl BatchResult {
    /// 记录成功
    pub fn record_success(&mut self, path: PathBuf) {
        self.succeeded.push(path);
    }

    /// 记录失败
    pub fn record_failure(&mut self, path: PathBuf, error: ConvertError) {
        self.failed.push(ConversionFailure::new(path, error));
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// 有失败时转换为聚合错误
    pub fn into_result(self) -> crate::error::Result<BatchResult> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ConvertError::BatchFailed(BatchFailure(self)))
        }
    }
}

/// 聚合失败：携带本批次所有单文件错误
#[derive(Debug)]
pub struct BatchFailure(BatchResult);

impl BatchFailure {
    pub fn failures(&self) -> &[ConversionFailure] {
        &self.0.failed
    }

    pub fn succeeded(&self) -> &[PathBuf] {
        &self.0.succeeded
    }
}

impl std::fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Errors during bulk conversion: {} of {} file(s) failed",
            self.0.failed.len(),
            self.0.total()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_is_success() {
        let result = BatchResult::default().into_result().unwrap();
        assert_eq!(result.total(), 0);
    }

    #[test]
    fn test_failure_becomes_aggregate() {
        let mut result = BatchResult::default();
        result.record_success(PathBuf::from("a.dds"));
        result.record_failure(
            PathBuf::from("b.dds"),
            ConvertError::DecodeError {
                path: "b.dds".to_string(),
                reason: "bad magic".to_string(),
            },
        );

        match result.into_result() {
            Err(ConvertError::BatchFailed(failure)) => {
                assert_eq!(failure.succeeded(), &[PathBuf::from("a.dds")]);
                assert_eq!(failure.failures().len(), 1);
                assert_eq!(failure.failures()[0].kind(), ErrorKind::Decode);
                assert_eq!(
                    failure.to_string(),
                    "Errors during bulk conversion: 1 of 2 file(s) failed"
                );
            }
            other => panic!("expected aggregate failure, got {:?}", other),
        }
    }

    #[test]
    fn test_detail_is_single_line() {
        let failure = ConversionFailure::new(
            PathBuf::from("x.dds"),
            ConvertError::WriteError {
                path: "x.png".to_string(),
                reason: "permission denied".to_string(),
            },
        );
        assert_eq!(
            failure.detail(),
            "Failed to write file: x.png Reason: permission denied"
        );
    }
}
