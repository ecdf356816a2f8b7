//! # 路径收集器
//!
//! 将命令行参数展开为待转换的 DDS 文件路径并提交给转换器。
//!
//! ## 功能
//! - 目录参数：递归搜索匹配模式的文件（大小写不敏感）
//! - 其他参数：原样提交，不检查是否存在（由转换阶段报错）
//! - glob 模式匹配，支持逗号分隔的多模式
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名
//! - 提交到 `batch/runner.rs` 的 `BulkConverter`

use crate::batch::runner::BulkConverter;
use crate::error::{ConvertError, Result};

use glob::{MatchOptions, Pattern};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 默认匹配模式
pub const DEFAULT_PATTERN: &str = "*.dds";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// 路径收集器
pub struct PathCollector {
    /// 匹配模式列表
    patterns: Vec<Pattern>,
}

impl PathCollector {
    /// 创建收集器（逗号分隔的多模式）
    pub fn new(pattern: &str) -> Result<Self> {
        let mut patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Pattern::new(s).map_err(|e| {
                    ConvertError::InvalidArgument(format!("Invalid pattern '{}': {}", s, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if patterns.is_empty() {
            patterns.push(Pattern::new(DEFAULT_PATTERN).map_err(|e| {
                ConvertError::InvalidArgument(format!("Invalid pattern '{}': {}", DEFAULT_PATTERN, e))
            })?);
        }

        Ok(Self { patterns })
    }

    /// 展开单个参数
    pub fn expand(&self, arg: &Path) -> Vec<PathBuf> {
        if !arg.is_dir() {
            return vec![arg.to_path_buf()];
        }

        WalkDir::new(arg)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", arg.display(), e);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.matches_patterns(e.path()))
            .map(|e| e.into_path())
            .collect()
    }

    /// 展开所有参数并逐个提交，返回提交数量
    pub fn submit_all<I, P>(&self, args: I, converter: &BulkConverter) -> Result<usize>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut submitted = 0;

        for arg in args {
            let arg = arg.as_ref();
            let paths = self.expand(arg);
            if arg.is_dir() {
                debug!("{}: {} matching file(s)", arg.display(), paths.len());
            }

            for path in paths {
                converter.submit(path)?;
                submitted += 1;
            }
        }

        Ok(submitted)
    }

    /// 检查文件名是否匹配任一模式
    fn matches_patterns(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let Some(filename) = name.to_str() else {
            warn!("Skipping {}: file name is not valid UTF-8", path.display());
            return false;
        };

        self.patterns
            .iter()
            .any(|p| p.matches_with(filename, MATCH_OPTIONS))
    }
}
