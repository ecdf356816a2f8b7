//! # 批量转换器
//!
//! 无界 FIFO 队列 + 单一后台工作线程，顺序转换提交的文件。
//!
//! ## 功能
//! - `submit` 可从多个线程并发调用
//! - 工作线程在队列为空时阻塞，逐个转换并记录结果
//! - 单文件失败（含 panic）不中断批次，结束时汇总为聚合错误
//! - `finish` 或 `Drop` 关闭队列并等待工作线程退出
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 使用
//! - 默认转换函数为 `codec::convert_file`
//! - 使用 `batch/report.rs` 输出事件

use crate::batch::report::Reporter;
use crate::codec;
use crate::error::{ConvertError, Result};
use crate::models::BatchResult;

use log::{debug, error, info};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// 工作线程名称
const WORKER_NAME: &str = "dds-convert-worker";

/// 批量转换器
pub struct BulkConverter {
    /// 队列发送端；取走即关闭队列
    sender: Option<Sender<PathBuf>>,
    /// 工作线程句柄，只 join 一次
    worker: Option<JoinHandle<BatchResult>>,
}

impl BulkConverter {
    /// 创建转换器并启动工作线程
    pub fn new<R: Reporter>(reporter: R) -> Result<Self> {
        Self::with_converter(reporter, codec::convert_file)
    }

    /// 使用自定义转换函数创建转换器
    pub fn with_converter<R, F>(mut reporter: R, convert: F) -> Result<Self>
    where
        R: Reporter,
        F: Fn(&Path) -> Result<PathBuf> + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();

        let worker = thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || process_loop(receiver, &mut reporter, convert))
            .map_err(ConvertError::WorkerSpawn)?;

        debug!("Conversion worker started");

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    /// 提交一个待转换文件
    pub fn submit(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(ConvertError::InvalidInput(
                "path must not be empty".to_string(),
            ));
        }

        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| ConvertError::InvalidInput("converter is closed".to_string()))?;

        debug!("Queued {}", path.display());
        // 接收端仅在工作线程异常退出后才会被释放
        sender.send(path).map_err(|_| ConvertError::WorkerPanicked)
    }

    /// 关闭队列，等待全部处理完成
    ///
    /// 任一文件失败时返回 `ConvertError::BatchFailed`，携带所有单文件错误。
    pub fn finish(mut self) -> Result<BatchResult> {
        self.shutdown()?.into_result()
    }

    /// 关闭队列并 join 工作线程
    fn shutdown(&mut self) -> Result<BatchResult> {
        drop(self.sender.take());

        match self.worker.take() {
            Some(handle) => handle.join().map_err(|_| ConvertError::WorkerPanicked),
            None => Ok(BatchResult::default()),
        }
    }
}

impl Drop for BulkConverter {
    fn drop(&mut self) {
        if self.worker.is_none() {
            return;
        }

        match self.shutdown() {
            Ok(result) if !result.is_success() => error!(
                "Conversion finished with {} failure(s) out of {} file(s)",
                result.failed.len(),
                result.total()
            ),
            Ok(_) => {}
            Err(e) => error!("{}", e),
        }
    }
}

/// 工作线程主循环
fn process_loop<R, F>(receiver: Receiver<PathBuf>, reporter: &mut R, convert: F) -> BatchResult
where
    R: Reporter,
    F: Fn(&Path) -> Result<PathBuf>,
{
    let mut result = BatchResult::default();

    // 发送端全部释放且队列为空时迭代结束
    for path in receiver {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| convert(&path)))
            .unwrap_or_else(|payload| {
                error!("Conversion of {} panicked", path.display());
                Err(ConvertError::ConversionPanicked {
                    path: path.display().to_string(),
                    reason: panic_message(payload.as_ref()),
                })
            });

        match outcome {
            Ok(output) => {
                debug!("{} -> {}", path.display(), output.display());
                reporter.on_item_success(&path);
                result.record_success(path);
            }
            Err(e) => {
                debug!("Failed to convert {}: {}", path.display(), e);
                result.record_failure(path, e);
            }
        }
    }

    info!(
        "Conversion worker drained: {} succeeded, {} failed",
        result.succeeded.len(),
        result.failed.len()
    );
    reporter.on_batch_complete(result.is_success(), &result.failed);

    result
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::test_support::{write_argb_dds, write_rgb565_dds};
    use crate::error::ErrorKind;
    use crate::models::ConversionFailure;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Converted(PathBuf),
        Complete { ok: bool, failures: usize },
    }

    /// 记录事件的测试报告器
    #[derive(Clone, Default)]
    struct RecordingReporter {
        events: Arc<Mutex<Vec<Event>>>,
    }

    impl RecordingReporter {
        fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }
    }

    impl Reporter for RecordingReporter {
        fn on_item_success(&mut self, path: &Path) {
            self.events
                .lock()
                .unwrap()
                .push(Event::Converted(path.to_path_buf()));
        }

        fn on_batch_complete(&mut self, ok: bool, failures: &[ConversionFailure]) {
            self.events.lock().unwrap().push(Event::Complete {
                ok,
                failures: failures.len(),
            });
        }
    }

    /// 以 "bad" 开头的文件名转换失败
    fn fake_convert(path: &Path) -> Result<PathBuf> {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if name.starts_with("bad") {
            Err(ConvertError::DecodeError {
                path: path.display().to_string(),
                reason: "bad magic".to_string(),
            })
        } else {
            Ok(codec::output_path(path))
        }
    }

    #[test]
    fn test_empty_batch_succeeds() {
        let reporter = RecordingReporter::default();
        let converter = BulkConverter::with_converter(reporter.clone(), fake_convert).unwrap();

        let result = converter.finish().unwrap();
        assert_eq!(result.total(), 0);
        assert_eq!(
            reporter.events(),
            vec![Event::Complete {
                ok: true,
                failures: 0
            }]
        );
    }

    #[test]
    fn test_items_processed_in_submission_order() {
        let reporter = RecordingReporter::default();
        let converter = BulkConverter::with_converter(reporter.clone(), fake_convert).unwrap();

        let paths: Vec<PathBuf> = (0..20).map(|i| PathBuf::from(format!("{}.dds", i))).collect();
        for path in &paths {
            converter.submit(path.clone()).unwrap();
        }

        let result = converter.finish().unwrap();
        assert_eq!(result.succeeded, paths);

        let mut expected: Vec<Event> = paths.into_iter().map(Event::Converted).collect();
        expected.push(Event::Complete {
            ok: true,
            failures: 0,
        });
        assert_eq!(reporter.events(), expected);
    }

    #[test]
    fn test_partial_failure_is_isolated() {
        let reporter = RecordingReporter::default();
        let converter = BulkConverter::with_converter(reporter.clone(), fake_convert).unwrap();

        for name in ["a.dds", "bad.dds", "b.dds", "c.dds"] {
            converter.submit(name).unwrap();
        }

        let failure = match converter.finish() {
            Err(ConvertError::BatchFailed(failure)) => failure,
            other => panic!("expected aggregate failure, got {:?}", other),
        };

        assert_eq!(failure.succeeded().len(), 3);
        assert_eq!(failure.failures().len(), 1);
        assert_eq!(failure.failures()[0].path, PathBuf::from("bad.dds"));
        assert_eq!(failure.failures()[0].kind(), ErrorKind::Decode);

        let events = reporter.events();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events.last(),
            Some(&Event::Complete {
                ok: false,
                failures: 1
            })
        );
    }

    #[test]
    fn test_every_path_attempted_exactly_once() {
        let attempts = Arc::new(Mutex::new(Vec::new()));
        let seen = attempts.clone();
        let converter = BulkConverter::with_converter(RecordingReporter::default(), move |p| {
            seen.lock().unwrap().push(p.to_path_buf());
            fake_convert(p)
        })
        .unwrap();

        let names = ["x.dds", "bad1.dds", "y.dds", "bad2.dds", "x.dds"];
        for name in names {
            converter.submit(name).unwrap();
        }

        let failure = match converter.finish() {
            Err(ConvertError::BatchFailed(failure)) => failure,
            other => panic!("expected aggregate failure, got {:?}", other),
        };

        let attempted = attempts.lock().unwrap().clone();
        let expected: Vec<PathBuf> = names.iter().map(PathBuf::from).collect();
        assert_eq!(attempted, expected);
        assert_eq!(failure.succeeded().len() + failure.failures().len(), names.len());
        assert_eq!(failure.failures().len(), 2);
    }

    #[test]
    fn test_submit_rejects_empty_path() {
        let converter =
            BulkConverter::with_converter(RecordingReporter::default(), fake_convert).unwrap();

        let err = converter.submit("").unwrap_err();
        assert!(matches!(err, ConvertError::InvalidInput(_)));
        assert_eq!(converter.finish().unwrap().total(), 0);
    }

    #[test]
    fn test_worker_waits_for_late_submissions() {
        let reporter = RecordingReporter::default();
        let converter = BulkConverter::with_converter(reporter.clone(), fake_convert).unwrap();

        // 队列为空时工作线程应阻塞而非退出
        thread::sleep(Duration::from_millis(50));
        converter.submit("late.dds").unwrap();

        let result = converter.finish().unwrap();
        assert_eq!(result.succeeded, vec![PathBuf::from("late.dds")]);
    }

    #[test]
    fn test_concurrent_producers() {
        let converter =
            BulkConverter::with_converter(RecordingReporter::default(), fake_convert).unwrap();

        thread::scope(|s| {
            for producer in 0..4 {
                let converter = &converter;
                s.spawn(move || {
                    for i in 0..25 {
                        converter
                            .submit(format!("p{}_{}.dds", producer, i))
                            .unwrap();
                    }
                });
            }
        });

        let result = converter.finish().unwrap();
        assert_eq!(result.total(), 100);

        // 同一生产者内保持 FIFO
        for producer in 0..4 {
            let prefix = format!("p{}_", producer);
            let order: Vec<usize> = result
                .succeeded
                .iter()
                .filter_map(|p| p.to_str())
                .filter_map(|p| p.strip_prefix(&prefix))
                .filter_map(|p| p.trim_end_matches(".dds").parse().ok())
                .collect();
            assert_eq!(order, (0..25).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_drop_drains_queue() {
        let reporter = RecordingReporter::default();
        {
            let converter =
                BulkConverter::with_converter(reporter.clone(), fake_convert).unwrap();
            converter.submit("one.dds").unwrap();
            converter.submit("bad.dds").unwrap();
            converter.submit("two.dds").unwrap();
        }

        assert_eq!(
            reporter.events(),
            vec![
                Event::Converted(PathBuf::from("one.dds")),
                Event::Converted(PathBuf::from("two.dds")),
                Event::Complete {
                    ok: false,
                    failures: 1
                },
            ]
        );
    }

    #[test]
    fn test_panicking_item_is_isolated() {
        let reporter = RecordingReporter::default();
        let converter = BulkConverter::with_converter(reporter.clone(), |p: &Path| {
            if p == Path::new("boom.dds") {
                panic!("codec exploded");
            }
            fake_convert(p)
        })
        .unwrap();

        for name in ["a.dds", "boom.dds", "b.dds", "c.dds"] {
            converter.submit(name).unwrap();
        }

        let failure = match converter.finish() {
            Err(ConvertError::BatchFailed(failure)) => failure,
            other => panic!("expected aggregate failure, got {:?}", other),
        };

        assert_eq!(
            failure.succeeded(),
            &[
                PathBuf::from("a.dds"),
                PathBuf::from("b.dds"),
                PathBuf::from("c.dds")
            ]
        );
        assert_eq!(failure.failures().len(), 1);
        assert_eq!(failure.failures()[0].path, PathBuf::from("boom.dds"));
        match &failure.failures()[0].error {
            ConvertError::ConversionPanicked { reason, .. } => {
                assert_eq!(reason, "codec exploded")
            }
            other => panic!("unexpected error: {:?}", other),
        }

        assert_eq!(
            reporter.events(),
            vec![
                Event::Converted(PathBuf::from("a.dds")),
                Event::Converted(PathBuf::from("b.dds")),
                Event::Converted(PathBuf::from("c.dds")),
                Event::Complete {
                    ok: false,
                    failures: 1
                },
            ]
        );
    }

    #[test]
    fn test_panic_message_formats() {
        let owned: Box<dyn Any + Send> = Box::new(format!("index {}", 3));
        assert_eq!(panic_message(owned.as_ref()), "index 3");
        let other: Box<dyn Any + Send> = Box::new(42u32);
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }

    #[test]
    fn test_real_files_with_one_corrupt_and_one_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let good_a = dir.path().join("a.dds");
        let corrupt = dir.path().join("corrupt.dds");
        let unsupported = dir.path().join("rgb565.dds");
        let good_b = dir.path().join("b.dds");
        write_argb_dds(&good_a, 4, 4);
        std::fs::write(&corrupt, b"not a dds file at all").unwrap();
        write_rgb565_dds(&unsupported, 2, 2);
        write_argb_dds(&good_b, 2, 8);

        let reporter = RecordingReporter::default();
        let converter = BulkConverter::new(reporter.clone()).unwrap();
        for path in [&good_a, &corrupt, &unsupported, &good_b] {
            converter.submit(path.clone()).unwrap();
        }

        let failure = match converter.finish() {
            Err(ConvertError::BatchFailed(failure)) => failure,
            other => panic!("expected aggregate failure, got {:?}", other),
        };

        let kinds: Vec<ErrorKind> = failure.failures().iter().map(|f| f.kind()).collect();
        assert_eq!(kinds, vec![ErrorKind::Decode, ErrorKind::UnsupportedFormat]);
        assert_eq!(failure.succeeded(), &[good_a.clone(), good_b.clone()]);
        assert!(dir.path().join("a.png").exists());
        assert!(dir.path().join("b.png").exists());
        assert!(!dir.path().join("corrupt.png").exists());

        assert_eq!(
            reporter.events(),
            vec![
                Event::Converted(good_a),
                Event::Converted(good_b),
                Event::Complete {
                    ok: false,
                    failures: 2
                },
            ]
        );
    }
}
