//! # 批量执行器
//!
//! 并行执行批量处理任务。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代
//! - 进度条显示
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::utils::progress;

use doswave::error::{DosError, Result};
use rayon::prelude::*;
use std::path::PathBuf;

/// 单个目录处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult {
    /// 处理成功
    Success(String),
    /// 跳过（如输出文件已存在）
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (目录路径, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(_) => self.success += 1,
            ProcessResult::Skipped(_) => self.skipped += 1,
            ProcessResult::Failed(path, err) => {
                self.failed += 1;
                self.failures.push((path, err));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// `jobs = 0` 时使用全部 CPU
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理目录列表，结果顺序与输入一致
    pub fn run<F>(&self, dirs: Vec<PathBuf>, processor: F) -> Result<BatchResult>
    where
        F: Fn(&PathBuf) -> ProcessResult + Sync + Send,
    {
        let pb = progress::create_progress_bar(dirs.len() as u64, "Processing");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| DosError::Other(format!("Failed to start worker pool: {}", e)))?;

        let results: Vec<ProcessResult> = pool.install(|| {
            dirs.par_iter()
                .map(|dir| {
                    let result = processor(dir);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }
        Ok(batch_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_collects_outcomes() {
        let dirs: Vec<PathBuf> = (0..6).map(|i| PathBuf::from(format!("calc{}", i))).collect();
        let runner = BatchRunner::new(2);
        assert_eq!(runner.jobs(), 2);

        let result = runner
            .run(dirs, |dir| {
                let name = dir.display().to_string();
                match name.as_str() {
                    "calc0" | "calc3" => ProcessResult::Skipped(name),
                    "calc5" => ProcessResult::Failed(name, "bad DOSCAR".to_string()),
                    _ => ProcessResult::Success(name),
                }
            })
            .unwrap();

        assert_eq!(result.success, 3);
        assert_eq!(result.skipped, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.total(), 6);
        assert_eq!(result.failures[0].0, "calc5");
    }

    #[test]
    fn test_auto_jobs() {
        assert!(BatchRunner::new(0).jobs() >= 1);
    }
}
