//! # 批量执行器
//!
//! 并行执行批量处理任务。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代
//! - 进度条显示
//! - 错误收集，单个文件失败不中断批处理
//!
//! ## 依赖关系
//! - 被 `commands/grid.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::utils::progress;

use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{debug, warn};

/// 单个文件处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult<T> {
    /// 处理成功
    Success(PathBuf, T),
    /// 处理失败
    Failed(PathBuf, String), // (文件路径, 错误信息)
}

/// 批量处理结果，保持输入文件顺序
#[derive(Debug)]
pub struct BatchResult<T> {
    /// 成功的输出
    pub outputs: Vec<(PathBuf, T)>,
    /// 失败详情
    pub failures: Vec<(PathBuf, String)>,
}

impl<T> Default for BatchResult<T> {
    fn default() -> Self {
        Self {
            outputs: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> BatchResult<T> {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult<T>) {
        match result {
            ProcessResult::Success(path, value) => self.outputs.push((path, value)),
            ProcessResult::Failed(path, err) => self.failures.push((path, err)),
        }
    }

    pub fn success(&self) -> usize {
        self.outputs.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success() + self.failed()
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器，`jobs == 0` 时使用全部 CPU
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理文件列表
    pub fn run<T, F>(&self, files: Vec<PathBuf>, processor: F) -> BatchResult<T>
    where
        T: Send,
        F: Fn(&PathBuf) -> ProcessResult<T> + Sync + Send,
    {
        let pb = progress::create_progress_bar(files.len() as u64, "Processing");

        let process = |file: &PathBuf| {
            let result = processor(file);
            if let ProcessResult::Failed(path, err) = &result {
                debug!(path = %path.display(), error = %err, "file failed");
            }
            pb.inc(1);
            result
        };

        // 线程池创建失败时退回全局线程池
        let results: Vec<ProcessResult<T>> =
            match rayon::ThreadPoolBuilder::new().num_threads(self.jobs).build() {
                Ok(pool) => pool.install(|| files.par_iter().map(process).collect()),
                Err(e) => {
                    warn!(error = %e, "failed to build thread pool, using global pool");
                    files.par_iter().map(process).collect()
                }
            };

        pb.finish_and_clear();

        // 汇总结果
        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        batch_result
    }
}
