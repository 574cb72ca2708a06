//! # 批量处理模块
//!
//! 在目录树中查找计算目录，并行地对每个目录执行相同的处理。
//!
//! ## 功能
//! - 收集同时包含 DOSCAR 与 POSCAR 的目录
//! - glob 模式过滤目录名
//! - 并行处理、进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::CalcDirCollector;
pub use runner::{BatchResult, BatchRunner, ProcessResult};
