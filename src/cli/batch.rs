//! # batch 子命令 CLI 定义
//!
//! 对目录树中所有包含 DOSCAR 与 POSCAR 的计算目录做相同的导出或绘图。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/batch.rs`

use super::SelectionArgs;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 批量输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum BatchFormat {
    /// CSV data file
    Csv,
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
}

impl BatchFormat {
    pub fn extension(self) -> &'static str {
        match self {
            BatchFormat::Csv => "csv",
            BatchFormat::Png => "png",
            BatchFormat::Svg => "svg",
        }
    }
}

/// batch 子命令参数
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Root directory to search for calculation directories
    pub root: PathBuf,

    #[command(flatten)]
    pub select: SelectionArgs,

    /// Output directory
    #[arg(short, long, default_value = "doswave_out")]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: BatchFormat,

    /// Glob pattern matched against calculation directory names
    #[arg(long, default_value = "*")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
