//! # info 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/info.rs`

use clap::Args;
use std::path::PathBuf;

/// info 子命令参数
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Calculation directory containing DOSCAR and POSCAR
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}
