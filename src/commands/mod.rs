//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `render/`, `batch/`, `utils/` 以及核心库
//! - 子模块: info, export, plot, batch, select

pub mod batch;
pub mod export;
pub mod info;
pub mod plot;
pub mod select;

use crate::cli::Commands;
use doswave::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Info(args) => info::execute(args),
        Commands::Export(args) => export::execute(args),
        Commands::Plot(args) => plot::execute(args),
        Commands::Batch(args) => batch::execute(args),
    }
}
