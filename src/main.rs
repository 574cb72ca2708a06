//! # doswave - VASP 投影态密度命令行工具
//!
//! 在核心库之上提供命令行界面：查看数据集、导出曲线、绘图、批量处理。
//!
//! ## 子命令
//! - `info`   - 数据集概要 (原子、元素、轨道)
//! - `export` - 导出选中的 DOS 曲线 (CSV / DAT)
//! - `plot`   - 绘制选中的 DOS 曲线 (PNG / SVG)
//! - `batch`  - 批量处理多个计算目录
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     └── render/    (导出与绘图)
//!   ├── batch/      (目录收集与并行执行)
//!   ├── utils/      (工具函数)
//!   └── doswave     (核心库: 解析、选择、聚合、标签)
//! ```

mod batch;
mod cli;
mod commands;
mod render;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
