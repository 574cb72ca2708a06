//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `info`: 数据集概要
//! - `export`: 导出曲线数据
//! - `plot`: 绘制曲线
//! - `batch`: 批量处理计算目录
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: info, export, plot, batch

pub mod batch;
pub mod export;
pub mod info;
pub mod plot;

use crate::render::ViewOptions;
use clap::{Args, Parser, Subcommand};

/// doswave - VASP 投影态密度浏览工具
#[derive(Parser)]
#[command(name = "doswave")]
#[command(version)]
#[command(about = "Browse spin-resolved projected DOS from VASP DOSCAR/POSCAR", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Show atoms, species and orbital channels of a calculation directory
    Info(info::InfoArgs),

    /// Export selected DOS curves to CSV or whitespace-separated data
    Export(export::ExportArgs),

    /// Plot selected DOS curves (PNG or SVG)
    Plot(plot::PlotArgs),

    /// Export or plot the same selection for many calculation directories
    Batch(batch::BatchArgs),
}

// ─────────────────────────────────────────────────────────────
// 共用的选择参数
// ─────────────────────────────────────────────────────────────

/// 原子与轨道选择参数
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Atoms: "all", 1-based indices ("1-4"), species ("O"), labels ("Co2", "O1-3"); comma separated
    #[arg(short, long, default_value = "all")]
    pub atoms: String,

    /// Orbitals: "all", types (s, p, d, f) or channel symbols ("dxy", "pz"); comma separated
    #[arg(short = 'l', long, default_value = "all")]
    pub orbitals: String,

    /// Sum all selected atom/orbital channels into one spin-up/spin-down pair
    #[arg(short, long, default_value_t = false)]
    pub merged: bool,

    /// Include the total DOS
    #[arg(long, default_value_t = false)]
    pub total: bool,

    /// Shift energies so that the Fermi level sits at 0 eV
    #[arg(long, default_value_t = false)]
    pub shift_fermi: bool,
}

impl SelectionArgs {
    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            merged: self.merged,
            total: self.total,
            shift_fermi: self.shift_fermi,
        }
    }
}
