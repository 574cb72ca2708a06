//! # plot 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/plot.rs`

use super::SelectionArgs;
use clap::Args;
use std::path::PathBuf;

/// plot 子命令参数
#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Calculation directory containing DOSCAR and POSCAR
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    #[command(flatten)]
    pub select: SelectionArgs,

    /// Output image; ".svg" writes a vector image, anything else PNG
    #[arg(short, long, default_value = "dos.png")]
    pub output: PathBuf,

    /// Lower bound of the energy window (eV, after --shift-fermi if given)
    #[arg(long, allow_negative_numbers = true)]
    pub emin: Option<f64>,

    /// Upper bound of the energy window (eV, after --shift-fermi if given)
    #[arg(long, allow_negative_numbers = true)]
    pub emax: Option<f64>,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Title for the plot (default: POSCAR comment line)
    #[arg(long)]
    pub title: Option<String>,
}
