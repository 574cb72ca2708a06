//! # plot 子命令实现
//!
//! 加载计算目录，按选择表达式绘制 DOS 图。
//!
//! ## 依赖关系
//! - 使用 `cli/plot.rs` 定义的参数
//! - 使用 `commands/select.rs` 解析选择
//! - 使用 `render/plot.rs` 绘图

use super::select::build_selection;
use crate::cli::plot::PlotArgs;
use crate::render::plot::{generate_dos_plot, PlotOptions};
use crate::render::DosView;
use crate::utils::output;
use doswave::error::Result;
use doswave::selection_label;
use doswave::Dataset;

use std::path::Path;

/// 扩展名为 `.svg` 时输出矢量图
pub(crate) fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false)
}

pub fn execute(args: PlotArgs) -> Result<()> {
    output::print_header("Plot DOS");

    let dataset = Dataset::load(&args.dir)?;
    output::print_success(&format!(
        "Loaded '{}' ({} atoms, E_F = {:.4} eV)",
        args.dir.display(),
        dataset.number_of_atoms(),
        dataset.efermi()
    ));

    let selection = build_selection(&dataset, &args.select.atoms, &args.select.orbitals)?;
    if !selection.is_empty() {
        output::print_info(&format!(
            "Selection: {}",
            selection_label(&dataset, &selection)?
        ));
    }

    let view = DosView::build(&dataset, &selection, args.select.view_options())?;
    if view.curves.len() > 32 {
        output::print_warning(&format!(
            "{} curves selected; consider --merged for a readable plot",
            view.curves.len()
        ));
    }

    let options = PlotOptions {
        width: args.width,
        height: args.height,
        title: args.title.clone(),
        emin: args.emin,
        emax: args.emax,
        use_svg: is_svg(&args.output),
    };
    generate_dos_plot(&view, &args.output, &options)?;

    output::print_success(&format!("Plot saved to '{}'", args.output.display()));
    Ok(())
}
