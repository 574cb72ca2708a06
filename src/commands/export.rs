//! # export 子命令实现
//!
//! 加载计算目录，按选择表达式取出曲线并写入 CSV / DAT。
//!
//! ## 依赖关系
//! - 使用 `cli/export.rs` 定义的参数
//! - 使用 `commands/select.rs` 解析选择
//! - 使用 `render/export.rs` 写文件

use super::select::build_selection;
use crate::cli::export::{ExportArgs, ExportFormat};
use crate::render::{self, DosView};
use crate::utils::output;
use doswave::error::Result;
use doswave::selection_label;
use doswave::Dataset;

pub fn execute(args: ExportArgs) -> Result<()> {
    output::print_header("Export DOS");

    let dataset = Dataset::load(&args.dir)?;
    output::print_success(&format!(
        "Loaded '{}' ({} atoms, {} orbital channels, NEDOS = {})",
        args.dir.display(),
        dataset.number_of_atoms(),
        dataset.orbitals().len(),
        dataset.nedos()
    ));

    let selection = build_selection(&dataset, &args.select.atoms, &args.select.orbitals)?;
    if !selection.is_empty() {
        output::print_info(&format!(
            "Selection: {}",
            selection_label(&dataset, &selection)?
        ));
    }

    let view = DosView::build(&dataset, &selection, args.select.view_options())?;
    let format = args
        .format
        .unwrap_or_else(|| ExportFormat::from_path(&args.output));

    match format {
        ExportFormat::Csv => render::export::to_csv(&view, &args.output, args.signed)?,
        ExportFormat::Dat => render::export::to_dat(&view, &args.output, args.signed)?,
    }

    output::print_success(&format!(
        "{} curves written to '{}'",
        view.curves.len(),
        args.output.display()
    ));
    Ok(())
}
