//! # DOS 图表生成
//!
//! 使用 `plotters` 库绘制自旋分辨的态密度图。
//!
//! ## 约定
//! - 横轴为 DOS，纵轴为能量
//! - Up 分量画在右侧，Down 分量取负画在左侧，同一通道同色
//! - 费米能处画一条水平虚线并标注
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs`, `commands/batch.rs` 调用
//! - 使用 `plotters` 渲染图表

use super::DosView;
use doswave::error::{DosError, Result};
use doswave::Spin;

use plotters::prelude::*;
use std::path::Path;

/// 图例最多显示的条目数
const MAX_LEGEND_ENTRIES: usize = 16;

const PALETTE: [RGBColor; 8] = [
    RGBColor(0, 102, 204),
    RGBColor(204, 0, 0),
    RGBColor(0, 153, 51),
    RGBColor(0, 170, 170),
    RGBColor(170, 0, 170),
    RGBColor(230, 120, 0),
    RGBColor(102, 102, 102),
    RGBColor(0, 0, 0),
];

/// 绘图参数
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
    pub emin: Option<f64>,
    pub emax: Option<f64>,
    pub use_svg: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        PlotOptions {
            width: 1200,
            height: 800,
            title: None,
            emin: None,
            emax: None,
            use_svg: false,
        }
    }
}

fn plot_err<E: std::fmt::Debug>(e: E) -> DosError {
    DosError::PlotError(format!("{:?}", e))
}

/// 生成 DOS 图表
pub fn generate_dos_plot(view: &DosView, output_path: &Path, options: &PlotOptions) -> Result<()> {
    let size = (options.width, options.height);
    if options.use_svg {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        draw_dos_chart(&root, view, options)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        draw_dos_chart(&root, view, options)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

/// 能量窗口：命令行给定值优先，否则取能量轴范围
fn energy_window(view: &DosView, options: &PlotOptions) -> Result<(f64, f64)> {
    let lo = options
        .emin
        .or_else(|| view.energies.iter().copied().reduce(f64::min))
        .unwrap_or(-1.0);
    let hi = options
        .emax
        .or_else(|| view.energies.iter().copied().reduce(f64::max))
        .unwrap_or(1.0);

    if lo >= hi {
        return Err(DosError::InvalidRange(format!(
            "energy window {} .. {} is empty",
            lo, hi
        )));
    }
    Ok((lo, hi))
}

/// 窗口内的最大 |DOS|，两侧对称留白
fn dos_extent(view: &DosView, lo: f64, hi: f64) -> f64 {
    let max = view
        .curves
        .iter()
        .flat_map(|c| {
            view.energies
                .iter()
                .zip(c.values.iter())
                .filter(|(e, _)| **e >= lo && **e <= hi)
                .map(|(_, v)| v.abs())
        })
        .fold(0.0_f64, f64::max);

    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

/// 绘制 DOS 图表的核心逻辑
fn draw_dos_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    view: &DosView,
    options: &PlotOptions,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_err)?;

    let (lo, hi) = energy_window(view, options)?;
    let extent = dos_extent(view, lo, hi);
    let title = options.title.as_deref().unwrap_or(&view.title);

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(-extent..extent, lo..hi)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("DOS (states/eV)")
        .y_desc("Energy (eV)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_err)?;

    // 零线
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(0.0, lo), (0.0, hi)],
            BLACK.stroke_width(1),
        )))
        .map_err(plot_err)?;

    let mut legend_entries = 0;
    for curve in &view.curves {
        let color = PALETTE[curve.group % PALETTE.len()];
        let points: Vec<(f64, f64)> = view
            .energies
            .iter()
            .enumerate()
            .filter(|(_, e)| **e >= lo && **e <= hi)
            .map(|(i, e)| (curve.signed_value(i), *e))
            .collect();

        let series = chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))
            .map_err(plot_err)?;

        // 每个分组只在 Up 分量上登记一次图例
        if curve.spin == Spin::Up && legend_entries < MAX_LEGEND_ENTRIES {
            legend_entries += 1;
            series.label(curve.name.clone()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
        }
    }

    // 费米能
    if view.fermi >= lo && view.fermi <= hi {
        let dash = RGBColor(120, 120, 120);
        let steps = 60;
        let step = 2.0 * extent / steps as f64;
        let segments = (0..steps).step_by(2).map(|i| {
            let x0 = -extent + i as f64 * step;
            PathElement::new(vec![(x0, view.fermi), (x0 + step, view.fermi)], dash.stroke_width(1))
        });
        chart.draw_series(segments).map_err(plot_err)?;

        chart
            .draw_series(std::iter::once(Text::new(
                format!("E_F = {:.3} eV", view.fermi),
                (-extent * 0.95, view.fermi + (hi - lo) * 0.01),
                ("sans-serif", 14).into_font().color(&BLACK),
            )))
            .map_err(plot_err)?;
    }

    if legend_entries > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", 14))
            .draw()
            .map_err(plot_err)?;
    }

    Ok(())
}
