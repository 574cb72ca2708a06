//! # 曲线视图
//!
//! 把数据集 + 选择转换成一组带名称的曲线，供导出与绘图共用。
//!
//! ## 子模块
//! - `export`: CSV / DAT 数据导出
//! - `plot`: PNG / SVG 图表生成
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用核心库的 `aggregate` 与 `label`

pub mod export;
pub mod plot;

use doswave::error::{DosError, Result};
use doswave::{individual_series, merged_series, selection_label, Dataset, Selection, Spin};

/// 视图选项
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewOptions {
    pub merged: bool,
    pub total: bool,
    pub shift_fermi: bool,
}

/// 一条曲线，数值以正值存储
#[derive(Debug, Clone)]
pub struct Curve {
    pub name: String,
    pub spin: Spin,

    /// 同一通道的 up/down 共用一个分组 (同色)
    pub group: usize,
    pub values: Vec<f64>,
}

impl Curve {
    /// 列名，例如 `O1 s up`
    pub fn column_name(&self) -> String {
        format!("{} {}", self.name, self.spin)
    }

    /// 显示用数值，Down 取负
    pub fn signed_value(&self, i: usize) -> f64 {
        self.values[i] * self.spin.display_sign()
    }
}

/// 一次导出或绘图的全部曲线
#[derive(Debug, Clone)]
pub struct DosView {
    pub title: String,
    pub energies: Vec<f64>,
    pub fermi: f64,
    pub curves: Vec<Curve>,
}

impl DosView {
    pub fn build(dataset: &Dataset, selection: &Selection, options: ViewOptions) -> Result<Self> {
        let (energies, fermi) = if options.shift_fermi {
            (dataset.energies_relative_to_fermi(), 0.0)
        } else {
            (dataset.energies().to_vec(), dataset.efermi())
        };

        let mut curves = Vec::new();
        let mut group = 0;
        let mut push_pair = |name: String, up: &[f64], down: &[f64]| {
            curves.push(Curve {
                name: name.clone(),
                spin: Spin::Up,
                group,
                values: up.to_vec(),
            });
            curves.push(Curve {
                name,
                spin: Spin::Down,
                group,
                values: down.to_vec(),
            });
            group += 1;
        };

        if options.total {
            let total = dataset.total_series();
            push_pair("total".to_string(), &total.up, &total.down);
        }

        if options.merged {
            if !selection.is_empty() || !options.total {
                let merged = merged_series(dataset, selection)?;
                let label = selection_label(dataset, selection)?;
                push_pair(label, &merged.up, &merged.down);
            }
        } else {
            for channel in individual_series(dataset, selection)? {
                push_pair(channel.identity(), channel.up, channel.down);
            }
        }

        if curves.is_empty() {
            return Err(DosError::InvalidArgument(
                "nothing to show: select at least one atom and one orbital, or pass --total"
                    .to_string(),
            ));
        }

        let title = if dataset.name().is_empty() {
            "DOS".to_string()
        } else {
            dataset.name().to_string()
        };

        Ok(DosView {
            title,
            energies,
            fermi,
            curves,
        })
    }
}
