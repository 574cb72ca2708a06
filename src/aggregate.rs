//! # DOS 聚合
//!
//! 由数据集和选择计算要显示的曲线：
//! - `individual_series`: 每个 (原子, 轨道) 对单独一条
//! - `merged_series`: 所有选中对逐点求和
//!
//! 求和总是按 (原子, 轨道) 升序进行，结果与选择的插入顺序无关。
//! 两个函数都是纯函数，选择改变后由调用方重新调用。
//!
//! ## 依赖关系
//! - 被 `session.rs` 与命令行的导出、绘图命令使用
//! - 使用 `models/dataset.rs`, `selection.rs`

use crate::error::{DosError, Result, SelectionTarget};
use crate::models::{Dataset, Spin, SpinSeries};
use crate::selection::Selection;

/// 单个 (原子, 轨道) 通道的曲线
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSeries<'a> {
    pub atom_index: usize,
    pub atom_label: String,
    pub orbital_index: usize,
    pub orbital: &'a str,
    pub up: &'a [f64],
    pub down: &'a [f64],
}

impl<'a> ChannelSeries<'a> {
    pub fn get(&self, spin: Spin) -> &'a [f64] {
        match spin {
            Spin::Up => self.up,
            Spin::Down => self.down,
        }
    }

    /// 图例用的名称，例如 `Co2 dxy`
    pub fn identity(&self) -> String {
        format!("{} {}", self.atom_label, self.orbital)
    }
}

/// 合并后的曲线
#[derive(Debug, Clone, PartialEq)]
pub struct MergedSeries {
    pub up: Vec<f64>,
    pub down: Vec<f64>,

    /// 参与求和的 (原子, 轨道) 对数
    pub pair_count: usize,
}

impl MergedSeries {
    pub fn get(&self, spin: Spin) -> &[f64] {
        match spin {
            Spin::Up => &self.up,
            Spin::Down => &self.down,
        }
    }
}

/// 每个选中的 (原子, 轨道) 对的曲线，原子为主序、轨道为次序
pub fn individual_series<'a>(
    dataset: &'a Dataset,
    selection: &Selection,
) -> Result<Vec<ChannelSeries<'a>>> {
    selection.ensure_matches(dataset)?;

    let orbitals = selection.orbitals();
    let mut out = Vec::with_capacity(selection.pair_count());
    for atom in selection.atoms() {
        let atom_label = dataset.atoms()[atom].label();
        for &orbital in &orbitals {
            let channel = dataset.channel(atom, orbital)?;
            out.push(ChannelSeries {
                atom_index: atom,
                atom_label: atom_label.clone(),
                orbital_index: orbital,
                orbital: dataset.orbitals().channels()[orbital].symbol.as_str(),
                up: &channel.up,
                down: &channel.down,
            });
        }
    }
    Ok(out)
}

/// 所有选中 (原子, 轨道) 对的逐点求和
///
/// 原子集合或轨道集合为空时返回 `EmptySelection`。
pub fn merged_series(dataset: &Dataset, selection: &Selection) -> Result<MergedSeries> {
    selection.ensure_matches(dataset)?;

    let atoms = selection.atoms();
    let orbitals = selection.orbitals();
    if atoms.is_empty() {
        return Err(DosError::EmptySelection {
            target: SelectionTarget::Atom,
        });
    }
    if orbitals.is_empty() {
        return Err(DosError::EmptySelection {
            target: SelectionTarget::Orbital,
        });
    }

    let pairs: Vec<(usize, usize)> = atoms
        .iter()
        .flat_map(|&a| orbitals.iter().map(move |&o| (a, o)))
        .collect();
    merge_pairs(dataset, &pairs)
}

/// 对任意 (原子, 轨道) 对列表求和
///
/// 列表先排序去重，再按升序累加。
pub fn merge_pairs(dataset: &Dataset, pairs: &[(usize, usize)]) -> Result<MergedSeries> {
    if pairs.is_empty() {
        return Err(DosError::EmptySelection {
            target: SelectionTarget::Pair,
        });
    }

    let mut sorted = pairs.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut sum = SpinSeries::zeros(dataset.nedos());
    for &(atom, orbital) in &sorted {
        sum.accumulate(dataset.channel(atom, orbital)?);
    }

    Ok(MergedSeries {
        up: sum.up,
        down: sum.down,
        pair_count: sorted.len(),
    })
}
