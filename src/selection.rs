//! # 选择状态
//!
//! 记录当前选中的原子序号与轨道序号，纯状态，无 I/O。
//!
//! 所有按序号的操作都会先校验全部序号再修改集合，
//! 因此失败的调用不会留下部分修改。
//!
//! ## 依赖关系
//! - 被 `aggregate.rs`, `label.rs`, `session.rs` 使用
//! - 使用 `models/dataset.rs` 提供的元素与轨道分组

use crate::error::{DosError, Result, SelectionTarget};
use crate::models::{Dataset, OrbitalType};
use std::collections::BTreeSet;

/// 原子与轨道的选择集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    n_atoms: usize,
    n_orbitals: usize,
    atoms: BTreeSet<usize>,
    orbitals: BTreeSet<usize>,
}

impl Selection {
    /// 针对某数据集的空选择
    pub fn new(dataset: &Dataset) -> Self {
        Self::with_dims(dataset.number_of_atoms(), dataset.orbitals().len())
    }

    pub fn with_dims(n_atoms: usize, n_orbitals: usize) -> Self {
        Selection {
            n_atoms,
            n_orbitals,
            atoms: BTreeSet::new(),
            orbitals: BTreeSet::new(),
        }
    }

    /// 数据集被替换后重置：清空并更新有效范围
    pub fn reset(&mut self, dataset: &Dataset) {
        *self = Self::new(dataset);
    }

    /// 选择是否适用于该数据集
    pub fn matches(&self, dataset: &Dataset) -> bool {
        self.n_atoms == dataset.number_of_atoms() && self.n_orbitals == dataset.orbitals().len()
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.n_atoms, self.n_orbitals)
    }

    // ─────────────────────────────────────────────────────────────
    // 原子
    // ─────────────────────────────────────────────────────────────

    pub fn select_atoms(&mut self, indices: &[usize]) -> Result<()> {
        check_indices(indices, self.n_atoms, SelectionTarget::Atom)?;
        self.atoms.extend(indices.iter().copied());
        Ok(())
    }

    pub fn deselect_atoms(&mut self, indices: &[usize]) -> Result<()> {
        check_indices(indices, self.n_atoms, SelectionTarget::Atom)?;
        for i in indices {
            self.atoms.remove(i);
        }
        Ok(())
    }

    pub fn select_all_atoms(&mut self) {
        self.atoms = (0..self.n_atoms).collect();
    }

    pub fn deselect_all_atoms(&mut self) {
        self.atoms.clear();
    }

    /// 选中某元素的全部原子
    pub fn select_by_species(&mut self, dataset: &Dataset, symbol: &str) -> Result<()> {
        let indices = self.species_indices(dataset, symbol)?;
        self.atoms.extend(indices);
        Ok(())
    }

    pub fn deselect_by_species(&mut self, dataset: &Dataset, symbol: &str) -> Result<()> {
        for i in self.species_indices(dataset, symbol)? {
            self.atoms.remove(&i);
        }
        Ok(())
    }

    fn species_indices(&self, dataset: &Dataset, symbol: &str) -> Result<Vec<usize>> {
        self.ensure_matches(dataset)?;
        dataset
            .find_species(symbol)
            .map(|sp| sp.indices().collect())
            .ok_or_else(|| {
                DosError::ConsistencyError(format!(
                    "no element '{}' in this dataset (available: {})",
                    symbol,
                    dataset.species_symbols().join(", ")
                ))
            })
    }

    // ─────────────────────────────────────────────────────────────
    // 轨道
    // ─────────────────────────────────────────────────────────────

    pub fn select_orbitals(&mut self, indices: &[usize]) -> Result<()> {
        check_indices(indices, self.n_orbitals, SelectionTarget::Orbital)?;
        self.orbitals.extend(indices.iter().copied());
        Ok(())
    }

    pub fn deselect_orbitals(&mut self, indices: &[usize]) -> Result<()> {
        check_indices(indices, self.n_orbitals, SelectionTarget::Orbital)?;
        for i in indices {
            self.orbitals.remove(i);
        }
        Ok(())
    }

    pub fn select_all_orbitals(&mut self) {
        self.orbitals = (0..self.n_orbitals).collect();
    }

    pub fn deselect_all_orbitals(&mut self) {
        self.orbitals.clear();
    }

    /// 选中某类型 (s/p/d/f) 的全部轨道通道
    pub fn select_by_orbital_type(&mut self, dataset: &Dataset, kind: OrbitalType) -> Result<()> {
        let indices = self.type_indices(dataset, kind)?;
        self.orbitals.extend(indices);
        Ok(())
    }

    pub fn deselect_by_orbital_type(&mut self, dataset: &Dataset, kind: OrbitalType) -> Result<()> {
        for i in self.type_indices(dataset, kind)? {
            self.orbitals.remove(&i);
        }
        Ok(())
    }

    fn type_indices(&self, dataset: &Dataset, kind: OrbitalType) -> Result<Vec<usize>> {
        self.ensure_matches(dataset)?;
        let indices = dataset.orbitals().indices_of_type(kind);
        if indices.is_empty() {
            return Err(DosError::ConsistencyError(format!(
                "no {}-type orbitals in this dataset",
                kind
            )));
        }
        Ok(indices)
    }

    // ─────────────────────────────────────────────────────────────
    // 读取 (返回快照)
    // ─────────────────────────────────────────────────────────────

    /// 选中的原子序号，升序
    pub fn atoms(&self) -> Vec<usize> {
        self.atoms.iter().copied().collect()
    }

    /// 选中的轨道序号，升序
    pub fn orbitals(&self) -> Vec<usize> {
        self.orbitals.iter().copied().collect()
    }

    pub fn is_atom_selected(&self, index: usize) -> bool {
        self.atoms.contains(&index)
    }

    pub fn is_orbital_selected(&self, index: usize) -> bool {
        self.orbitals.contains(&index)
    }

    /// 原子或轨道任一为空
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty() || self.orbitals.is_empty()
    }

    /// 选中的 (原子, 轨道) 对数
    pub fn pair_count(&self) -> usize {
        self.atoms.len() * self.orbitals.len()
    }

    /// 选中原子的显示标签
    pub fn atom_labels(&self, dataset: &Dataset) -> Vec<String> {
        self.atoms
            .iter()
            .filter_map(|&i| dataset.atoms().get(i))
            .map(|a| a.label())
            .collect()
    }

    /// 选中轨道的符号
    pub fn orbital_symbols<'a>(&self, dataset: &'a Dataset) -> Vec<&'a str> {
        self.orbitals
            .iter()
            .filter_map(|&i| dataset.orbitals().get(i))
            .map(|o| o.symbol.as_str())
            .collect()
    }

    pub(crate) fn ensure_matches(&self, dataset: &Dataset) -> Result<()> {
        if self.matches(dataset) {
            Ok(())
        } else {
            Err(DosError::ConsistencyError(format!(
                "selection was built for {} atoms x {} orbitals, dataset has {} x {}",
                self.n_atoms,
                self.n_orbitals,
                dataset.number_of_atoms(),
                dataset.orbitals().len()
            )))
        }
    }
}

fn check_indices(indices: &[usize], len: usize, target: SelectionTarget) -> Result<()> {
    match indices.iter().find(|&&i| i >= len) {
        Some(&index) => Err(DosError::IndexError { target, index, len }),
        None => Ok(()),
    }
}
