//! # 会话
//!
//! 持有当前加载的数据集及其选择状态。
//! 加载新目录时先完整构建新数据集，成功后才替换旧数据并重置选择；
//! 加载失败时原有的数据集和选择保持不变。
//!
//! ## 依赖关系
//! - 供外部界面层使用
//! - 使用 `models/dataset.rs`, `selection.rs`, `aggregate.rs`, `label.rs`

use crate::aggregate::{self, ChannelSeries, MergedSeries};
use crate::error::Result;
use crate::label;
use crate::models::Dataset;
use crate::selection::Selection;
use std::path::{Path, PathBuf};

/// 一个计算目录的浏览会话
#[derive(Debug, Clone)]
pub struct Session {
    directory: Option<PathBuf>,
    dataset: Dataset,
    selection: Selection,
}

impl Session {
    /// 加载计算目录并创建会话
    pub fn open(dir: &Path) -> Result<Self> {
        let mut session = Self::from_dataset(Dataset::load(dir)?);
        session.directory = Some(dir.to_path_buf());
        Ok(session)
    }

    pub fn from_dataset(dataset: Dataset) -> Self {
        let selection = Selection::new(&dataset);
        Session {
            directory: None,
            dataset,
            selection,
        }
    }

    /// 整体替换为另一个目录的数据
    pub fn load_directory(&mut self, dir: &Path) -> Result<()> {
        let dataset = Dataset::load(dir)?;
        self.replace_dataset(dataset);
        self.directory = Some(dir.to_path_buf());
        Ok(())
    }

    pub fn replace_dataset(&mut self, dataset: Dataset) {
        self.selection.reset(&dataset);
        self.dataset = dataset;
        self.directory = None;
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn individual_series(&self) -> Result<Vec<ChannelSeries<'_>>> {
        aggregate::individual_series(&self.dataset, &self.selection)
    }

    pub fn merged_series(&self) -> Result<MergedSeries> {
        aggregate::merged_series(&self.dataset, &self.selection)
    }

    pub fn label(&self) -> Result<String> {
        label::selection_label(&self.dataset, &self.selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dataset::tests::{poscar_for, POSCAR_O2};
    use crate::parsers::doscar::tests::{synthetic_doscar, DOSCAR_2ATOMS_S};
    use std::fs;

    fn write_calc(dir: &Path, doscar: &str, poscar: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join("DOSCAR"), doscar).unwrap();
        fs::write(dir.join("POSCAR"), poscar).unwrap();
    }

    #[test]
    fn test_open_and_merge() {
        let tmp = tempfile::tempdir().unwrap();
        write_calc(tmp.path(), DOSCAR_2ATOMS_S, POSCAR_O2);

        let mut session = Session::open(tmp.path()).unwrap();
        assert_eq!(session.directory(), Some(tmp.path()));
        session.selection_mut().select_all_atoms();
        session.selection_mut().select_all_orbitals();

        let merged = session.merged_series().unwrap();
        assert!((merged.up[0] - 0.08).abs() < 1e-12);
        assert_eq!(session.label().unwrap(), "O1-2, s");
        assert_eq!(session.individual_series().unwrap().len(), 2);
    }

    #[test]
    fn test_reload_resets_selection() {
        let tmp = tempfile::tempdir().unwrap();
        let first = tmp.path().join("o2");
        let second = tmp.path().join("coo");
        write_calc(&first, DOSCAR_2ATOMS_S, POSCAR_O2);
        write_calc(&second, &synthetic_doscar(3, 4, 4), &poscar_for(&[("Co", 1), ("O", 2)]));

        let mut session = Session::open(&first).unwrap();
        session.selection_mut().select_atoms(&[1]).unwrap();

        session.load_directory(&second).unwrap();
        assert_eq!(session.dataset().number_of_atoms(), 3);
        assert_eq!(session.selection().dims(), (3, 4));
        assert!(session.selection().atoms().is_empty());
    }

    #[test]
    fn test_failed_reload_keeps_state() {
        let tmp = tempfile::tempdir().unwrap();
        let good = tmp.path().join("good");
        let bad = tmp.path().join("bad");
        write_calc(&good, DOSCAR_2ATOMS_S, POSCAR_O2);
        // 原子数不一致
        write_calc(&bad, DOSCAR_2ATOMS_S, &poscar_for(&[("O", 3)]));

        let mut session = Session::open(&good).unwrap();
        session.selection_mut().select_atoms(&[1]).unwrap();

        assert!(session.load_directory(&bad).is_err());
        assert_eq!(session.directory(), Some(good.as_path()));
        assert_eq!(session.selection().atoms(), vec![1]);
        assert_eq!(session.dataset().number_of_atoms(), 2);
    }
}
