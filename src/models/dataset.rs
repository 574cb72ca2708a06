//! # DOS 数据集
//!
//! 把 DOSCAR 与 POSCAR 的解析结果交叉校验后组装成一个只读的数据集。
//! 数据集一次构建、不可变；加载新目录时整体替换。
//!
//! ## 依赖关系
//! - 被 `selection.rs`, `aggregate.rs`, `label.rs`, `session.rs` 使用
//! - 使用 `parsers/doscar.rs`, `parsers/poscar.rs`, `models/orbital.rs`

use crate::error::{DosError, Result, SelectionTarget};
use crate::models::{AtomSite, OrbitalTaxonomy, OrbitalType, Species, Spin};
use crate::parsers::doscar::{self, Doscar};
use crate::parsers::poscar::{self, Poscar};
use std::path::Path;

/// 一对自旋分量的数值序列，均以正值存储
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpinSeries {
    pub up: Vec<f64>,
    pub down: Vec<f64>,
}

impl SpinSeries {
    pub fn with_capacity(n: usize) -> Self {
        SpinSeries {
            up: Vec::with_capacity(n),
            down: Vec::with_capacity(n),
        }
    }

    pub fn zeros(n: usize) -> Self {
        SpinSeries {
            up: vec![0.0; n],
            down: vec![0.0; n],
        }
    }

    pub fn get(&self, spin: Spin) -> &[f64] {
        match spin {
            Spin::Up => &self.up,
            Spin::Down => &self.down,
        }
    }

    pub fn len(&self) -> usize {
        self.up.len()
    }

    pub fn is_empty(&self) -> bool {
        self.up.is_empty()
    }

    /// 逐点累加另一组序列
    pub fn accumulate(&mut self, other: &SpinSeries) {
        for (a, b) in self.up.iter_mut().zip(other.up.iter()) {
            *a += b;
        }
        for (a, b) in self.down.iter_mut().zip(other.down.iter()) {
            *a += b;
        }
    }
}

/// 一个计算目录的完整 DOS 数据
#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    energies: Vec<f64>,
    total: SpinSeries,
    series: Vec<Vec<SpinSeries>>,
    efermi: f64,
    emin: f64,
    emax: f64,
    atoms: Vec<AtomSite>,
    species: Vec<Species>,
    orbitals: OrbitalTaxonomy,
}

impl Dataset {
    /// 从计算目录读取 `DOSCAR` 与 `POSCAR`
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(DosError::DirectoryNotFound {
                path: dir.display().to_string(),
            });
        }

        let doscar_path = dir.join("DOSCAR");
        let poscar_path = dir.join("POSCAR");
        for path in [&doscar_path, &poscar_path] {
            if !path.is_file() {
                return Err(DosError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
        }

        let doscar = doscar::parse_doscar_file(&doscar_path)?;
        let poscar = poscar::parse_poscar_file(&poscar_path)?;
        Self::assemble(doscar, poscar, None)
    }

    /// 从两段文本内容构建
    pub fn from_contents(doscar_text: &str, poscar_text: &str) -> Result<Self> {
        let doscar = doscar::parse_doscar_content(doscar_text, "DOSCAR")?;
        let poscar = poscar::parse_poscar_content(poscar_text, "POSCAR")?;
        Self::assemble(doscar, poscar, None)
    }

    /// 交叉校验并组装
    ///
    /// `taxonomy` 为 `None` 时由通道数推导分类表。
    pub fn assemble(
        doscar: Doscar,
        poscar: Poscar,
        taxonomy: Option<OrbitalTaxonomy>,
    ) -> Result<Self> {
        if doscar.number_of_atoms != poscar.number_of_atoms() {
            return Err(DosError::ConsistencyError(format!(
                "DOSCAR lists {} atoms but POSCAR declares {}",
                doscar.number_of_atoms,
                poscar.number_of_atoms()
            )));
        }
        if doscar.atoms.len() != doscar.number_of_atoms {
            return Err(DosError::ConsistencyError(format!(
                "DOSCAR header lists {} atoms but {} atom blocks were read",
                doscar.number_of_atoms,
                doscar.atoms.len()
            )));
        }

        let orbitals = match taxonomy {
            Some(t) if t.len() != doscar.channel_count => {
                return Err(DosError::ConsistencyError(format!(
                    "configured orbital taxonomy has {} channels but DOSCAR has {} per spin",
                    t.len(),
                    doscar.channel_count
                )))
            }
            Some(t) => t,
            None => OrbitalTaxonomy::from_channel_count(doscar.channel_count)?,
        };

        let nedos = doscar.energies.len();
        let shape_ok = doscar.total.len() == nedos
            && doscar.atoms.iter().all(|atom| {
                atom.len() == orbitals.len()
                    && atom
                        .iter()
                        .all(|s| s.up.len() == nedos && s.down.len() == nedos)
            });
        if !shape_ok {
            return Err(DosError::ConsistencyError(
                "projected DOS series do not match the energy axis".to_string(),
            ));
        }

        Ok(Dataset {
            name: poscar.name.clone(),
            energies: doscar.energies,
            total: doscar.total,
            series: doscar.atoms,
            efermi: doscar.efermi,
            emin: doscar.emin,
            emax: doscar.emax,
            atoms: poscar.atoms(),
            species: poscar.species(),
            orbitals,
        })
    }

    // ─────────────────────────────────────────────────────────────
    // 只读访问
    // ─────────────────────────────────────────────────────────────

    /// POSCAR 注释行
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    /// 以费米能为零点的能量轴
    pub fn energies_relative_to_fermi(&self) -> Vec<f64> {
        self.energies.iter().map(|e| e - self.efermi).collect()
    }

    pub fn nedos(&self) -> usize {
        self.energies.len()
    }

    pub fn efermi(&self) -> f64 {
        self.efermi
    }

    pub fn emin(&self) -> f64 {
        self.emin
    }

    pub fn emax(&self) -> f64 {
        self.emax
    }

    pub fn total(&self, spin: Spin) -> &[f64] {
        self.total.get(spin)
    }

    pub fn total_series(&self) -> &SpinSeries {
        &self.total
    }

    /// 某原子某轨道的两个自旋分量
    pub fn channel(&self, atom: usize, orbital: usize) -> Result<&SpinSeries> {
        let channels = self.series.get(atom).ok_or(DosError::IndexError {
            target: SelectionTarget::Atom,
            index: atom,
            len: self.series.len(),
        })?;
        channels.get(orbital).ok_or(DosError::IndexError {
            target: SelectionTarget::Orbital,
            index: orbital,
            len: channels.len(),
        })
    }

    /// `series[atom][orbital][spin]`
    pub fn series(&self, atom: usize, orbital: usize, spin: Spin) -> Result<&[f64]> {
        Ok(self.channel(atom, orbital)?.get(spin))
    }

    pub fn number_of_atoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn atoms(&self) -> &[AtomSite] {
        &self.atoms
    }

    pub fn atom_labels(&self) -> Vec<String> {
        self.atoms.iter().map(|a| a.label()).collect()
    }

    /// 按显示标签查找原子序号
    pub fn atom_index(&self, label: &str) -> Option<usize> {
        self.atoms.iter().position(|a| a.label() == label)
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn species_symbols(&self) -> Vec<&str> {
        self.species.iter().map(|s| s.symbol.as_str()).collect()
    }

    pub fn find_species(&self, symbol: &str) -> Option<&Species> {
        self.species.iter().find(|s| s.symbol == symbol)
    }

    pub fn orbitals(&self) -> &OrbitalTaxonomy {
        &self.orbitals
    }

    pub fn orbital_symbols(&self) -> Vec<&str> {
        self.orbitals.symbols()
    }

    pub fn orbital_types(&self) -> Vec<OrbitalType> {
        self.orbitals.types()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::parsers::doscar::tests::{synthetic_doscar, DOSCAR_2ATOMS_S};

    pub(crate) const POSCAR_O2: &str = "O2 molecule\n1.0\n10 0 0\n0 10 0\n0 0 10\nO\n2\nDirect\n0 0 0\n0 0 0.12\n";

    pub(crate) fn poscar_for(symbols: &[(&str, usize)]) -> String {
        let names: Vec<&str> = symbols.iter().map(|(s, _)| *s).collect();
        let counts: Vec<String> = symbols.iter().map(|(_, n)| n.to_string()).collect();
        format!(
            "test\n1.0\n1 0 0\n0 1 0\n0 0 1\n{}\n{}\nDirect\n",
            names.join(" "),
            counts.join(" ")
        )
    }

    /// O2 + Co3，每原子 s/p/d 共 9 个通道，NEDOS = 5
    pub(crate) fn co_oxide() -> Dataset {
        Dataset::from_contents(
            &synthetic_doscar(5, 5, 9),
            &poscar_for(&[("O", 2), ("Co", 3)]),
        )
        .unwrap()
    }

    #[test]
    fn test_assemble_o2() {
        let ds = Dataset::from_contents(DOSCAR_2ATOMS_S, POSCAR_O2).unwrap();
        assert_eq!(ds.name(), "O2 molecule");
        assert_eq!(ds.number_of_atoms(), 2);
        assert_eq!(ds.nedos(), 3);
        assert_eq!(ds.efermi(), 1.5);
        assert_eq!(ds.atom_labels(), vec!["O1", "O2"]);
        assert_eq!(ds.orbital_symbols(), vec!["s"]);
        assert_eq!(ds.series(1, 0, Spin::Up).unwrap(), &[0.07, 0.09, 0.11]);
        assert_eq!(ds.total(Spin::Down), &[0.2, 0.4, 0.6]);
    }

    #[test]
    fn test_shape_matches_poscar() {
        let ds = co_oxide();
        assert_eq!(ds.number_of_atoms(), 5);
        assert_eq!(ds.species_symbols(), vec!["O", "Co"]);
        for atom in 0..ds.number_of_atoms() {
            for orb in 0..ds.orbitals().len() {
                for spin in Spin::BOTH {
                    assert_eq!(ds.series(atom, orb, spin).unwrap().len(), ds.nedos());
                }
            }
        }
    }

    #[test]
    fn test_atom_count_mismatch() {
        let err = Dataset::from_contents(DOSCAR_2ATOMS_S, &poscar_for(&[("O", 3)])).unwrap_err();
        assert!(matches!(err, DosError::ConsistencyError(_)));
    }

    #[test]
    fn test_unknown_channel_count() {
        let err =
            Dataset::from_contents(&synthetic_doscar(1, 3, 2), &poscar_for(&[("H", 1)])).unwrap_err();
        assert!(matches!(err, DosError::ConsistencyError(_)));
    }

    #[test]
    fn test_configured_taxonomy_must_match() {
        let doscar = doscar::parse_doscar_content(&synthetic_doscar(1, 3, 4), "DOSCAR").unwrap();
        let poscar = poscar::parse_poscar_content(&poscar_for(&[("C", 1)]), "POSCAR").unwrap();

        let wrong = OrbitalTaxonomy::lm_decomposed(&[OrbitalType::S, OrbitalType::P, OrbitalType::D]);
        let err = Dataset::assemble(doscar.clone(), poscar.clone(), Some(wrong)).unwrap_err();
        assert!(matches!(err, DosError::ConsistencyError(_)));

        // 4 个通道也可以显式声明为 l 分解的 s p d f
        let spdf = OrbitalTaxonomy::l_decomposed(&OrbitalType::ALL);
        let ds = Dataset::assemble(doscar, poscar, Some(spdf)).unwrap();
        assert_eq!(ds.orbital_symbols(), vec!["s", "p", "d", "f"]);
    }

    #[test]
    fn test_series_index_error() {
        let ds = Dataset::from_contents(DOSCAR_2ATOMS_S, POSCAR_O2).unwrap();
        assert!(matches!(
            ds.series(2, 0, Spin::Up),
            Err(DosError::IndexError {
                target: SelectionTarget::Atom,
                ..
            })
        ));
        assert!(matches!(
            ds.series(0, 1, Spin::Up),
            Err(DosError::IndexError {
                target: SelectionTarget::Orbital,
                ..
            })
        ));
    }

    #[test]
    fn test_relative_energies_and_lookup() {
        let ds = Dataset::from_contents(DOSCAR_2ATOMS_S, POSCAR_O2).unwrap();
        assert_eq!(ds.energies_relative_to_fermi(), vec![-6.5, -1.5, 3.5]);
        assert_eq!(ds.atom_index("O2"), Some(1));
        assert_eq!(ds.atom_index("O3"), None);
        assert_eq!(ds.find_species("O").map(|s| s.count), Some(2));
    }

    #[test]
    fn test_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("DOSCAR"), DOSCAR_2ATOMS_S).unwrap();

        let err = Dataset::load(dir.path()).unwrap_err();
        assert!(matches!(err, DosError::FileNotFound { .. }));

        std::fs::write(dir.path().join("POSCAR"), POSCAR_O2).unwrap();
        let ds = Dataset::load(dir.path()).unwrap();
        assert_eq!(ds.number_of_atoms(), 2);

        let missing = dir.path().join("nope");
        assert!(matches!(
            Dataset::load(&missing),
            Err(DosError::DirectoryNotFound { .. })
        ));
    }
}
