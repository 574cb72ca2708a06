//! # VASP POSCAR 格式解析器
//!
//! 只读取 POSCAR 中的元素分类信息：元素符号行和原子数行。
//!
//! ## POSCAR 格式说明
//! ```text
//! Comment line (structure name)
//! 1.0                    # scaling factor
//! a1 a2 a3               # lattice vector a
//! b1 b2 b3               # lattice vector b
//! c1 c2 c3               # lattice vector c
//! Element1 Element2 ...  # element symbols (VASP 5+)
//! n1 n2 ...              # number of atoms per element
//! Selective dynamics     # optional
//! Direct/Cartesian       # coordinate type
//! x1 y1 z1               # atom positions
//! ...
//! ```
//!
//! 元素行必须存在 (VASP 4 格式无法给出元素符号，视为格式错误)。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs`, `models/dataset.rs` 使用
//! - 使用 `models/structure.rs`

use crate::error::{DosError, Result};
use crate::models::{AtomSite, Species};
use std::fs;
use std::path::Path;

/// POSCAR 中的元素分类信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poscar {
    /// 注释行 (通常是体系名称)
    pub name: String,
    symbols: Vec<String>,
    counts: Vec<usize>,
}

impl Poscar {
    /// 总原子数
    pub fn number_of_atoms(&self) -> usize {
        self.counts.iter().sum()
    }

    /// 元素符号，按声明顺序
    pub fn atomic_symbols(&self) -> &[String] {
        &self.symbols
    }

    /// 每种元素的原子数，与 `atomic_symbols` 平行
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// 逐原子展开的元素符号序列
    pub fn list_atomic_symbols(&self) -> Vec<String> {
        self.symbols
            .iter()
            .zip(self.counts.iter())
            .flat_map(|(s, &n)| std::iter::repeat(s.clone()).take(n))
            .collect()
    }

    /// 逐原子显示标签，例如 `O1, O2, Co1, Co2, Co3`
    pub fn symbol_and_number(&self) -> Vec<String> {
        self.atoms().iter().map(|a| a.label()).collect()
    }

    /// 逐原子位点
    pub fn atoms(&self) -> Vec<AtomSite> {
        let mut atoms = Vec::with_capacity(self.number_of_atoms());
        for (symbol, &count) in self.symbols.iter().zip(self.counts.iter()) {
            for number in 1..=count {
                atoms.push(AtomSite::new(atoms.len(), symbol.clone(), number));
            }
        }
        atoms
    }

    /// 元素分组
    pub fn species(&self) -> Vec<Species> {
        let mut first_index = 0;
        self.symbols
            .iter()
            .zip(self.counts.iter())
            .map(|(symbol, &count)| {
                let sp = Species {
                    symbol: symbol.clone(),
                    count,
                    first_index,
                };
                first_index += count;
                sp
            })
            .collect()
    }
}

/// 解析 POSCAR/CONTCAR 文件
pub fn parse_poscar_file(path: &Path) -> Result<Poscar> {
    let content = fs::read_to_string(path).map_err(|e| DosError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_poscar_content(&content, &path.display().to_string())
}

/// 从字符串内容解析 POSCAR 格式
///
/// `file` 仅用于错误信息。
pub fn parse_poscar_content(content: &str, file: &str) -> Result<Poscar> {
    let lines: Vec<&str> = content.lines().collect();

    if lines.len() < 7 {
        return Err(DosError::format(
            file,
            format!(
                "file too short ({} lines), expected element and count lines at lines 6-7",
                lines.len()
            ),
        ));
    }

    let name = lines[0].trim().to_string();

    // Line 5: Element symbols
    let symbols: Vec<String> = lines[5].split_whitespace().map(|s| s.to_string()).collect();
    if symbols.is_empty() {
        return Err(DosError::format(file, "empty element symbol line (line 6)"));
    }
    for (i, symbol) in symbols.iter().enumerate() {
        if !symbol.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DosError::format(
                file,
                format!("'{}' is not an element symbol (line 6)", symbol),
            ));
        }
        if symbols[..i].contains(symbol) {
            return Err(DosError::format(
                file,
                format!("element '{}' declared more than once (line 6)", symbol),
            ));
        }
    }

    // Line 6: Atom counts
    let counts: Vec<usize> = lines[6]
        .split_whitespace()
        .map(|tok| match tok.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(DosError::format(
                file,
                format!("'{}' is not a positive atom count (line 7)", tok),
            )),
        })
        .collect::<Result<_>>()?;

    if counts.len() != symbols.len() {
        return Err(DosError::format(
            file,
            format!(
                "{} element symbols but {} atom counts",
                symbols.len(),
                counts.len()
            ),
        ));
    }

    Ok(Poscar {
        name,
        symbols,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const CO3O4: &str = r#"Co3O4 slab
1.0
8.08 0.0 0.0
0.0 8.08 0.0
0.0 0.0 20.0
O Co
2 3
Direct
0.0 0.0 0.0
0.5 0.5 0.0
0.5 0.0 0.5
0.0 0.5 0.5
0.5 0.0 0.0
"#;

    #[test]
    fn test_parse_poscar_taxonomy() {
        let poscar = parse_poscar_content(CO3O4, "POSCAR").unwrap();
        assert_eq!(poscar.name, "Co3O4 slab");
        assert_eq!(poscar.atomic_symbols(), &["O".to_string(), "Co".to_string()]);
        assert_eq!(poscar.counts(), &[2, 3]);
        assert_eq!(poscar.number_of_atoms(), 5);
        assert_eq!(
            poscar.symbol_and_number(),
            vec!["O1", "O2", "Co1", "Co2", "Co3"]
        );
        assert_eq!(
            poscar.list_atomic_symbols(),
            vec!["O", "O", "Co", "Co", "Co"]
        );
    }

    #[test]
    fn test_count_invariant_and_unique_labels() {
        let content = "big\n1.0\n1 0 0\n0 1 0\n0 0 1\nC Co Ce O\n3 12 1 40\nDirect\n";
        let poscar = parse_poscar_content(content, "POSCAR").unwrap();
        let labels = poscar.symbol_and_number();

        assert_eq!(poscar.number_of_atoms(), poscar.counts().iter().sum::<usize>());
        assert_eq!(poscar.number_of_atoms(), labels.len());

        let unique: HashSet<&String> = labels.iter().collect();
        assert_eq!(unique.len(), labels.len());
        assert_eq!(labels[3], "Co1");
        assert_eq!(labels[15], "Ce1");
    }

    #[test]
    fn test_species_groups() {
        let poscar = parse_poscar_content(CO3O4, "POSCAR").unwrap();
        let species = poscar.species();
        assert_eq!(species[1].symbol, "Co");
        assert_eq!(species[1].first_index, 2);
        assert_eq!(species[1].indices().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_reject_vasp4_counts_only() {
        let content = "old\n1.0\n1 0 0\n0 1 0\n0 0 1\n2 3\nDirect\n";
        let err = parse_poscar_content(content, "POSCAR").unwrap_err();
        assert!(matches!(err, DosError::FormatError { .. }));
    }

    #[test]
    fn test_reject_bad_counts() {
        let zero = "x\n1.0\n1 0 0\n0 1 0\n0 0 1\nO Co\n2 0\n";
        assert!(matches!(
            parse_poscar_content(zero, "POSCAR"),
            Err(DosError::FormatError { .. })
        ));

        let mismatch = "x\n1.0\n1 0 0\n0 1 0\n0 0 1\nO Co\n2\n";
        assert!(matches!(
            parse_poscar_content(mismatch, "POSCAR"),
            Err(DosError::FormatError { .. })
        ));

        let word = "x\n1.0\n1 0 0\n0 1 0\n0 0 1\nO\ntwo\n";
        assert!(matches!(
            parse_poscar_content(word, "POSCAR"),
            Err(DosError::FormatError { .. })
        ));
    }

    #[test]
    fn test_reject_repeated_species() {
        let content = "x\n1.0\n1 0 0\n0 1 0\n0 0 1\nO Co O\n1 1 1\n";
        assert!(matches!(
            parse_poscar_content(content, "POSCAR"),
            Err(DosError::FormatError { .. })
        ));
    }

    #[test]
    fn test_reject_short_file() {
        assert!(parse_poscar_content("x\n1.0\n", "POSCAR").is_err());
    }
}
