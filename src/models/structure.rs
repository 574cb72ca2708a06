//! # 原子与元素数据模型
//!
//! 由 POSCAR 的元素行和原子数行得到的原子位点与元素分组。
//!
//! ## 依赖关系
//! - 被 `parsers/poscar.rs`, `models/dataset.rs`, `label.rs` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};

/// 原子位点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomSite {
    /// 全局序号 (0 起)
    pub index: usize,

    /// 元素符号
    pub element: String,

    /// 元素内序号 (1 起)
    pub number: usize,
}

impl AtomSite {
    pub fn new(index: usize, element: impl Into<String>, number: usize) -> Self {
        AtomSite {
            index,
            element: element.into(),
            number,
        }
    }

    /// 显示标签，例如 `O1`, `Co3`
    pub fn label(&self) -> String {
        format!("{}{}", self.element, self.number)
    }
}

/// 元素分组：同种元素的原子在 POSCAR 中连续排列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub symbol: String,
    pub count: usize,

    /// 该元素第一个原子的全局序号
    pub first_index: usize,
}

impl Species {
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.first_index..self.first_index + self.count
    }
}

/// 把 `Co12` 拆成 (`Co`, 12)
///
/// 前缀取最长的字母串，其余部分必须全是数字。
pub fn split_label(label: &str) -> Option<(&str, u32)> {
    let split = label
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(label.len());
    let (symbol, digits) = label.split_at(split);
    if symbol.is_empty() || digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(|n| (symbol, n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom_label() {
        let atom = AtomSite::new(4, "Co", 2);
        assert_eq!(atom.label(), "Co2");
    }

    #[test]
    fn test_species_indices() {
        let sp = Species {
            symbol: "O".to_string(),
            count: 3,
            first_index: 2,
        };
        assert_eq!(sp.indices().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_split_label_longest_alpha_prefix() {
        assert_eq!(split_label("Co12"), Some(("Co", 12)));
        assert_eq!(split_label("C3"), Some(("C", 3)));
        assert_eq!(split_label("O"), None);
        assert_eq!(split_label("12"), None);
        assert_eq!(split_label("O1a"), None);
    }
}
