//! # 轨道与自旋数据模型
//!
//! 定义自旋分量、轨道类型以及显式的轨道分类表 (taxonomy)。
//!
//! 分类表由 DOSCAR 每原子数据块的列数推导得到，
//! 是 `(符号, 类型)` 的有序列表，不做任何前缀猜测。
//!
//! ## 依赖关系
//! - 被 `models/dataset.rs`, `selection.rs`, `label.rs` 使用
//! - 无外部模块依赖

use crate::error::{DosError, Result};
use serde::{Deserialize, Serialize};

/// 自旋分量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Spin {
    Up,
    Down,
}

impl Spin {
    pub const BOTH: [Spin; 2] = [Spin::Up, Spin::Down];

    /// 绘图时的符号约定：Down 取负，存储中永远是正值
    pub fn display_sign(self) -> f64 {
        match self {
            Spin::Up => 1.0,
            Spin::Down => -1.0,
        }
    }
}

impl std::fmt::Display for Spin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Spin::Up => write!(f, "up"),
            Spin::Down => write!(f, "down"),
        }
    }
}

/// 轨道角动量类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OrbitalType {
    S,
    P,
    D,
    F,
}

impl OrbitalType {
    pub const ALL: [OrbitalType; 4] = [OrbitalType::S, OrbitalType::P, OrbitalType::D, OrbitalType::F];

    pub fn letter(self) -> &'static str {
        match self {
            OrbitalType::S => "s",
            OrbitalType::P => "p",
            OrbitalType::D => "d",
            OrbitalType::F => "f",
        }
    }

    /// 该类型完整的 m 分量数 (2l + 1)
    pub fn full_count(self) -> usize {
        match self {
            OrbitalType::S => 1,
            OrbitalType::P => 3,
            OrbitalType::D => 5,
            OrbitalType::F => 7,
        }
    }

    /// VASP 的 lm 分解通道符号，按 DOSCAR 列顺序
    pub fn lm_symbols(self) -> &'static [&'static str] {
        match self {
            OrbitalType::S => &["s"],
            OrbitalType::P => &["py", "pz", "px"],
            OrbitalType::D => &["dxy", "dyz", "dz2", "dxz", "dx2-y2"],
            OrbitalType::F => &["fy3x2", "fxyz", "fyz2", "fz3", "fxz2", "fzx2", "fx3"],
        }
    }

    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "s" => Some(OrbitalType::S),
            "p" => Some(OrbitalType::P),
            "d" => Some(OrbitalType::D),
            "f" => Some(OrbitalType::F),
            _ => None,
        }
    }

    /// 查找符号对应的类型，同时返回其在本类型内的规范序号
    ///
    /// 只接受分类表中出现过的符号（lm 分解符号或单字母的 l 分解符号）。
    pub fn classify(symbol: &str) -> Option<(Self, usize)> {
        if let Some(t) = Self::from_letter(symbol) {
            return Some((t, 0));
        }
        Self::ALL.iter().find_map(|&t| {
            t.lm_symbols()
                .iter()
                .position(|s| *s == symbol)
                .map(|pos| (t, pos))
        })
    }
}

impl std::fmt::Display for OrbitalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// 单个轨道通道
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orbital {
    pub symbol: String,
    pub kind: OrbitalType,
}

impl Orbital {
    pub fn new(symbol: impl Into<String>, kind: OrbitalType) -> Self {
        Orbital {
            symbol: symbol.into(),
            kind,
        }
    }
}

/// 一个数据集中实际存在的轨道通道的有序列表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrbitalTaxonomy {
    channels: Vec<Orbital>,
}

impl OrbitalTaxonomy {
    /// 由显式通道表构造
    pub fn new(channels: Vec<Orbital>) -> Result<Self> {
        if channels.is_empty() {
            return Err(DosError::ConsistencyError(
                "orbital taxonomy must contain at least one channel".to_string(),
            ));
        }
        for (i, ch) in channels.iter().enumerate() {
            if channels[..i].iter().any(|c| c.symbol == ch.symbol) {
                return Err(DosError::ConsistencyError(format!(
                    "orbital channel '{}' listed twice",
                    ch.symbol
                )));
            }
        }
        Ok(OrbitalTaxonomy { channels })
    }

    /// 由 lm 分解的类型序列构造 (例如 s, p, d)
    pub fn lm_decomposed(types: &[OrbitalType]) -> Self {
        let channels = types
            .iter()
            .flat_map(|&t| t.lm_symbols().iter().map(move |s| Orbital::new(*s, t)))
            .collect();
        OrbitalTaxonomy { channels }
    }

    /// 由 l 分解的类型序列构造，每个类型只有一个通道
    pub fn l_decomposed(types: &[OrbitalType]) -> Self {
        let channels = types.iter().map(|&t| Orbital::new(t.letter(), t)).collect();
        OrbitalTaxonomy { channels }
    }

    /// 根据每自旋通道数推导分类表
    ///
    /// | 通道数 | 通道 |
    /// |---|---|
    /// | 1  | s |
    /// | 3  | s p d (l 分解) |
    /// | 4  | s py pz px |
    /// | 9  | s + p(3) + d(5) |
    /// | 16 | s + p(3) + d(5) + f(7) |
    pub fn from_channel_count(count: usize) -> Result<Self> {
        use OrbitalType::*;
        match count {
            1 => Ok(Self::lm_decomposed(&[S])),
            3 => Ok(Self::l_decomposed(&[S, P, D])),
            4 => Ok(Self::lm_decomposed(&[S, P])),
            9 => Ok(Self::lm_decomposed(&[S, P, D])),
            16 => Ok(Self::lm_decomposed(&[S, P, D, F])),
            n => Err(DosError::ConsistencyError(format!(
                "no orbital taxonomy with {} channels per spin (expected 1, 3, 4, 9 or 16)",
                n
            ))),
        }
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn channels(&self) -> &[Orbital] {
        &self.channels
    }

    pub fn get(&self, index: usize) -> Option<&Orbital> {
        self.channels.get(index)
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.symbol.as_str()).collect()
    }

    pub fn index_of(&self, symbol: &str) -> Option<usize> {
        self.channels.iter().position(|c| c.symbol == symbol)
    }

    /// 属于某类型的通道序号
    pub fn indices_of_type(&self, kind: OrbitalType) -> Vec<usize> {
        self.channels
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind == kind)
            .map(|(i, _)| i)
            .collect()
    }

    /// 数据集中出现的类型，按 s, p, d, f 排序
    pub fn types(&self) -> Vec<OrbitalType> {
        OrbitalType::ALL
            .iter()
            .copied()
            .filter(|&t| self.channels.iter().any(|c| c.kind == t))
            .collect()
    }

    /// 按类型分组的通道符号，保持规范顺序 (如 py, pz, px)
    pub fn grouped(&self) -> Vec<(OrbitalType, Vec<&str>)> {
        self.types()
            .into_iter()
            .map(|t| {
                let symbols = self
                    .channels
                    .iter()
                    .filter(|c| c.kind == t)
                    .map(|c| c.symbol.as_str())
                    .collect();
                (t, symbols)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_from_channel_count() {
        let t = OrbitalTaxonomy::from_channel_count(9).unwrap();
        assert_eq!(t.len(), 9);
        assert_eq!(
            t.symbols(),
            vec!["s", "py", "pz", "px", "dxy", "dyz", "dz2", "dxz", "dx2-y2"]
        );
        assert_eq!(t.types(), vec![OrbitalType::S, OrbitalType::P, OrbitalType::D]);

        let f = OrbitalTaxonomy::from_channel_count(16).unwrap();
        assert_eq!(f.indices_of_type(OrbitalType::F), (9..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_taxonomy_l_decomposed() {
        let t = OrbitalTaxonomy::from_channel_count(3).unwrap();
        assert_eq!(t.symbols(), vec!["s", "p", "d"]);
        assert_eq!(t.indices_of_type(OrbitalType::P), vec![1]);
    }

    #[test]
    fn test_taxonomy_unknown_count() {
        assert!(matches!(
            OrbitalTaxonomy::from_channel_count(5),
            Err(DosError::ConsistencyError(_))
        ));
        assert!(OrbitalTaxonomy::from_channel_count(0).is_err());
    }

    #[test]
    fn test_taxonomy_grouped_keeps_canonical_order() {
        let t = OrbitalTaxonomy::from_channel_count(4).unwrap();
        let grouped = t.grouped();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[1], (OrbitalType::P, vec!["py", "pz", "px"]));
    }

    #[test]
    fn test_taxonomy_rejects_duplicates() {
        let channels = vec![
            Orbital::new("s", OrbitalType::S),
            Orbital::new("s", OrbitalType::S),
        ];
        assert!(OrbitalTaxonomy::new(channels).is_err());
    }

    #[test]
    fn test_classify_symbol() {
        assert_eq!(OrbitalType::classify("pz"), Some((OrbitalType::P, 1)));
        assert_eq!(OrbitalType::classify("dx2-y2"), Some((OrbitalType::D, 4)));
        assert_eq!(OrbitalType::classify("d"), Some((OrbitalType::D, 0)));
        assert_eq!(OrbitalType::classify("q"), None);
    }

    #[test]
    fn test_spin_display_sign() {
        assert_eq!(Spin::Up.display_sign(), 1.0);
        assert_eq!(Spin::Down.display_sign(), -1.0);
    }
}
