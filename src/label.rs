//! # 曲线标签压缩
//!
//! 把一组原子标签和轨道符号压缩成一条简短的图例文字，例如
//! `Co1-3, O1-3,5,10-11, s p`。
//!
//! ## 规则
//! 1. 原子标签按元素前缀分组，组内序号升序
//! 2. 连续序号写成 `a-b`，单个序号原样，逗号连接并以逗号结尾；
//!    超过 20 个字符时整组换成 `many atoms!,`
//! 3. 轨道按 s, p, d, f 顺序：某类型的通道齐全时写类型字母，
//!    否则按规范顺序列出各通道
//! 4. 原子段在前，轨道段在后，空格连接
//!
//! ## 依赖关系
//! - 被命令行的导出、绘图命令使用
//! - 使用 `models/structure.rs`, `models/orbital.rs`

use crate::error::{DosError, Result};
use crate::models::structure::split_label;
use crate::models::{Dataset, OrbitalType};
use crate::selection::Selection;
use std::collections::{BTreeMap, BTreeSet};

/// 单个元素组压缩结果的长度上限
pub const MAX_RANGE_LEN: usize = 20;

/// 超出长度上限时的替代文字
pub const MANY_ATOMS: &str = "many atoms!,";

/// 压缩升序整数列表，例如 `[1,2,3,5,10,11]` → `1-3,5,10-11,`
pub fn compress_range(numbers: &[u32]) -> String {
    let mut sorted = numbers.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut runs: Vec<String> = Vec::new();
    let mut i = 0;
    while i < sorted.len() {
        let start = sorted[i];
        while i + 1 < sorted.len() && sorted[i + 1] == sorted[i] + 1 {
            i += 1;
        }
        let end = sorted[i];
        if start == end {
            runs.push(start.to_string());
        } else {
            runs.push(format!("{}-{}", start, end));
        }
        i += 1;
    }

    let compressed = format!("{},", runs.join(","));
    if compressed.len() > MAX_RANGE_LEN {
        MANY_ATOMS.to_string()
    } else {
        compressed
    }
}

/// 由轨道符号和原子标签生成图例文字
///
/// 输入视为集合：顺序与重复都不影响结果。
pub fn compress_label<S, T>(orbital_symbols: &[S], atom_labels: &[T]) -> Result<String>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let mut segments = atom_segments(atom_labels)?;
    segments.extend(orbital_segments(orbital_symbols)?);
    Ok(segments.join(" "))
}

/// 当前选择的图例文字
pub fn selection_label(dataset: &Dataset, selection: &Selection) -> Result<String> {
    selection.ensure_matches(dataset)?;
    compress_label(
        &selection.orbital_symbols(dataset),
        &selection.atom_labels(dataset),
    )
}

fn atom_segments<T: AsRef<str>>(atom_labels: &[T]) -> Result<Vec<String>> {
    // BTreeMap 保证元素组按符号字母序排列
    let mut groups: BTreeMap<&str, Vec<u32>> = BTreeMap::new();
    for label in atom_labels {
        let label = label.as_ref();
        let (symbol, number) = split_label(label).ok_or_else(|| {
            DosError::ConsistencyError(format!(
                "'{}' is not an atom label of the form <symbol><number>",
                label
            ))
        })?;
        groups.entry(symbol).or_default().push(number);
    }

    Ok(groups
        .into_iter()
        .map(|(symbol, numbers)| {
            let range = compress_range(&numbers);
            if range == MANY_ATOMS {
                format!("{} {}", symbol, range)
            } else {
                format!("{}{}", symbol, range)
            }
        })
        .collect())
}

fn orbital_segments<S: AsRef<str>>(orbital_symbols: &[S]) -> Result<Vec<String>> {
    let mut present: BTreeMap<OrbitalType, BTreeSet<(usize, &str)>> = BTreeMap::new();
    for symbol in orbital_symbols {
        let symbol = symbol.as_ref();
        let (kind, order) = OrbitalType::classify(symbol).ok_or_else(|| {
            DosError::ConsistencyError(format!("unknown orbital channel '{}'", symbol))
        })?;
        present.entry(kind).or_default().insert((order, symbol));
    }

    let mut segments = Vec::new();
    for (kind, symbols) in present {
        // 单字母符号已覆盖该类型的全部通道
        let coarse = symbols.iter().any(|(_, s)| *s == kind.letter());
        let lm_count = symbols.len() - usize::from(coarse);
        if coarse || lm_count == kind.full_count() {
            segments.push(kind.letter().to_string());
        } else {
            segments.extend(symbols.into_iter().map(|(_, s)| s.to_string()));
        }
    }
    Ok(segments)
}
