//! # 选择表达式解析
//!
//! 把命令行的原子/轨道选择字符串转换为 `Selection`。
//!
//! ## 原子表达式 (逗号分隔)
//! - `all`: 全部原子
//! - `3`, `1-4`: 1 起的原子序号或闭区间
//! - `O`, `Co`: 整个元素
//! - `Co2`, `O1-3`: 显示标签或同元素的标签区间
//!
//! ## 轨道表达式 (逗号分隔)
//! - `all`: 全部通道
//! - `s`, `p`, `d`, `f`: 某类型的全部通道
//! - `dxy`, `pz`, ...: 单个通道符号
//!
//! 任何一项无效时整个表达式报错，不返回部分选择。
//!
//! ## 依赖关系
//! - 被 `commands/export.rs`, `commands/plot.rs`, `commands/batch.rs` 使用
//! - 使用 `regex` 匹配各项

use doswave::error::{DosError, Result, SelectionTarget};
use doswave::{Dataset, OrbitalType, Selection};
use regex::Regex;

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| DosError::Other(format!("Invalid selector pattern '{}': {}", pattern, e)))
}

fn parse_bound(token: &str, text: &str) -> Result<usize> {
    token
        .parse::<usize>()
        .map_err(|_| DosError::InvalidRange(format!("'{}' in '{}'", token, text)))
}

/// 解析 `a` 或 `a-b`，返回闭区间
fn parse_span(start: &str, end: Option<&str>, text: &str) -> Result<(usize, usize)> {
    let start = parse_bound(start, text)?;
    let end = match end {
        Some(e) => parse_bound(e, text)?,
        None => start,
    };
    if start == 0 || end < start {
        return Err(DosError::InvalidRange(format!(
            "'{}' (numbers start at 1, ranges must be ascending)",
            text
        )));
    }
    Ok((start, end))
}

fn tokens(spec: &str) -> impl Iterator<Item = &str> {
    spec.split(',').map(str::trim).filter(|t| !t.is_empty())
}

/// 由原子与轨道表达式构建选择
pub fn build_selection(dataset: &Dataset, atoms: &str, orbitals: &str) -> Result<Selection> {
    let mut selection = Selection::new(dataset);
    apply_atoms(dataset, &mut selection, atoms)?;
    apply_orbitals(dataset, &mut selection, orbitals)?;
    Ok(selection)
}

fn apply_atoms(dataset: &Dataset, selection: &mut Selection, spec: &str) -> Result<()> {
    let index_re = compile(r"^(\d+)(?:-(\d+))?$")?;
    let label_re = compile(r"^([A-Za-z]+)(\d+)(?:-(\d+))?$")?;
    let species_re = compile(r"^[A-Za-z]+$")?;

    for token in tokens(spec) {
        if token.eq_ignore_ascii_case("all") {
            selection.select_all_atoms();
        } else if let Some(caps) = index_re.captures(token) {
            let (start, end) = parse_span(&caps[1], caps.get(2).map(|m| m.as_str()), token)?;
            // 先检查上界再展开区间
            let n_atoms = dataset.number_of_atoms();
            if end > n_atoms {
                return Err(DosError::IndexError {
                    target: SelectionTarget::Atom,
                    index: end - 1,
                    len: n_atoms,
                });
            }
            let indices: Vec<usize> = (start - 1..end).collect();
            selection.select_atoms(&indices)?;
        } else if let Some(caps) = label_re.captures(token) {
            let symbol = &caps[1];
            let (start, end) = parse_span(&caps[2], caps.get(3).map(|m| m.as_str()), token)?;
            let indices = (start..=end)
                .map(|n| {
                    let label = format!("{}{}", symbol, n);
                    dataset.atom_index(&label).ok_or_else(|| {
                        DosError::InvalidArgument(format!("no atom labelled '{}'", label))
                    })
                })
                .collect::<Result<Vec<usize>>>()?;
            selection.select_atoms(&indices)?;
        } else if species_re.is_match(token) {
            selection.select_by_species(dataset, token)?;
        } else {
            return Err(DosError::InvalidArgument(format!(
                "cannot parse atom selector '{}'",
                token
            )));
        }
    }
    Ok(())
}

fn apply_orbitals(dataset: &Dataset, selection: &mut Selection, spec: &str) -> Result<()> {
    for token in tokens(spec) {
        if token.eq_ignore_ascii_case("all") {
            selection.select_all_orbitals();
        } else if let Some(kind) = OrbitalType::from_letter(token) {
            selection.select_by_orbital_type(dataset, kind)?;
        } else if let Some(index) = dataset.orbitals().index_of(token) {
            selection.select_orbitals(&[index])?;
        } else {
            return Err(DosError::InvalidArgument(format!(
                "unknown orbital '{}' (available: {})",
                token,
                dataset.orbital_symbols().join(" ")
            )));
        }
    }
    Ok(())
}
