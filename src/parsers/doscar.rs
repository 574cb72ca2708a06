//! # VASP DOSCAR 格式解析器
//!
//! 解析自旋极化的 DOSCAR：总态密度 + 每原子、每轨道、每自旋的投影态密度。
//!
//! ## DOSCAR 格式说明
//! ```text
//! NIONS NIONS JOBPAR NCDIJ        # line 1, 第一个数为原子数
//! ...                             # lines 2-5, 忽略
//! EMAX EMIN NEDOS EFERMI 1.0      # line 6, 总 DOS 块头
//! E up down int_up int_down       # NEDOS 行总 DOS
//! EMAX EMIN NEDOS EFERMI 1.0      # 原子 1 块头
//! E ch0_up ch0_down ch1_up ...    # NEDOS 行，每通道 up/down 交替
//! ...                             # 依次为每个原子
//! ```
//!
//! 每个块都是 `NEDOS + 1` 行：一行块头加 `NEDOS` 行数据。
//! 每原子数据行的列数必须是 `1 + 2K`，K 为轨道通道数，
//! 列顺序固定为按通道交替的 up/down。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs`, `models/dataset.rs` 使用
//! - 使用 `models/dataset.rs` 的 SpinSeries

use crate::error::{DosError, Result};
use crate::models::SpinSeries;
use std::fs;
use std::path::Path;

/// 块头行在文件中的位置 (0 起)
const HEADER_LINE: usize = 5;

/// DOSCAR 解析结果
#[derive(Debug, Clone, PartialEq)]
pub struct Doscar {
    pub number_of_atoms: usize,
    pub emax: f64,
    pub emin: f64,
    pub nedos: usize,
    pub efermi: f64,

    /// 能量轴 (取自总 DOS 块)
    pub energies: Vec<f64>,

    /// 总 DOS
    pub total: SpinSeries,

    /// 投影 DOS: `atoms[原子][通道]`
    pub atoms: Vec<Vec<SpinSeries>>,

    /// 每自旋的轨道通道数 K
    pub channel_count: usize,
}

/// 解析 DOSCAR 文件
pub fn parse_doscar_file(path: &Path) -> Result<Doscar> {
    let content = fs::read_to_string(path).map_err(|e| DosError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_doscar_content(&content, &path.display().to_string())
}

/// 从字符串内容解析 DOSCAR 格式
///
/// `file` 仅用于错误信息。
pub fn parse_doscar_content(content: &str, file: &str) -> Result<Doscar> {
    let lines: Vec<&str> = content.lines().collect();

    // Line 0: 原子数
    let number_of_atoms = lines
        .first()
        .and_then(|l| l.split_whitespace().next())
        .ok_or_else(|| DosError::format(file, "missing atom count on line 1"))?;
    let number_of_atoms: usize = match number_of_atoms.parse() {
        Ok(n) if n >= 1 => n,
        _ => {
            return Err(DosError::format(
                file,
                format!("'{}' is not a valid atom count (line 1)", number_of_atoms),
            ))
        }
    };

    // Line 5: EMAX EMIN NEDOS EFERMI
    let header = lines
        .get(HEADER_LINE)
        .ok_or_else(|| DosError::format(file, "missing energy header on line 6"))?;
    let tokens: Vec<&str> = header.split_whitespace().collect();
    if tokens.len() < 4 {
        return Err(DosError::format(
            file,
            format!(
                "energy header on line 6 has {} fields, expected EMAX EMIN NEDOS EFERMI",
                tokens.len()
            ),
        ));
    }
    let header_lineno = HEADER_LINE + 1;
    let emax = parse_number(tokens[0], file, header_lineno)?;
    let emin = parse_number(tokens[1], file, header_lineno)?;
    let nedos: usize = match tokens[2].parse() {
        Ok(n) if n >= 1 => n,
        _ => {
            return Err(DosError::format(
                file,
                format!("'{}' is not a valid NEDOS (line 6)", tokens[2]),
            ))
        }
    };
    let efermi = parse_number(tokens[3], file, header_lineno)?;

    let block_len = nedos + 1;

    // Block 0: 总 DOS
    let total_rows = read_block(&lines, 0, nedos, file)?;
    let mut energies = Vec::with_capacity(nedos);
    let mut total = SpinSeries::with_capacity(nedos);
    for (lineno, row) in &total_rows {
        if row.len() < 3 {
            return Err(DosError::format(
                file,
                format!(
                    "total DOS row at line {} has {} columns, expected at least 3",
                    lineno,
                    row.len()
                ),
            ));
        }
        energies.push(row[0]);
        total.up.push(row[1]);
        total.down.push(row[2]);
    }

    // Blocks 1..N: 每原子投影 DOS
    let mut channel_count: Option<usize> = None;
    let mut atoms = Vec::with_capacity(number_of_atoms);
    for block in 1..=number_of_atoms {
        check_block_header(&lines, block, nedos, file)?;
        let rows = read_block(&lines, block, nedos, file)?;

        let k = match channel_count {
            Some(k) => k,
            None => {
                let (lineno, first) = &rows[0];
                let k = channels_from_columns(first.len()).ok_or_else(|| {
                    DosError::format(
                        file,
                        format!(
                            "projected DOS row at line {} has {} columns, expected 1 + 2*K",
                            lineno,
                            first.len()
                        ),
                    )
                })?;
                channel_count = Some(k);
                k
            }
        };

        let mut channels = vec![SpinSeries::with_capacity(nedos); k];
        for (lineno, row) in &rows {
            if row.len() != 1 + 2 * k {
                return Err(DosError::format(
                    file,
                    format!(
                        "projected DOS row at line {} has {} columns, expected {} ({} channels per spin)",
                        lineno,
                        row.len(),
                        1 + 2 * k,
                        k
                    ),
                ));
            }
            // 能量列与总 DOS 重复，丢弃
            for (ch, pair) in row[1..].chunks_exact(2).enumerate() {
                channels[ch].up.push(pair[0]);
                channels[ch].down.push(pair[1]);
            }
        }
        atoms.push(channels);
    }

    // 最后一个块之后只允许空行
    let end = HEADER_LINE + (number_of_atoms + 1) * block_len;
    if let Some((i, _)) = lines
        .iter()
        .enumerate()
        .skip(end)
        .find(|(_, l)| !l.trim().is_empty())
    {
        return Err(DosError::format(
            file,
            format!(
                "unexpected data at line {} after {} atom blocks",
                i + 1,
                number_of_atoms
            ),
        ));
    }

    Ok(Doscar {
        number_of_atoms,
        emax,
        emin,
        nedos,
        efermi,
        energies,
        total,
        atoms,
        channel_count: channel_count.unwrap_or(0),
    })
}

/// 由列数推出通道数 K：列数必须是 `1 + 2K` 且 K ≥ 1
fn channels_from_columns(columns: usize) -> Option<usize> {
    if columns >= 3 && (columns - 1) % 2 == 0 {
        Some((columns - 1) / 2)
    } else {
        None
    }
}

/// 校验每原子块头：第三个字段必须等于 NEDOS，否则块边界错位
fn check_block_header(lines: &[&str], block: usize, nedos: usize, file: &str) -> Result<()> {
    let idx = HEADER_LINE + block * (nedos + 1);
    let header = lines.get(idx).ok_or_else(|| {
        DosError::format(
            file,
            format!("missing header of atom block {} (line {})", block, idx + 1),
        )
    })?;

    let nedos_field = header.split_whitespace().nth(2);
    if nedos_field.and_then(|t| t.parse::<usize>().ok()) != Some(nedos) {
        return Err(DosError::format(
            file,
            format!(
                "line {} should be the header of atom block {} with NEDOS = {}",
                idx + 1,
                block,
                nedos
            ),
        ));
    }
    Ok(())
}

/// 读取一个块的 NEDOS 行数据 (跳过块头)，返回 (行号, 数值)
fn read_block(
    lines: &[&str],
    block: usize,
    nedos: usize,
    file: &str,
) -> Result<Vec<(usize, Vec<f64>)>> {
    let start = HEADER_LINE + block * (nedos + 1) + 1;
    let available = lines.len().saturating_sub(start).min(nedos);
    if available < nedos {
        let what = if block == 0 {
            "total DOS block".to_string()
        } else {
            format!("atom block {}", block)
        };
        return Err(DosError::format(
            file,
            format!("{} has {} rows, expected NEDOS = {}", what, available, nedos),
        ));
    }

    lines[start..start + nedos]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let lineno = start + i + 1;
            let row = line
                .split_whitespace()
                .map(|tok| parse_number(tok, file, lineno))
                .collect::<Result<Vec<f64>>>()?;
            Ok((lineno, row))
        })
        .collect()
}

fn parse_number(token: &str, file: &str, line: usize) -> Result<f64> {
    token.parse().map_err(|_| DosError::ParseError {
        file: file.to_string(),
        line,
        token: token.to_string(),
    })
}
