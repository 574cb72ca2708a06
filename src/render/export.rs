//! # DOS 数据导出
//!
//! 把 `DosView` 写成 CSV 或空白分隔的 DAT 文本。
//!
//! ## 支持格式
//! - CSV: 第一列能量，之后每条曲线一列，列名形如 `O1 s up`
//! - DAT: `#` 注释头 + 制表符分隔的数值，便于 gnuplot / xmgrace 读取
//!
//! 默认导出存储值 (均为正)，`signed = true` 时 Down 分量取负。
//!
//! ## 依赖关系
//! - 被 `commands/export.rs`, `commands/batch.rs` 调用
//! - 使用 `csv` 库写入 CSV 文件

use super::DosView;
use doswave::error::{DosError, Result};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn value(view: &DosView, curve: usize, row: usize, signed: bool) -> f64 {
    let c = &view.curves[curve];
    if signed {
        c.signed_value(row)
    } else {
        c.values[row]
    }
}

/// 导出为 CSV
pub fn to_csv(view: &DosView, output_path: &Path, signed: bool) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    let mut header = vec!["energy".to_string()];
    header.extend(view.curves.iter().map(|c| c.column_name()));
    wtr.write_record(&header)?;

    for (row, energy) in view.energies.iter().enumerate() {
        let mut record = Vec::with_capacity(view.curves.len() + 1);
        record.push(format!("{:.5}", energy));
        for curve in 0..view.curves.len() {
            record.push(format!("{:.6}", value(view, curve, row, signed)));
        }
        wtr.write_record(&record)?;
    }

    wtr.flush().map_err(|e| DosError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出为空白分隔的 DAT 文本
pub fn to_dat(view: &DosView, output_path: &Path, signed: bool) -> Result<()> {
    let write_err = |e: std::io::Error| DosError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let file = File::create(output_path).map_err(write_err)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "# DOS: {}", view.title).map_err(write_err)?;
    writeln!(out, "# Fermi level: {:.5} eV", view.fermi).map_err(write_err)?;
    writeln!(out, "# Columns:").map_err(write_err)?;
    writeln!(out, "#   1: energy (eV)").map_err(write_err)?;
    for (i, curve) in view.curves.iter().enumerate() {
        writeln!(out, "#   {}: {}", i + 2, curve.column_name()).map_err(write_err)?;
    }

    for (row, energy) in view.energies.iter().enumerate() {
        write!(out, "{:12.5}", energy).map_err(write_err)?;
        for curve in 0..view.curves.len() {
            write!(out, "\t{:.6}", value(view, curve, row, signed)).map_err(write_err)?;
        }
        writeln!(out).map_err(write_err)?;
    }

    out.flush().map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::sample_dataset;
    use crate::render::ViewOptions;
    use doswave::Selection;
    use std::fs;

    fn single_channel_view() -> DosView {
        let ds = sample_dataset();
        let mut sel = Selection::new(&ds);
        sel.select_atoms(&[0]).unwrap();
        sel.select_orbitals(&[0]).unwrap();
        DosView::build(&ds, &sel, ViewOptions::default()).unwrap()
    }

    #[test]
    fn test_csv_header_and_rows() {
        let view = single_channel_view();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dos.csv");
        to_csv(&view, &path, false).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "energy,Co1 s up,Co1 s down");
        assert_eq!(lines.len(), 1 + view.energies.len());
        assert_eq!(lines[1], "-3.00000,0.000000,0.050000");
    }

    #[test]
    fn test_csv_signed_down() {
        let view = single_channel_view();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signed.csv");
        to_csv(&view, &path, true).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let second = text.lines().nth(1).unwrap();
        assert_eq!(second, "-3.00000,0.000000,-0.050000");
    }

    #[test]
    fn test_dat_layout() {
        let view = single_channel_view();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dos.dat");
        to_dat(&view, &path, false).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# DOS: CoO2 test"));
        assert!(text.contains("#   3: Co1 s down"));
        let data: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(data.len(), 4);
        let cols: Vec<&str> = data[3].split_whitespace().collect();
        assert_eq!(cols, vec!["3.00000", "0.030000", "0.080000"]);
    }
}
