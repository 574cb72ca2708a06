//! # batch 子命令实现
//!
//! 在目录树中查找计算目录，对每个目录应用相同的选择表达式，
//! 并行地导出 CSV 或绘制 PNG / SVG。
//!
//! ## 功能
//! - 目录名 glob 过滤，可递归
//! - 并行处理（rayon）
//! - 已存在的输出默认跳过
//! - 汇总成功、跳过、失败数量
//!
//! ## 依赖关系
//! - 使用 `cli/batch.rs` 定义的 BatchArgs
//! - 使用 `batch/` 模块收集目录与并行执行
//! - 使用 `render/` 模块输出

use super::select::build_selection;
use crate::batch::collector::output_name;
use crate::batch::{BatchRunner, CalcDirCollector, ProcessResult};
use crate::cli::batch::{BatchArgs, BatchFormat};
use crate::render::plot::{generate_dos_plot, PlotOptions};
use crate::render::{self, DosView, ViewOptions};
use crate::utils::output;
use doswave::error::{DosError, Result};
use doswave::Dataset;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// 批量处理配置，在工作线程间共享
struct BatchDosConfig {
    root: PathBuf,
    output_dir: PathBuf,
    atoms: String,
    orbitals: String,
    view: ViewOptions,
    format: BatchFormat,
    overwrite: bool,
}

pub fn execute(args: BatchArgs) -> Result<()> {
    output::print_header("Batch DOS Processing");

    let dirs = CalcDirCollector::new(args.root.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect()?;

    if dirs.is_empty() {
        output::print_warning(&format!(
            "No directories with DOSCAR and POSCAR found under '{}' (pattern '{}')",
            args.root.display(),
            args.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} calculation directories", dirs.len()));
    check_output_names(&args.root, &dirs, args.format.extension())?;
    output::print_info(&format!("Output format: {:?}", args.format));

    fs::create_dir_all(&args.output).map_err(|e| DosError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let config = BatchDosConfig {
        root: args.root.clone(),
        output_dir: args.output.clone(),
        atoms: args.select.atoms.clone(),
        orbitals: args.select.orbitals.clone(),
        view: args.select.view_options(),
        format: args.format,
        overwrite: args.overwrite,
    };

    let runner = BatchRunner::new(args.jobs);
    let result = runner.run(dirs, |dir| process_dir(dir, &config))?;

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} success, {} skipped, {} failed",
        result.success, result.skipped, result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed directories:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 不同目录展平后不能得到同一个输出文件名 (如 `a/b` 与 `a_b`)
fn check_output_names(root: &Path, dirs: &[PathBuf], ext: &str) -> Result<()> {
    let mut owners: BTreeMap<String, Vec<&PathBuf>> = BTreeMap::new();
    for dir in dirs {
        owners.entry(output_name(root, dir, ext)).or_default().push(dir);
    }

    let clashes: Vec<String> = owners
        .into_iter()
        .filter(|(_, dirs)| dirs.len() > 1)
        .map(|(name, dirs)| {
            let paths: Vec<String> = dirs.iter().map(|d| d.display().to_string()).collect();
            format!("'{}' <- {}", name, paths.join(", "))
        })
        .collect();

    if clashes.is_empty() {
        Ok(())
    } else {
        Err(DosError::InvalidArgument(format!(
            "calculation directories map to the same output file: {}",
            clashes.join("; ")
        )))
    }
}

/// 处理批量模式中的单个目录
fn process_dir(dir: &PathBuf, config: &BatchDosConfig) -> ProcessResult {
    let name = output_name(&config.root, dir, config.format.extension());
    let output_file = config.output_dir.join(name);

    if output_file.exists() && !config.overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            output_file.display()
        ));
    }

    match render_dir(dir, &output_file, config) {
        Ok(()) => ProcessResult::Success(format!("{} -> {}", dir.display(), output_file.display())),
        Err(e) => ProcessResult::Failed(dir.display().to_string(), e.to_string()),
    }
}

fn render_dir(dir: &Path, output_file: &Path, config: &BatchDosConfig) -> Result<()> {
    let dataset = Dataset::load(dir)?;
    let selection = build_selection(&dataset, &config.atoms, &config.orbitals)?;
    let view = DosView::build(&dataset, &selection, config.view)?;

    match config.format {
        BatchFormat::Csv => render::export::to_csv(&view, output_file, false),
        BatchFormat::Png | BatchFormat::Svg => {
            let options = PlotOptions {
                use_svg: config.format == BatchFormat::Svg,
                ..Default::default()
            };
            generate_dos_plot(&view, output_file, &options)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSCAR: &str = "NiO\n1.0\n4 0 0\n0 4 0\n0 0 4\nNi O\n1 1\nDirect\n";

    fn doscar() -> String {
        let header = "  4.0  -4.0  2  0.5  1.0\n";
        let mut s = String::from("  2  2  1  0\n 0 0 0 0 0\n 1.0e-04\n  CAR\n NiO\n");
        s.push_str(header);
        s.push_str(" -1.0 1.0 1.0 0.0 0.0\n  1.0 2.0 2.0 0.0 0.0\n");
        for _ in 0..2 {
            s.push_str(header);
            s.push_str(" -1.0 0.1 0.2\n  1.0 0.3 0.4\n");
        }
        s
    }

    fn config(root: &Path, out: &Path, overwrite: bool) -> BatchDosConfig {
        BatchDosConfig {
            root: root.to_path_buf(),
            output_dir: out.to_path_buf(),
            atoms: "all".to_string(),
            orbitals: "all".to_string(),
            view: ViewOptions {
                merged: true,
                ..Default::default()
            },
            format: BatchFormat::Csv,
            overwrite,
        }
    }

    #[test]
    fn test_process_dir_writes_and_skips() {
        let tmp = tempfile::tempdir().unwrap();
        let calc = tmp.path().join("runs").join("NiO");
        let out = tmp.path().join("out");
        fs::create_dir_all(&calc).unwrap();
        fs::create_dir_all(&out).unwrap();
        fs::write(calc.join("DOSCAR"), doscar()).unwrap();
        fs::write(calc.join("POSCAR"), POSCAR).unwrap();

        let root = tmp.path().join("runs");
        let cfg = config(&root, &out, false);
        assert!(matches!(process_dir(&calc, &cfg), ProcessResult::Success(_)));

        let csv = fs::read_to_string(out.join("NiO_dos.csv")).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "energy,\"Ni1, O1, s up\",\"Ni1, O1, s down\"");
        assert_eq!(lines[2], "1.00000,0.600000,0.800000");

        assert!(matches!(process_dir(&calc, &cfg), ProcessResult::Skipped(_)));
        let cfg = config(&root, &out, true);
        assert!(matches!(process_dir(&calc, &cfg), ProcessResult::Success(_)));
    }

    #[test]
    fn test_flattened_name_clash_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        for dir in [root.join("x").join("y"), root.join("x_y"), root.join("z")] {
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("DOSCAR"), doscar()).unwrap();
            fs::write(dir.join("POSCAR"), POSCAR).unwrap();
        }

        let dirs = CalcDirCollector::new(root.to_path_buf())
            .recursive(true)
            .collect()
            .unwrap();
        assert_eq!(dirs.len(), 3);

        match check_output_names(root, &dirs, "csv") {
            Err(DosError::InvalidArgument(msg)) => {
                assert!(msg.contains("x_y_dos.csv"));
                assert!(!msg.contains("z_dos.csv"));
            }
            other => panic!("expected InvalidArgument, got {:?}", other),
        }

        let distinct = vec![root.join("x").join("y"), root.join("z")];
        assert!(check_output_names(root, &distinct, "csv").is_ok());
    }

    #[test]
    fn test_process_dir_reports_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let calc = tmp.path().join("broken");
        fs::create_dir_all(&calc).unwrap();
        fs::write(calc.join("DOSCAR"), "garbage\n").unwrap();
        fs::write(calc.join("POSCAR"), POSCAR).unwrap();

        let cfg = config(tmp.path(), tmp.path(), false);
        match process_dir(&calc, &cfg) {
            ProcessResult::Failed(path, err) => {
                assert!(path.ends_with("broken"));
                assert!(err.contains("Malformed"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
