//! # export 子命令 CLI 定义
//!
//! 把选中的曲线连同能量轴写成表格文件。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/export.rs`

use super::SelectionArgs;
use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};

/// 导出文件格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values with a header row
    Csv,
    /// Whitespace-separated columns with '#' comment header
    Dat,
}

impl ExportFormat {
    /// 由文件扩展名推断，默认 CSV
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .as_deref()
        {
            Some("dat") | Some("txt") | Some("xy") => ExportFormat::Dat,
            _ => ExportFormat::Csv,
        }
    }
}

/// export 子命令参数
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Calculation directory containing DOSCAR and POSCAR
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    #[command(flatten)]
    pub select: SelectionArgs,

    /// Output file
    #[arg(short, long, default_value = "dos.csv")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Write spin-down values as negative numbers
    #[arg(long, default_value_t = false)]
    pub signed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("a.csv")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("a.DAT")), ExportFormat::Dat);
        assert_eq!(ExportFormat::from_path(Path::new("dos")), ExportFormat::Csv);
    }
}
