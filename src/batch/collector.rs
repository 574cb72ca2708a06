//! # 计算目录收集器
//!
//! 在根目录下查找同时含有 `DOSCAR` 与 `POSCAR` 的目录。
//!
//! ## 功能
//! - glob 模式匹配目录名 (逗号分隔多模式)
//! - 默认只看根目录本身及其直接子目录，`recursive` 时遍历整棵树
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配名称

use doswave::error::{DosError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 计算目录必须包含的文件
const REQUIRED_FILES: [&str; 2] = ["DOSCAR", "POSCAR"];

/// 计算目录收集器
pub struct CalcDirCollector {
    /// 根目录
    root: PathBuf,
    /// 匹配模式列表
    patterns: Vec<glob::Pattern>,
    /// 是否递归
    recursive: bool,
}

impl CalcDirCollector {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            patterns: Vec::new(),
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != "*")
            .map(|p| {
                glob::Pattern::new(p).map_err(|e| {
                    DosError::InvalidArgument(format!("Invalid pattern '{}': {}", p, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self)
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的计算目录，按路径排序
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(DosError::DirectoryNotFound {
                path: self.root.display().to_string(),
            });
        }

        let walker = if self.recursive {
            WalkDir::new(&self.root)
        } else {
            WalkDir::new(&self.root).max_depth(1)
        };

        let mut dirs: Vec<PathBuf> = walker
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_dir())
            .filter(|e| is_calc_dir(e.path()))
            .filter(|e| self.matches_patterns(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        dirs.sort();
        Ok(dirs)
    }

    /// 根目录本身不参与名称过滤
    fn matches_patterns(&self, path: &Path) -> bool {
        if self.patterns.is_empty() || path == self.root {
            return true;
        }
        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => self.patterns.iter().any(|p| p.matches(name)),
            None => false,
        }
    }
}

fn is_calc_dir(path: &Path) -> bool {
    REQUIRED_FILES.iter().all(|f| path.join(f).is_file())
}

/// 由目录相对根目录的路径生成输出文件名，例如 `bulk/Co3O4` → `bulk_Co3O4_dos.csv`
pub fn output_name(root: &Path, dir: &Path, ext: &str) -> String {
    let parts: Vec<String> = dir
        .strip_prefix(root)
        .unwrap_or(dir)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .filter(|s| !s.is_empty() && s != ".")
        .collect();

    let stem = if parts.is_empty() {
        root.canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
            .unwrap_or_else(|| "root".to_string())
    } else {
        parts.join("_")
    };

    format!("{}_dos.{}", stem, ext)
}
