//! # 统一错误处理模块
//!
//! 定义 doswave 的所有错误类型，使用 `thiserror` 派生。
//!
//! 数据加载阶段的错误（格式、数值解析、一致性）会中止整个 Dataset 的构建；
//! 选择与聚合阶段的错误只在触发它的调用处返回，不会破坏已有的选择状态。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// 选择操作所针对的集合
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTarget {
    Atom,
    Orbital,
    /// 显式给出的 (原子, 轨道) 对
    Pair,
}

impl std::fmt::Display for SelectionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionTarget::Atom => write!(f, "atom"),
            SelectionTarget::Orbital => write!(f, "orbital"),
            SelectionTarget::Pair => write!(f, "atom-orbital pair"),
        }
    }
}

/// doswave 统一错误类型
#[derive(Error, Debug)]
pub enum DosError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 文件解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Malformed {file}: {reason}")]
    FormatError { file: String, reason: String },

    #[error("Failed to parse {file} at line {line}: '{token}' is not a number")]
    ParseError {
        file: String,
        line: usize,
        token: String,
    },

    #[error("Inconsistent data: {0}")]
    ConsistencyError(String),

    // ─────────────────────────────────────────────────────────────
    // 选择与聚合错误
    // ─────────────────────────────────────────────────────────────
    #[error("{target} index {index} out of range (valid: 0..{len})")]
    IndexError {
        target: SelectionTarget,
        index: usize,
        len: usize,
    },

    #[error("Cannot merge DOS: no {target}s selected")]
    EmptySelection { target: SelectionTarget },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid range format: {0}")]
    InvalidRange(String),

    // ─────────────────────────────────────────────────────────────
    // 输出错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plotting failed: {0}")]
    PlotError(String),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

impl DosError {
    pub(crate) fn format(file: &str, reason: impl Into<String>) -> Self {
        DosError::FormatError {
            file: file.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, DosError>;
