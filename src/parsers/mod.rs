//! # 解析器模块
//!
//! VASP 输出文件解析器。
//!
//! ## 依赖关系
//! - 被 `models/dataset.rs` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: doscar, poscar

pub mod doscar;
pub mod poscar;

pub use doscar::{parse_doscar_content, parse_doscar_file, Doscar};
pub use poscar::{parse_poscar_content, parse_poscar_file, Poscar};
