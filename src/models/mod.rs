//! # 数据模型模块
//!
//! 定义 DOS 数据集、原子/元素分组与轨道分类。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `selection.rs`, `aggregate.rs`, `label.rs` 使用
//! - 子模块: dataset, orbital, structure

pub mod dataset;
pub mod orbital;
pub mod structure;

pub use dataset::{Dataset, SpinSeries};
pub use orbital::{Orbital, OrbitalTaxonomy, OrbitalType, Spin};
pub use structure::{AtomSite, Species};
