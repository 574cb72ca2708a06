//! # doswave - VASP 投影态密度浏览核心
//!
//! 解析 `DOSCAR` 与 `POSCAR`，维护原子/轨道选择，
//! 按需计算单独或合并的自旋分辨 DOS 曲线，并生成简短的图例标签。
//!
//! 核心库不做任何输出与绘图，界面层 (本仓库中为命令行) 通过这里的接口取数。
//!
//! ## 依赖关系
//! ```text
//! lib.rs
//!   ├── parsers/    (DOSCAR / POSCAR 解析)
//!   ├── models/     (数据集、原子、轨道分类)
//!   ├── selection   (选择状态)
//!   ├── aggregate   (单独/合并曲线)
//!   ├── label       (标签压缩)
//!   ├── session     (数据集 + 选择)
//!   └── error       (错误处理)
//! ```

pub mod aggregate;
pub mod error;
pub mod label;
pub mod models;
pub mod parsers;
pub mod selection;
pub mod session;

pub use aggregate::{individual_series, merge_pairs, merged_series, ChannelSeries, MergedSeries};
pub use error::{DosError, Result, SelectionTarget};
pub use label::{compress_label, compress_range, selection_label};
pub use models::{AtomSite, Dataset, Orbital, OrbitalTaxonomy, OrbitalType, Species, Spin, SpinSeries};
pub use selection::Selection;
pub use session::Session;
