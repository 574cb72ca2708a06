//! # info 子命令实现
//!
//! 加载计算目录并列出能量网格、元素与轨道通道，
//! 便于在导出或绘图前确认可用的选择表达式。
//!
//! ## 依赖关系
//! - 使用 `cli/info.rs` 定义的参数
//! - 使用 `utils/output.rs`
//! - 使用 `tabled` 生成表格

use crate::cli::info::InfoArgs;
use crate::utils::output;
use doswave::error::Result;
use doswave::label::compress_range;
use doswave::Dataset;

use tabled::{Table, Tabled};

/// 元素表的一行
#[derive(Debug, Clone, Tabled)]
struct SpeciesRow {
    #[tabled(rename = "Element")]
    symbol: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Atoms (1-based)")]
    atoms: String,
}

/// 轨道表的一行
#[derive(Debug, Clone, Tabled)]
struct OrbitalRow {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Channels")]
    channels: String,
}

pub fn execute(args: InfoArgs) -> Result<()> {
    output::print_header("DOS Dataset Summary");

    let dataset = Dataset::load(&args.dir)?;
    output::print_success(&format!("Loaded '{}'", args.dir.display()));

    output::print_field("System", dataset.name());
    output::print_field("Atoms", &dataset.number_of_atoms().to_string());
    output::print_field("NEDOS", &dataset.nedos().to_string());
    output::print_field(
        "Energy range",
        &format!("{:.3} .. {:.3} eV", dataset.emin(), dataset.emax()),
    );
    output::print_field("Fermi level", &format!("{:.4} eV", dataset.efermi()));
    println!();

    println!("{}", Table::new(species_rows(&dataset)));
    println!();
    println!("{}", Table::new(orbital_rows(&dataset)));

    Ok(())
}

fn species_rows(dataset: &Dataset) -> Vec<SpeciesRow> {
    dataset
        .species()
        .iter()
        .map(|sp| {
            let numbers: Vec<u32> = sp.indices().map(|i| i as u32 + 1).collect();
            SpeciesRow {
                symbol: sp.symbol.clone(),
                count: sp.count,
                atoms: compress_range(&numbers).trim_end_matches(',').to_string(),
            }
        })
        .collect()
}

fn orbital_rows(dataset: &Dataset) -> Vec<OrbitalRow> {
    dataset
        .orbitals()
        .grouped()
        .into_iter()
        .map(|(kind, symbols)| OrbitalRow {
            kind: kind.to_string(),
            channels: symbols.join(" "),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::sample_dataset;

    #[test]
    fn test_species_rows() {
        let rows = species_rows(&sample_dataset());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].symbol, "Co");
        assert_eq!(rows[0].atoms, "1");
        assert_eq!(rows[1].atoms, "2-3");
    }

    #[test]
    fn test_orbital_rows() {
        let rows = orbital_rows(&sample_dataset());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].kind, "s");
        assert_eq!(rows[1].channels, "py pz px");
    }
}
