use std::path::Path;

use anyhow::{Context, Result};
use itertools::Itertools;

use entrank::rgf::{RgfCounter, RgfTable};
use entrank::table_file::{read_table_file, write_table_file};

pub(crate) fn run_table(len: usize, blocks: usize, out: &Path) -> Result<()> {
    let mut table = RgfTable::new(len, blocks);
    write_table_file(out, &table)
        .with_context(|| format!("failed to write {}", out.display()))?;
    println!(
        "Wrote {}x{} table ({} partitions) to {}",
        table.rows().len(),
        blocks + 2,
        table.total(),
        out.display()
    );
    Ok(())
}

pub(crate) fn run_show_table(path: &Path) -> Result<()> {
    let mut table =
        read_table_file(path).with_context(|| format!("failed to read {}", path.display()))?;
    println!(
        "RGF table: length {}, {} blocks, {} partitions",
        table.positions(),
        table.blocks(),
        table.total()
    );
    for (len, row) in table.rows().iter().enumerate() {
        println!("{len:>4}: {}", row.iter().join(" "));
    }
    Ok(())
}
