use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use itertools::Itertools;
use rust_xlsxwriter::{Format, Workbook};
use tracing::info;

use crate::model::{Cell, ProductRow, COLUMNS};

/// `<date> <platform> SOS.xlsx`
pub fn output_file_name(date: &str, platform: &str) -> String {
    format!("{} {} SOS.xlsx", date, platform)
}

/// Drop exact-duplicate rows, keeping the first occurrence in place.
pub fn dedup_rows(rows: Vec<ProductRow>) -> Vec<ProductRow> {
    rows.into_iter().unique().collect()
}

/// Deduplicate and write the run's rows. Returns the file path and rows written.
pub fn write_report(
    rows: Vec<ProductRow>,
    output_dir: &Path,
    date: &str,
    platform: &str,
) -> Result<(PathBuf, usize)> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", output_dir))?;

    let total = rows.len();
    let rows = dedup_rows(rows);
    if rows.len() < total {
        info!("Dropped {} duplicate rows", total - rows.len());
    }

    let path = output_dir.join(output_file_name(date, platform));
    write_workbook(&rows, &path)?;
    info!("Wrote {} rows to {:?}", rows.len(), path);
    Ok((path, rows.len()))
}

fn write_workbook(rows: &[ProductRow], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &bold)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        for (col, cell) in row.cells().into_iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => sheet.write_string(r, col, text)?,
                Cell::Number(n) => sheet.write_number(r, col, n)?,
            };
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to write workbook {:?}", path))?;
    Ok(())
}
