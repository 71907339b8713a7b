use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::catalog::MatchSelection;
use crate::combine::CombinedRow;

pub fn export_file_name(selection: &MatchSelection) -> String {
    format!(
        "goal_intervals_{}_vs_{}.xlsx",
        file_safe(&selection.home),
        file_safe(&selection.away)
    )
}

/// Writes the interval rows to `<dir>/<export_file_name>` and returns the path.
pub fn export_profile(
    dir: &Path,
    selection: &MatchSelection,
    rows: &[CombinedRow],
) -> Result<PathBuf> {
    let path = dir.join(export_file_name(selection));

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Intervals")?;
        write_interval_rows(sheet, selection, rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Match")?;
        let info = [
            ["Match ID".to_string(), selection.id.to_string()],
            ["Date".to_string(), selection.date.format("%Y-%m-%d").to_string()],
            ["Home".to_string(), selection.home.clone()],
            ["Away".to_string(), selection.away.clone()],
            [
                "Note".to_string(),
                "Conceded columns are placeholder values, not statistics".to_string(),
            ],
        ];
        for (row_idx, row) in info.iter().enumerate() {
            for (col_idx, value) in row.iter().enumerate() {
                sheet
                    .write_string(row_idx as u32, col_idx as u16, value)
                    .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
            }
        }
    }

    workbook
        .save(&path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    Ok(path)
}

fn write_interval_rows(
    sheet: &mut Worksheet,
    selection: &MatchSelection,
    rows: &[CombinedRow],
) -> Result<()> {
    let header = [
        "Interval".to_string(),
        format!("{} Scored", selection.home),
        format!("{} Conceded (placeholder)", selection.home),
        format!("{} Scored", selection.away),
        format!("{} Conceded (placeholder)", selection.away),
    ];
    for (col_idx, value) in header.iter().enumerate() {
        sheet
            .write_string(0, col_idx as u16, value)
            .with_context(|| format!("write header ({col_idx})"))?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let r = idx as u32 + 1;
        sheet
            .write_string(r, 0, row.interval)
            .with_context(|| format!("write interval ({r})"))?;
        let values = [
            row.scored_home,
            row.conceded_home,
            row.scored_away,
            row.conceded_away,
        ];
        for (offset, value) in values.into_iter().enumerate() {
            let col = offset as u16 + 1;
            sheet
                .write_number(r, col, value)
                .with_context(|| format!("write cell ({r},{col})"))?;
        }
    }
    Ok(())
}

fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
