//! Spreadsheet export

use crate::core::models::{ResolvedLink, Show};
use crate::error::LinksError;
use crate::export::{row_cells, ExportSink, HEADERS};
use crate::utils::{sanitize_show_name, unique_output_path};
use rust_xlsxwriter::{Format, Workbook};
use std::path::PathBuf;
use tracing::info;

/// Column widths matching the header order
const COLUMN_WIDTHS: [f64; 5] = [40.0, 60.0, 40.0, 60.0, 80.0];

/// Writes `<show name>.xlsx` into a directory, never overwriting a file
pub struct XlsxSink {
    dir: PathBuf,
}

impl XlsxSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path the next export for `show` would be written to
    pub fn target_path(&self, show: &Show) -> PathBuf {
        unique_output_path(&self.dir, &sanitize_show_name(&show.name), "xlsx")
    }
}

impl ExportSink for XlsxSink {
    fn export(&self, show: &Show, links: &[ResolvedLink]) -> Result<PathBuf, LinksError> {
        let path = self.target_path(show);

        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();
        let worksheet = workbook.add_worksheet();

        for (col, header) in HEADERS.iter().enumerate() {
            let col = col as u16;
            worksheet.write_string_with_format(0, col, *header, &bold)?;
            worksheet.set_column_width(col, COLUMN_WIDTHS[col as usize])?;
        }

        for (index, link) in links.iter().enumerate() {
            let row = index as u32 + 1;
            for (col, value) in row_cells(link).iter().enumerate() {
                if !value.is_empty() {
                    worksheet.write_string(row, col as u16, *value)?;
                }
            }
        }

        workbook.save(&path)?;
        info!("=> Saved {} rows to {}", links.len(), path.display());

        Ok(path)
    }
}
