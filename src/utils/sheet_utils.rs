//! Batch sheet utilities
//!
//! The batch command drives the splicer from a CSV sheet. Each row names a
//! slide (full path, or file name resolved against a slide directory) and
//! optionally carries the QR payload and label text lines.

use std::path::{Path, PathBuf};

use log::warn;

use crate::svs::pixels::LabelParams;
use crate::tiff::errors::{TiffError, TiffResult};

/// Sheet column that carries the QR payload
pub const QR_COLUMN: &str = "QR";
/// Sheet columns that carry label text lines
pub const LINE_COLUMNS: [&str; 3] = ["line1", "line2", "line3"];
/// Label text longer than this is unlikely to fit on the printed label
const MAX_LABEL_TEXT: usize = 25;

/// One row of the batch sheet, resolved to a slide path and label parameters
#[derive(Debug)]
pub struct SheetRow {
    pub slide_path: PathBuf,
    pub params: LabelParams,
}

/// Reads a CSV sheet into batch rows
///
/// `header` names the column holding slide names or paths. When
/// `slide_dir` is given, each entry is treated as a file name (".svs"
/// appended when the extension is missing) inside that directory.
pub fn read_sheet(
    sheet_path: &str,
    header: &str,
    slide_dir: Option<&str>,
) -> TiffResult<Vec<SheetRow>> {
    let extension = Path::new(sheet_path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");
    if !extension.eq_ignore_ascii_case("csv") {
        return Err(TiffError::InvalidParameter(format!(
            "only CSV sheets are supported, got '{}'",
            sheet_path
        )));
    }

    let mut reader = csv::Reader::from_path(sheet_path).map_err(|e| {
        TiffError::InvalidParameter(format!("cannot read sheet '{}': {}", sheet_path, e))
    })?;

    let headers = reader
        .headers()
        .map_err(|e| TiffError::InvalidParameter(format!("malformed sheet header: {}", e)))?
        .clone();

    let slide_column = headers.iter().position(|name| name == header).ok_or_else(|| {
        TiffError::InvalidParameter(format!("sheet has no '{}' column", header))
    })?;
    let qr_column = headers.iter().position(|name| name == QR_COLUMN);
    let line_columns: Vec<Option<usize>> = LINE_COLUMNS
        .iter()
        .map(|line| headers.iter().position(|name| name == *line))
        .collect();

    let mut rows = Vec::new();
    for (row_number, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            TiffError::InvalidParameter(format!("malformed sheet row {}: {}", row_number + 2, e))
        })?;

        let slide_cell = record.get(slide_column).unwrap_or("").trim();
        if slide_cell.is_empty() {
            warn!("Sheet row {} has an empty '{}' cell, skipping", row_number + 2, header);
            continue;
        }

        let mut params = LabelParams::default();
        params.qr_text = qr_column
            .and_then(|column| record.get(column))
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);
        for (slot, column) in line_columns.iter().enumerate() {
            let text = column
                .and_then(|column| record.get(column))
                .map(str::trim)
                .filter(|text| !text.is_empty());
            if let Some(text) = text {
                if text.len() >= MAX_LABEL_TEXT {
                    warn!("Warning: \"{}\" may not fit on label", text);
                }
                params.lines[slot] = Some(text.to_string());
            }
        }

        rows.push(SheetRow {
            slide_path: resolve_slide_path(slide_cell, slide_dir),
            params,
        });
    }

    Ok(rows)
}

/// Resolves a sheet cell to a slide path
fn resolve_slide_path(cell: &str, slide_dir: Option<&str>) -> PathBuf {
    let slide = Path::new(cell);
    match slide_dir {
        Some(dir) => {
            let name = match slide.file_name() {
                Some(name) => name.to_os_string(),
                None => slide.as_os_str().to_os_string(),
            };
            let mut resolved = PathBuf::from(name);
            if resolved.extension().map(|ext| ext != "svs").unwrap_or(true) {
                let mut with_ext = resolved.into_os_string();
                with_ext.push(".svs");
                resolved = PathBuf::from(with_ext);
            }
            Path::new(dir).join(resolved)
        }
        None => slide.to_path_buf(),
    }
}
