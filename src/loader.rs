//! Corpus loading from delimited text files and spreadsheets.
//!
//! `.csv` is comma separated, `.tsv` is tab separated. `.xls`/`.xlsx` are read
//! from their first worksheet. All need a header row.
//! Columns are matched by name; other columns are ignored.

use std::{fs::File, io::Read, path::Path};

use calamine::{open_workbook_auto, Data, Reader};

use crate::{
    config::RecommenderConfig,
    document::{RawDocument, RawTable},
    error::{RecommendError, Result},
};

/// 入力ファイルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// 区切り文字付きテキスト
    Delimited(u8),
    /// xls / xlsx
    Workbook,
}

/// Pick the file format from the file extension (case-insensitive).
pub fn format_for(path: &Path) -> Result<FileFormat> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "csv" => Ok(FileFormat::Delimited(b',')),
        "tsv" => Ok(FileFormat::Delimited(b'\t')),
        "xls" | "xlsx" => Ok(FileFormat::Workbook),
        _ => Err(RecommendError::UnsupportedFormat { extension }),
    }
}

/// Read a corpus file into raw rows.
pub fn load_table<P: AsRef<Path>>(path: P, config: &RecommenderConfig) -> Result<RawTable> {
    let path = path.as_ref();
    let table = match format_for(path)? {
        FileFormat::Delimited(delimiter) => read_table(File::open(path)?, delimiter, config)?,
        FileFormat::Workbook => read_workbook(path, config)?,
    };
    tracing::info!(path = %path.display(), rows = table.len(), "loaded corpus file");
    Ok(table)
}

/// Position of a header by its trimmed name.
fn column_of<'h, I>(headers: I, name: &str) -> Result<usize>
where
    I: IntoIterator<Item = &'h str>,
{
    headers
        .into_iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| RecommendError::MissingColumn {
            column: name.to_string(),
        })
}

/// Read delimited rows from any reader.
///
/// Empty or missing cells become `None`.
pub fn read_table<R: Read>(reader: R, delimiter: u8, config: &RecommenderConfig) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let title_idx = column_of(headers.iter(), &config.title_column)?;
    let summary_idx = column_of(headers.iter(), &config.summary_column)?;

    let cell = |record: &csv::StringRecord, idx: usize| -> Option<String> {
        record
            .get(idx)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let mut table = RawTable::new();
    for record in reader.records() {
        let record = record?;
        table.push(RawDocument {
            title: cell(&record, title_idx),
            summary: cell(&record, summary_idx),
        });
    }
    Ok(table)
}

/// Spreadsheet cell -> text. Empty cells and "" become `None`.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Read the first worksheet of an `.xls`/`.xlsx` workbook.
///
/// The first row is the header row. Cells past the end of a row are `None`.
pub fn read_workbook(path: &Path, config: &RecommenderConfig) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(calamine::Error::Msg("workbook has no worksheet"))??;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(|c| cell_text(c).unwrap_or_default()).collect())
        .unwrap_or_default();
    let title_idx = column_of(headers.iter().map(String::as_str), &config.title_column)?;
    let summary_idx = column_of(headers.iter().map(String::as_str), &config.summary_column)?;

    let table = rows
        .map(|row| RawDocument {
            title: row.get(title_idx).and_then(cell_text),
            summary: row.get(summary_idx).and_then(cell_text),
        })
        .collect();
    Ok(table)
}
