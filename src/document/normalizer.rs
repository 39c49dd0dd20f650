use std::collections::HashSet;

use serde::Serialize;

use crate::document::{Document, DocumentTable, RawTable};

/// What `normalize` changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    /// null titles replaced with ""
    pub filled_titles: usize,
    /// null summaries replaced with ""
    pub filled_summaries: usize,
    pub duplicates_removed: usize,
    /// rows dropped because title or summary was ""
    pub blank_removed: usize,
}

/// Raw rows -> Document Table
///
/// 1. null を "" に置き換える
/// 2. (title, summary) の完全一致で重複を除く (最初の行を残す)
/// 3. title か summary が空文字の行を除く (空白だけの値は残す)
///
/// 行の相対順は保たれる。失敗しない (空のテーブルになり得る)。
pub fn normalize(raw: RawTable) -> (DocumentTable, NormalizeReport) {
    let mut report = NormalizeReport::default();

    let filled: Vec<Document> = raw
        .into_iter()
        .map(|row| {
            let title = row.title.unwrap_or_else(|| {
                report.filled_titles += 1;
                String::new()
            });
            let summary = row.summary.unwrap_or_else(|| {
                report.filled_summaries += 1;
                String::new()
            });
            Document { title, summary }
        })
        .collect();

    let mut seen: HashSet<(String, String)> = HashSet::with_capacity(filled.len());
    let mut docs = Vec::with_capacity(filled.len());
    for doc in filled {
        if !seen.insert((doc.title.clone(), doc.summary.clone())) {
            report.duplicates_removed += 1;
            continue;
        }
        docs.push(doc);
    }

    let before = docs.len();
    docs.retain(|d| !d.title.is_empty() && !d.summary.is_empty());
    report.blank_removed = before - docs.len();

    tracing::info!(
        filled_titles = report.filled_titles,
        filled_summaries = report.filled_summaries,
        duplicates_removed = report.duplicates_removed,
        blank_removed = report.blank_removed,
        documents = docs.len(),
        "normalized corpus"
    );

    (DocumentTable::new(docs), report)
}
