//! Header projection: row 0 names the columns of every following row

use crate::dialect::Dialect;
use crate::parser::parse;
use crate::table::{Mapping, Table};
use std::collections::HashSet;
use tracing::warn;

/// Treat the first row as a header and key every remaining row by it.
///
/// Ragged rows are tolerated: a short row simply lacks the trailing keys and
/// a long row has its extra fields dropped. A repeated header name keeps its
/// first position but takes the value of its last occurrence.
pub fn project(table: Table) -> Vec<Mapping> {
    let mut rows = table.into_iter();
    let header = match rows.next() {
        Some(header) => header,
        None => return Vec::new(),
    };

    let mut seen = HashSet::new();
    for name in &header {
        if !seen.insert(name.as_str()) {
            warn!(column = %name, "duplicate header name, later column wins");
        }
    }

    rows.enumerate()
        .map(|(row_idx, row)| {
            if row.len() > header.len() {
                warn!(
                    row = row_idx + 1,
                    fields = row.len(),
                    columns = header.len(),
                    "row has more fields than header, truncating"
                );
            }
            header.iter().cloned().zip(row).collect()
        })
        .collect()
}

/// Parse text and project it through its header row
pub fn parse_with_header(dialect: Dialect, text: &str) -> Vec<Mapping> {
    project(parse(dialect, text))
}
