//! Composer: rows back to delimited text

use crate::dialect::Dialect;
use std::borrow::Cow;

const LINE_FEED: &str = "\n";

/// Compose rows into delimited text.
///
/// Rows are joined with `\n` and there is no trailing line break. Fields are
/// quoted only when they need it.
pub fn compose<R, F>(dialect: Dialect, rows: R) -> String
where
    R: IntoIterator,
    R::Item: IntoIterator<Item = F>,
    F: AsRef<str>,
{
    rows.into_iter()
        .map(|row| compose_row(dialect, row))
        .collect::<Vec<_>>()
        .join(LINE_FEED)
}

/// Compose rows preceded by a header line.
///
/// Header names are joined verbatim and are not quoted, so callers must make
/// sure they contain no delimiter, quote or line break.
pub fn compose_with_header<R, F, H>(dialect: Dialect, rows: R, header: &[H]) -> String
where
    R: IntoIterator,
    R::Item: IntoIterator<Item = F>,
    F: AsRef<str>,
    H: AsRef<str>,
{
    let header_line = header
        .iter()
        .map(|h| h.as_ref())
        .collect::<Vec<_>>()
        .join(dialect.delimiter_str());
    format!("{}{}{}", header_line, LINE_FEED, compose(dialect, rows))
}

/// Compose a single row without a line terminator
pub fn compose_row<I, F>(dialect: Dialect, row: I) -> String
where
    I: IntoIterator<Item = F>,
    F: AsRef<str>,
{
    row.into_iter()
        .map(|field| quote_field(dialect, field.as_ref()).into_owned())
        .collect::<Vec<_>>()
        .join(dialect.delimiter_str())
}

/// Quote a field if it contains the delimiter, a quote or a line break
pub fn quote_field(dialect: Dialect, s: &str) -> Cow<'_, str> {
    if s.contains(dialect.delimiter()) || s.contains('"') || s.contains('\n') || s.contains('\r')
    {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(s)
    }
}
