//! Tokenizer for delimiter-separated text
//!
//! The scan walks extended grapheme clusters rather than bytes or `char`s, so
//! a multi-codepoint character is never split across fields. A quote inside a
//! quoted field decides its meaning by looking at the element after it.

use crate::dialect::Dialect;
use crate::table::{Row, Table};
use tracing::{debug, warn};
use unicode_segmentation::UnicodeSegmentation;

const QUOTE: &str = "\"";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Quote,
    Delimiter,
    LineFeed,
    CarriageReturn,
    Text,
}

/// One text element tagged with its role in the current dialect
#[derive(Debug, Clone, Copy)]
struct Element<'a> {
    kind: Kind,
    text: &'a str,
}

impl<'a> Element<'a> {
    fn classify(text: &'a str, delimiter: &str) -> Self {
        let kind = if text == QUOTE {
            Kind::Quote
        } else if text == delimiter {
            Kind::Delimiter
        } else if text == "\n" || text == "\r\n" {
            // CR LF is a single grapheme cluster
            Kind::LineFeed
        } else if text == "\r" {
            Kind::CarriageReturn
        } else {
            Kind::Text
        };
        Self { kind, text }
    }

    /// Classify one grapheme cluster.
    ///
    /// Combining marks can attach to a quote or delimiter and form a single
    /// cluster with it. The leading structural char is then split off and the
    /// marks become text of the following field.
    fn split(grapheme: &'a str, delimiter: &str) -> impl Iterator<Item = Element<'a>> {
        let (head, tail) = match grapheme.char_indices().nth(1) {
            Some((at, _)) if grapheme.starts_with(QUOTE) || grapheme.starts_with(delimiter) => {
                grapheme.split_at(at)
            }
            _ => (grapheme, ""),
        };
        let marks = (!tail.is_empty()).then_some(Element {
            kind: Kind::Text,
            text: tail,
        });
        std::iter::once(Self::classify(head, delimiter)).chain(marks)
    }

    fn closes_quote(self) -> bool {
        matches!(
            self.kind,
            Kind::Delimiter | Kind::LineFeed | Kind::CarriageReturn
        )
    }
}

/// Parse delimited text into rows of string fields.
///
/// Never fails: empty input yields an empty table and malformed quoting is
/// recovered leniently. A quote inside a quoted field that is followed by
/// anything other than a quote, delimiter or line break is dropped and the
/// field stays quoted.
pub fn parse(dialect: Dialect, text: &str) -> Table {
    let mut rows: Table = Vec::new();
    if text.is_empty() {
        return rows;
    }

    let delimiter = dialect.delimiter_str();
    let mut elements = text
        .graphemes(true)
        .flat_map(|g| Element::split(g, delimiter));

    let mut row: Row = Vec::new();
    let mut field = String::new();
    let mut quoting = false;

    while let Some(mut current) = elements.next() {
        if quoting {
            if current.kind == Kind::Quote {
                match elements.next() {
                    Some(next) if next.kind == Kind::Quote => {
                        field.push_str(QUOTE);
                        continue;
                    }
                    Some(next) => {
                        if next.closes_quote() {
                            quoting = false;
                        } else {
                            warn!(field = %field, "stray quote inside quoted field, dropped");
                        }
                        current = next;
                    }
                    None => {
                        quoting = false;
                        continue;
                    }
                }
            }

            if quoting {
                field.push_str(current.text);
                continue;
            }
        }

        match current.kind {
            Kind::Quote if field.is_empty() => quoting = true,
            Kind::Delimiter => row.push(std::mem::take(&mut field)),
            Kind::LineFeed => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            Kind::CarriageReturn => {}
            Kind::Quote | Kind::Text => field.push_str(current.text),
        }
    }

    if !field.is_empty() {
        row.push(field);
    }
    if !row.is_empty() {
        rows.push(row);
    }

    debug!(dialect = %dialect, rows = rows.len(), "parsed table");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_csv() {
        let rows = parse(Dialect::Comma, "aaa,bbb,ccc\nddd,eee,fff");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1].len(), 3);
        assert_eq!(rows[0][1], "bbb");
        assert_eq!(rows[0][2], "ccc");
        assert_eq!(rows[1][0], "ddd");
        assert_eq!(rows[1][2], "fff");
    }

    #[test]
    fn test_parse_simple_tsv() {
        let rows = parse(Dialect::Tab, "aaa\tbbb\tccc\nddd\teee\tfff");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], "bbb");
        assert_eq!(rows[1][2], "fff");
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse(Dialect::Comma, "").is_empty());
        assert!(parse(Dialect::Tab, "").is_empty());
    }

    #[test]
    fn test_parse_empty_fields() {
        let rows = parse(Dialect::Comma, "aaa,,ccc\n\n,,\n,\n");

        let counts: Vec<usize> = rows.iter().map(|r| r.len()).collect();
        assert_eq!(counts, vec![3, 1, 3, 2]);
        assert_eq!(rows[0][0], "aaa");
        assert_eq!(rows[0][1], "");
        assert_eq!(rows[1][0], "");
        assert!(rows[2].iter().all(|f| f.is_empty()));
    }

    #[test]
    fn test_parse_quotes() {
        let text = "aaa,\"bbb\",\"\"\"ccc\"\nddd,\"e\"\"ee\",fff\ng\"gg,\"hhh\"\"\",\"i\"ii\"";
        let rows = parse(Dialect::Comma, text);

        assert_eq!(rows[0][1], "bbb");
        assert_eq!(rows[0][2], "\"ccc");
        assert_eq!(rows[1][1], "e\"ee");
        assert_eq!(rows[2][0], "g\"gg");
        assert_eq!(rows[2][1], "hhh\"");
        // stray quote is swallowed rather than rejected
        assert_eq!(rows[2][2], "iii");
    }

    #[test]
    fn test_parse_doubled_quote() {
        let rows = parse(Dialect::Comma, "\"a\"\"b\"");
        assert_eq!(rows, vec![vec!["a\"b".to_string()]]);
    }

    #[test]
    fn test_parse_embedded_delimiters() {
        let rows = parse(Dialect::Comma, "aaa,\"b,bb\",ccc\n\"d\"\",dd\",eee,\",fff,\"");

        assert_eq!(rows[0][1], "b,bb");
        assert_eq!(rows[1][0], "d\",dd");
        assert_eq!(rows[1][2], ",fff,");
    }

    #[test]
    fn test_parse_embedded_newlines() {
        let rows = parse(Dialect::Comma, "aaa,\"b\nbb\",ccc\n\"\nddd\",eee,\"fff\n\"");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], "b\nbb");
        assert_eq!(rows[1][0], "\nddd");
        assert_eq!(rows[1][2], "fff\n");
    }

    #[test]
    fn test_parse_crlf_and_bare_cr() {
        let crlf = parse(Dialect::Comma, "a,b\r\nc,d\r\n");
        let lf = parse(Dialect::Comma, "a,b\nc,d\n");
        assert_eq!(crlf, lf);

        let bare = parse(Dialect::Comma, "a\r,b");
        assert_eq!(bare, vec![vec!["a".to_string(), "b".to_string()]]);
    }

    #[test]
    fn test_parse_quoted_field_closed_by_crlf() {
        let rows = parse(Dialect::Comma, "\"x,y\"\r\nz");
        assert_eq!(rows, vec![vec!["x,y".to_string()], vec!["z".to_string()]]);
    }

    #[test]
    fn test_parse_multibyte_text() {
        let rows = parse(Dialect::Comma, "あああ,\"い,い\",🇯🇵\ne\u{301},x");

        assert_eq!(rows[0], vec!["あああ", "い,い", "🇯🇵"]);
        assert_eq!(rows[1][0], "e\u{301}");
    }

    #[test]
    fn test_parse_combining_mark_after_structural_char() {
        // ",\u{301}" and "\"\u{301}" are single grapheme clusters
        let rows = parse(Dialect::Comma, "a,\u{301}b\n\"\u{301}x,y\",z");

        assert_eq!(rows[0], vec!["a", "\u{301}b"]);
        assert_eq!(rows[1], vec!["\u{301}x,y", "z"]);
    }

    #[test]
    fn test_parse_tab_dialect_ignores_commas() {
        let rows = parse(Dialect::Tab, "a,b\tc");
        assert_eq!(rows, vec![vec!["a,b".to_string(), "c".to_string()]]);
    }

    #[test]
    fn test_parse_dialects_agree() {
        let comma = parse(Dialect::Comma, "1,\"x\ty\",3\n,\"q\"\"\"\n");
        let tab = parse(Dialect::Tab, "1\t\"x,y\"\t3\n\t\"q\"\"\"\n");

        assert_eq!(comma.len(), tab.len());
        for (c, t) in comma.iter().zip(&tab) {
            assert_eq!(c.len(), t.len());
        }
        assert_eq!(comma[1], tab[1]);
    }

    #[test]
    fn test_parse_trailing_delimiter_drops_empty_field() {
        // no content after the last delimiter, so no final empty field
        let rows = parse(Dialect::Comma, "a,");
        assert_eq!(rows, vec![vec!["a".to_string()]]);
    }
}
