//! Delimiter dialects

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Field separator used by a delimited text table
///
/// Row separators are fixed for every dialect: `\n` ends a row and a lone
/// `\r` is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Comma separated values
    #[default]
    Comma,
    /// Tab separated values
    Tab,
}

impl Dialect {
    /// The field separator character
    pub fn delimiter(self) -> char {
        match self {
            Dialect::Comma => ',',
            Dialect::Tab => '\t',
        }
    }

    /// The field separator as a string slice, for joining
    pub fn delimiter_str(self) -> &'static str {
        match self {
            Dialect::Comma => ",",
            Dialect::Tab => "\t",
        }
    }

    /// Conventional file extension (without the dot)
    pub fn extension(self) -> &'static str {
        match self {
            Dialect::Comma => "csv",
            Dialect::Tab => "tsv",
        }
    }

    /// Infer the dialect from a file extension, if it is a known one
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("csv") {
            Some(Dialect::Comma)
        } else if ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("tab") {
            Some(Dialect::Tab)
        } else {
            None
        }
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" | "comma" | "," => Ok(Dialect::Comma),
            "tsv" | "tab" | "\t" | "\\t" => Ok(Dialect::Tab),
            _ => Err(Error::UnknownDialect(s.to_string())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Comma => write!(f, "comma"),
            Dialect::Tab => write!(f, "tab"),
        }
    }
}
