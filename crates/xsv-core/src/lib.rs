//! xsv-core: Core library for CSV/TSV configuration tables
//!
//! This library provides functionality to:
//! - Parse comma or tab delimited text into rows of string fields
//! - Compose rows back into text with minimal quoting
//! - Key rows by a header line
//! - Bind rows to typed records through declared column bindings
//! - Group and collapse records by a key column
//! - Read table assets from memory or a directory of text files

pub mod composer;
pub mod dialect;
pub mod error;
pub mod group;
pub mod header;
pub mod options;
pub mod parser;
pub mod reader;
pub mod record;
pub mod serializer;
pub mod source;
pub mod table;
pub mod value;

#[cfg(test)]
mod fixtures;

pub use composer::{compose, compose_with_header};
pub use dialect::Dialect;
pub use error::{Error, Result};
pub use header::{parse_with_header, project};
pub use options::ReaderOptions;
pub use parser::parse;
pub use reader::Reader;
pub use record::{bind_mapping, bind_row, unbind_named, unbind_row, Column, Record, RowCollection};
pub use serializer::{deserialize, deserialize_with_header, serialize, serialize_with_header};
pub use source::{DirectorySource, MemorySource, TextSource};
pub use table::{Mapping, Row, Table};
pub use value::{FieldEnum, FieldFlags, FieldValue};
