//! Whole-table serialization between text and collection wrappers

use crate::composer::{compose, compose_with_header};
use crate::dialect::Dialect;
use crate::error::Result;
use crate::header::parse_with_header;
use crate::parser::parse;
use crate::record::{bind_mapping, bind_row, positional_order, unbind_named, unbind_row, RowCollection};
use tracing::debug;

/// Read a headerless table, binding members by column index
pub fn deserialize<C: RowCollection>(dialect: Dialect, text: &str) -> Result<C> {
    let records = parse(dialect, text)
        .iter()
        .map(|row| bind_row(row))
        .collect::<Result<Vec<_>>>()?;
    debug!(records = records.len(), "deserialized indexed rows");
    Ok(C::from_records(records))
}

/// Read a table whose first row is a header, binding members by column name
pub fn deserialize_with_header<C: RowCollection>(dialect: Dialect, text: &str) -> Result<C> {
    let records = parse_with_header(dialect, text)
        .iter()
        .map(|mapping| bind_mapping(mapping))
        .collect::<Result<Vec<_>>>()?;
    debug!(records = records.len(), "deserialized named rows");
    Ok(C::from_records(records))
}

/// Write records as a headerless table ordered by column index
pub fn serialize<C: RowCollection>(dialect: Dialect, collection: &C) -> Result<String> {
    let order = positional_order::<C::Item>()?;
    let rows: Vec<_> = collection
        .records()
        .iter()
        .map(|record| unbind_row(record, &order))
        .collect();
    Ok(compose(dialect, &rows))
}

/// Write records under `header`, keeping only the named columns it lists
pub fn serialize_with_header<C, H>(dialect: Dialect, collection: &C, header: &[H]) -> Result<String>
where
    C: RowCollection,
    H: AsRef<str>,
{
    let rows: Vec<_> = collection
        .records()
        .iter()
        .map(|record| unbind_named(record, header))
        .collect();
    Ok(compose_with_header(dialect, &rows, header))
}

macro_rules! dialect_module {
    ($name:ident, $dialect:expr, $label:literal) => {
        #[doc = concat!("Serialization fixed to the ", $label, " dialect")]
        pub mod $name {
            use super::*;

            pub fn deserialize<C: RowCollection>(text: &str) -> Result<C> {
                super::deserialize($dialect, text)
            }

            pub fn deserialize_with_header<C: RowCollection>(text: &str) -> Result<C> {
                super::deserialize_with_header($dialect, text)
            }

            pub fn serialize<C: RowCollection>(collection: &C) -> Result<String> {
                super::serialize($dialect, collection)
            }

            pub fn serialize_with_header<C: RowCollection, H: AsRef<str>>(
                collection: &C,
                header: &[H],
            ) -> Result<String> {
                super::serialize_with_header($dialect, collection, header)
            }
        }
    };
}

dialect_module!(csv, Dialect::Comma, "comma");
dialect_module!(tsv, Dialect::Tab, "tab");
