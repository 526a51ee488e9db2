//! Reader facade: one table asset exposed in the shapes applications use
//!
//! Every accessor returns `None` when the asset text is unavailable. Typed
//! accessors additionally fail when an enum or flags column is invalid.

use crate::error::Result;
use crate::group::{collapse, group_by_first, group_records, pick};
use crate::header::project;
use crate::options::ReaderOptions;
use crate::parser::parse;
use crate::record::Record;
use crate::serializer::{deserialize, deserialize_with_header};
use crate::source::TextSource;
use crate::table::{first_value, mapping_values, positional_mapping, Mapping, Row, Table};
use indexmap::IndexMap;
use once_cell::unsync::OnceCell;

enum Asset<'s> {
    Text(String),
    Source {
        source: &'s dyn TextSource,
        name: String,
        text: OnceCell<Option<String>>,
    },
}

/// Reads one table asset according to [`ReaderOptions`]
pub struct Reader<'s> {
    options: ReaderOptions,
    asset: Asset<'s>,
}

impl<'s> Reader<'s> {
    /// Reader over text that is already in memory
    pub fn new(options: ReaderOptions, text: impl Into<String>) -> Self {
        Self {
            options,
            asset: Asset::Text(text.into()),
        }
    }

    /// Reader over a named resource, loaded on first access and kept
    pub fn from_source(
        options: ReaderOptions,
        source: &'s dyn TextSource,
        name: impl Into<String>,
    ) -> Self {
        Self {
            options,
            asset: Asset::Source {
                source,
                name: name.into(),
                text: OnceCell::new(),
            },
        }
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Raw asset text, if available
    pub fn text(&self) -> Option<&str> {
        match &self.asset {
            Asset::Text(text) => Some(text.as_str()),
            Asset::Source { source, name, text } => {
                text.get_or_init(|| source.load(name)).as_deref()
            }
        }
    }

    fn table(&self) -> Option<Table> {
        self.text().map(|text| parse(self.options.dialect, text))
    }

    fn mappings(&self) -> Option<Vec<Mapping>> {
        self.table().map(project)
    }

    /// Rows as lists of strings, header row removed
    pub fn string_rows(&self) -> Option<Vec<Row>> {
        let mut rows = self.table()?;
        if self.options.with_header && !rows.is_empty() {
            rows.remove(0);
        }
        Some(rows)
    }

    /// Rows as mappings, grouped by the first column
    ///
    /// Headerless rows are keyed by position (`"0"`, `"1"`, ...).
    pub fn grouped_string_maps(&self) -> Option<Vec<Vec<Mapping>>> {
        if self.options.with_header {
            let mappings = self.mappings()?;
            return Some(group_by_first(mappings, |m| first_value(m).map(str::to_string)));
        }

        let groups = group_by_first(self.table()?, |row| row.first().cloned());
        Some(
            groups
                .into_iter()
                .map(|group| group.iter().map(|row| positional_mapping(row)).collect())
                .collect(),
        )
    }

    /// Rows as lists of strings, grouped by the first column
    pub fn grouped_string_rows(&self) -> Option<Vec<Vec<Row>>> {
        if self.options.with_header {
            let groups = group_by_first(self.mappings()?, |m| first_value(m).map(str::to_string));
            return Some(
                groups
                    .into_iter()
                    .map(|group| group.iter().map(mapping_values).collect())
                    .collect(),
            );
        }

        Some(group_by_first(self.table()?, |row| row.first().cloned()))
    }

    /// One mapping per distinct first-column value, chosen by `use_first`
    pub fn string_maps(&self) -> Option<Vec<Mapping>> {
        let use_first = self.options.use_first;
        Some(
            self.grouped_string_maps()?
                .into_iter()
                .filter_map(|group| pick(group, use_first))
                .collect(),
        )
    }

    /// Rows bound to `T`, by name with a header and by index without
    pub fn value_list<T: Record>(&self) -> Result<Option<Vec<T>>> {
        let text = match self.text() {
            Some(text) => text,
            None => return Ok(None),
        };
        let dialect = self.options.dialect;
        let records = if self.options.with_header {
            deserialize_with_header(dialect, text)?
        } else {
            deserialize(dialect, text)?
        };
        Ok(Some(records))
    }

    /// Records grouped by their key member
    pub fn grouped_value_map<T: Record>(&self) -> Result<Option<IndexMap<T::Key, Vec<T>>>> {
        Ok(self.value_list::<T>()?.map(group_records))
    }

    /// One record per key, chosen by `use_first`
    pub fn value_map<T: Record>(&self) -> Result<Option<IndexMap<T::Key, T>>> {
        let use_first = self.options.use_first;
        Ok(self
            .grouped_value_map::<T>()?
            .map(|groups| collapse(groups, use_first)))
    }
}
