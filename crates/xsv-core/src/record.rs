//! Typed records and their column bindings
//!
//! A record type declares its columns once as a static table and knows how to
//! assign and render each of them. Nothing is discovered at run time.

use crate::error::{Error, Result};
use crate::table::{Mapping, Row};
use std::hash::Hash;

/// Binding of one record member to a column position, a column name, or both
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Position used when reading and writing headerless rows
    pub index: Option<usize>,
    /// Header name used when reading and writing rows with a header
    pub name: Option<&'static str>,
}

impl Column {
    /// Bind by position only
    pub const fn indexed(index: usize) -> Self {
        Self {
            index: Some(index),
            name: None,
        }
    }

    /// Bind by header name only
    pub const fn named(name: &'static str) -> Self {
        Self {
            index: None,
            name: Some(name),
        }
    }

    /// Bind by position and by header name
    pub const fn new(index: usize, name: &'static str) -> Self {
        Self {
            index: Some(index),
            name: Some(name),
        }
    }
}

/// A row-shaped type that can be bound from and to delimited fields.
///
/// `assign` and `render` receive the position of the member in [`COLUMNS`],
/// not its column index.
///
/// [`COLUMNS`]: Record::COLUMNS
pub trait Record: Default {
    /// Grouping key. Use `()` for types without a key member; every record
    /// then lands in a single group.
    type Key: Eq + Hash + Clone;

    /// Column bindings, one per bound member
    const COLUMNS: &'static [Column];

    /// Coerce `raw` into the member bound by `COLUMNS[column]`
    fn assign(&mut self, column: usize, raw: &str) -> Result<()>;

    /// Textual form of the member bound by `COLUMNS[column]`
    fn render(&self, column: usize) -> String;

    /// Value of the key member
    fn key(&self) -> Self::Key;
}

/// A type holding the full sequence of records read from one table
pub trait RowCollection: Sized {
    type Item: Record;

    /// Wrap records produced from a table
    fn from_records(records: Vec<Self::Item>) -> Self;

    /// Records to write out
    fn records(&self) -> &[Self::Item];
}

impl<T: Record> RowCollection for Vec<T> {
    type Item = T;

    fn from_records(records: Vec<T>) -> Self {
        records
    }

    fn records(&self) -> &[T] {
        self
    }
}

/// Declare a record struct together with its [`Record`] binding.
///
/// Each field carries a `#[column(...)]` binding of `index = N`, `name = "..."`
/// or both. The optional trailing `key field: Type` names the grouping key;
/// without it the key is `()`.
///
/// ```
/// use xsv_core::{xsv_record, Dialect};
///
/// xsv_record! {
///     #[derive(Debug, Default)]
///     pub struct Person {
///         #[column(index = 0, name = "id")]
///         pub id: i32,
///         #[column(index = 1, name = "name")]
///         pub name: String,
///     }
///     key id: i32
/// }
///
/// let people: Vec<Person> = xsv_core::deserialize(Dialect::Comma, "1,Ann\n2,Bo").unwrap();
/// assert_eq!(people[1].name, "Bo");
/// ```
#[macro_export]
macro_rules! xsv_record {
    (@key) => {
        type Key = ();

        fn key(&self) -> Self::Key {}
    };
    (@key $key:ident : $kty:ty) => {
        type Key = $kty;

        fn key(&self) -> Self::Key {
            ::std::clone::Clone::clone(&self.$key)
        }
    };
    (@column index = $index:expr, name = $name:expr) => {
        $crate::Column::new($index, $name)
    };
    (@column index = $index:expr) => {
        $crate::Column::indexed($index)
    };
    (@column name = $name:expr) => {
        $crate::Column::named($name)
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $record:ident {
            $(
                #[column($($binding:tt)*)]
                $fvis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
        $(key $key:ident : $kty:ty)?
    ) => {
        $(#[$meta])*
        $vis struct $record {
            $($fvis $field: $ty,)*
        }

        impl $crate::Record for $record {
            $crate::xsv_record!(@key $($key : $kty)?);

            const COLUMNS: &'static [$crate::Column] = &[
                $($crate::xsv_record!(@column $($binding)*),)*
            ];

            #[allow(unused_mut, unused_assignments)]
            fn assign(&mut self, column: usize, raw: &str) -> $crate::Result<()> {
                let mut slot = 0usize;
                $(
                    if column == slot {
                        self.$field = <$ty as $crate::FieldValue>::from_field(raw)?;
                        return Ok(());
                    }
                    slot += 1;
                )*
                Ok(())
            }

            #[allow(unused_mut, unused_assignments)]
            fn render(&self, column: usize) -> String {
                let mut slot = 0usize;
                $(
                    if column == slot {
                        return $crate::FieldValue::to_field(&self.$field);
                    }
                    slot += 1;
                )*
                String::new()
            }
        }
    };
}

/// Build a record from a headerless row.
///
/// Members whose position is past the end of the row keep their default.
pub fn bind_row<T: Record>(row: &[String]) -> Result<T> {
    let mut record = T::default();
    for (slot, column) in T::COLUMNS.iter().enumerate() {
        if let Some(raw) = column.index.and_then(|i| row.get(i)) {
            record.assign(slot, raw)?;
        }
    }
    Ok(record)
}

/// Build a record from a header-keyed mapping.
///
/// Members whose name is absent from the mapping keep their default.
pub fn bind_mapping<T: Record>(mapping: &Mapping) -> Result<T> {
    let mut record = T::default();
    for (slot, column) in T::COLUMNS.iter().enumerate() {
        if let Some(raw) = column.name.and_then(|n| mapping.get(n)) {
            record.assign(slot, raw)?;
        }
    }
    Ok(record)
}

/// Members with a column index, ordered by that index.
///
/// Fails unless the indices run 0, 1, 2, ... without gaps or repeats.
pub fn positional_order<T: Record>() -> Result<Vec<usize>> {
    let type_name = std::any::type_name::<T>();
    let mut slots: Vec<(usize, usize)> = T::COLUMNS
        .iter()
        .enumerate()
        .filter_map(|(slot, column)| column.index.map(|index| (index, slot)))
        .collect();
    slots.sort_by_key(|(index, _)| *index);

    for (expected, &(index, _)) in slots.iter().enumerate() {
        if expected > 0 && slots[expected - 1].0 == index {
            return Err(Error::DuplicateColumnIndex { type_name, index });
        }
        if index != expected {
            return Err(Error::SparseColumnIndex {
                type_name,
                expected,
                found: index,
            });
        }
    }

    Ok(slots.into_iter().map(|(_, slot)| slot).collect())
}

/// Render a record as a headerless row using an order from [`positional_order`]
pub fn unbind_row<T: Record>(record: &T, order: &[usize]) -> Row {
    order.iter().map(|&slot| record.render(slot)).collect()
}

/// Render a record against a header.
///
/// Only members whose name appears in `header` are written, in header order.
pub fn unbind_named<T: Record, H: AsRef<str>>(record: &T, header: &[H]) -> Row {
    let mut named: Vec<(usize, usize)> = T::COLUMNS
        .iter()
        .enumerate()
        .filter_map(|(slot, column)| {
            let name = column.name?;
            let position = header.iter().position(|h| h.as_ref() == name)?;
            Some((position, slot))
        })
        .collect();
    named.sort_by_key(|(position, _)| *position);

    named
        .into_iter()
        .map(|(_, slot)| record.render(slot))
        .collect()
}
