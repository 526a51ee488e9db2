//! Untyped table shapes shared by the parser, composer and reader

use indexmap::IndexMap;

/// One line's worth of fields. Rows in a table may differ in length.
pub type Row = Vec<String>;

/// Ordered rows as produced by the parser
pub type Table = Vec<Row>;

/// A row keyed by column name (or by stringified position when headerless).
///
/// Insertion order follows the header, so the first entry is always the
/// first column.
pub type Mapping = IndexMap<String, String>;

/// Re-key a headerless row by position: `"0"`, `"1"`, ...
pub fn positional_mapping(row: &[String]) -> Mapping {
    row.iter()
        .enumerate()
        .map(|(i, field)| (i.to_string(), field.clone()))
        .collect()
}

/// Value of the first column of a mapping, used as the untyped grouping key
pub fn first_value(mapping: &Mapping) -> Option<&str> {
    mapping.first().map(|(_, v)| v.as_str())
}

/// Field values of a mapping in column order
pub fn mapping_values(mapping: &Mapping) -> Row {
    mapping.values().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_mapping_keys() {
        let row = vec!["10".to_string(), "Bob".to_string()];
        let mapping = positional_mapping(&row);

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping["0"], "10");
        assert_eq!(mapping["1"], "Bob");
        assert_eq!(first_value(&mapping), Some("10"));
    }

    #[test]
    fn test_mapping_values_keep_order() {
        let mut mapping = Mapping::new();
        mapping.insert("size".to_string(), "3".to_string());
        mapping.insert("hash".to_string(), "ab".to_string());

        assert_eq!(mapping_values(&mapping), vec!["3", "ab"]);
        assert_eq!(first_value(&Mapping::new()), None);
    }
}
