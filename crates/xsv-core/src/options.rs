//! Reader options, loadable from a JSON side-car file

use crate::dialect::Dialect;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How a table asset should be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    /// Field separator
    pub dialect: Dialect,
    /// Treat the first row as a header
    pub with_header: bool,
    /// Keep the first row of a key group when collapsing (otherwise the last)
    pub use_first: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::Comma,
            with_header: true,
            use_first: true,
        }
    }
}

impl ReaderOptions {
    /// Options for `dialect` with a header row and first-wins collapsing
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    /// Set whether the first row is a header
    pub fn with_header(mut self, with_header: bool) -> Self {
        self.with_header = with_header;
        self
    }

    /// Set the first/last policy for collapsing groups
    pub fn use_first(mut self, use_first: bool) -> Self {
        self.use_first = use_first;
        self
    }

    /// Load options from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| Error::FileRead {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save options to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ReaderOptions::default();
        assert_eq!(options.dialect, Dialect::Comma);
        assert!(options.with_header);
        assert!(options.use_first);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: ReaderOptions = serde_json::from_str(r#"{"dialect":"tab"}"#).unwrap();
        assert_eq!(options, ReaderOptions::new(Dialect::Tab));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.options.json");

        let options = ReaderOptions::new(Dialect::Tab)
            .with_header(false)
            .use_first(false);
        options.save(&path).unwrap();

        assert_eq!(ReaderOptions::load(&path).unwrap(), options);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ReaderOptions::load("/nonexistent/options.json").unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
