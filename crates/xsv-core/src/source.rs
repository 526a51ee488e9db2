//! Text sources that hand raw table text to the reader
//!
//! A missing or unreadable asset is reported as `None`, never as an error;
//! the reader turns that into an empty result for the caller to check.

use crate::error::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Extensions tried, in order, when a resource name has none
const ASSET_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];

/// Provides the full text of one named resource
pub trait TextSource {
    /// Load the text of `name`, or `None` if there is no such resource
    fn load(&self, name: &str) -> Option<String>;
}

impl<S: TextSource + ?Sized> TextSource for &S {
    fn load(&self, name: &str) -> Option<String> {
        (**self).load(name)
    }
}

/// Resources stored as files under a root directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Create a source rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory of this source
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a resource name to an existing file.
    ///
    /// The name is tried as given, then with each known table extension.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let exact = self.root.join(name);
        if exact.is_file() {
            return Some(exact);
        }
        ASSET_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{}.{}", name, ext)))
            .find(|path| path.is_file())
    }

    /// Enumerate table assets below the root, as names relative to it.
    ///
    /// Names keep their extension and use `/` as separator; they are sorted.
    pub fn scan(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_table_file(path) {
                continue;
            }
            if let Ok(relative) = path.strip_prefix(&self.root) {
                let name: Vec<String> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                names.push(name.join("/"));
            }
        }

        names.sort();
        debug!(root = %self.root.display(), assets = names.len(), "scanned directory");
        Ok(names)
    }
}

impl TextSource for DirectorySource {
    fn load(&self, name: &str) -> Option<String> {
        let path = match self.resolve(name) {
            Some(path) => path,
            None => {
                warn!(root = %self.root.display(), name, "asset not found");
                return None;
            }
        };

        match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read asset");
                None
            }
        }
    }
}

fn is_table_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ASSET_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Resources held in memory, keyed by name
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    assets: HashMap<String, String>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a resource
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.assets.insert(name.into(), text.into());
    }

    /// Builder-style variant of [`insert`](Self::insert)
    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }
}

impl TextSource for MemorySource {
    fn load(&self, name: &str) -> Option<String> {
        self.assets.get(name).cloned()
    }
}
