use std::path::{Path, PathBuf};

use crate::resolve::normalize_path;

/// Extensions XS drops from module source paths
pub const SOURCE_EXTENSIONS: &[&str] = &[".js", ".mjs"];

/// One discovered module reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRecord {
    /// Literal import text, or the entry's own identifier for entry files
    pub specifier: String,
    /// Resolved absolute location
    pub filename: PathBuf,
}

impl DependencyRecord {
    pub fn new(specifier: impl Into<String>, filename: impl Into<PathBuf>) -> Self {
        Self {
            specifier: specifier.into(),
            filename: filename.into(),
        }
    }

    /// Bare specifiers are looked up by package name, not by relative path
    pub fn is_bare(&self) -> bool {
        !is_relative_specifier(&self.specifier)
    }
}

/// A user-supplied entry file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFile {
    /// Module identifier exposed to the driver: the path as given, minus extension
    pub specifier: String,
    /// Absolute path of the file
    pub path: PathBuf,
}

impl EntryFile {
    /// Build an entry from the path the user typed, anchored at `cwd`
    pub fn new(given: &str, cwd: &Path) -> Self {
        Self {
            specifier: strip_source_ext(given).to_string(),
            path: normalize_path(&cwd.join(given)),
        }
    }

    pub fn record(&self) -> DependencyRecord {
        DependencyRecord::new(self.specifier.clone(), self.path.clone())
    }
}

/// `./x` and `../x` are relative; everything else is bare
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier.starts_with("./") || specifier.starts_with("../")
}

/// "test/foo.js" → "test/foo"
pub fn strip_source_ext(path: &str) -> &str {
    SOURCE_EXTENSIONS
        .iter()
        .find_map(|ext| path.strip_suffix(ext))
        .unwrap_or(path)
}
