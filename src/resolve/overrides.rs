use std::path::{Path, PathBuf};

/// Bare specifiers replaced by XS-specific assets (path relative to the
/// asset root, without `.js`)
pub const REPLACEMENTS: &[(&str, &str)] = &[
    ("@agoric/harden", "src/harden-xs"),
    // npm
    ("tape-promise/tape", "src/tape"),
];

pub struct Replacements {
    assets_dir: PathBuf,
}

impl Replacements {
    pub fn new(assets_dir: &Path) -> Self {
        Self {
            assets_dir: assets_dir.to_path_buf(),
        }
    }

    pub fn lookup(&self, specifier: &str) -> Option<PathBuf> {
        REPLACEMENTS
            .iter()
            .find(|(name, _)| *name == specifier)
            .map(|(_, target)| self.assets_dir.join(format!("{}.js", target)))
    }
}
