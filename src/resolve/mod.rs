mod node;
mod overrides;
mod reader;

pub use node::NodeResolver;
pub use overrides::{Replacements, REPLACEMENTS};
pub use reader::{FsReader, SourceReader};

use std::path::{Component, Path, PathBuf};

use crate::error::Result;

/// Maps an import specifier to the absolute file it names
pub trait SpecifierResolver: Send + Sync {
    fn resolve(&self, specifier: &str, containing_file: &Path) -> Result<PathBuf>;
}

/// Specifiers that are real modules in the graph.
///
/// `module` is injected by the test harness to probe for CommonJS support;
/// there is no file behind it.
pub fn is_graph_module(specifier: &str) -> bool {
    specifier != "module"
}

/// Override table first, then node_modules conventions
pub struct PackageResolver {
    replacements: Replacements,
    node: NodeResolver,
}

impl PackageResolver {
    pub fn new(assets_dir: &Path) -> Self {
        Self {
            replacements: Replacements::new(assets_dir),
            node: NodeResolver::default(),
        }
    }
}

impl SpecifierResolver for PackageResolver {
    fn resolve(&self, specifier: &str, containing_file: &Path) -> Result<PathBuf> {
        if let Some(path) = self.replacements.lookup(specifier) {
            return Ok(path);
        }
        self.node.resolve(specifier, containing_file)
    }
}

/// Lexically remove `.` and `..` components without touching the filesystem
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
