//! Package-convention resolution of import specifiers.
//!
//! Follows the node_modules layout: relative specifiers resolve against the
//! importing file's directory, bare specifiers against the nearest
//! `node_modules/<package>` found walking up from it. Package entry points
//! come from `package.json`, preferring the ES module entry.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use super::{normalize_path, SpecifierResolver};
use crate::error::{BuildError, Result};
use crate::types::is_relative_specifier;

/// package.json fields consulted for a package's entry file, in order
const ENTRY_FIELDS: &[&str] = &["module", "main"];

/// Extensions tried when a specifier omits one
const FILE_EXTENSIONS: &[&str] = &["js", "mjs", "json"];

const INDEX_FILES: &[&str] = &["index.js", "index.mjs"];

#[derive(Debug, Default, Clone, Copy)]
pub struct NodeResolver;

impl NodeResolver {
    fn resolve_bare(&self, specifier: &str, base_dir: &Path) -> Option<PathBuf> {
        let (package, subpath) = split_package_specifier(specifier)?;

        for dir in base_dir.ancestors() {
            let package_dir = dir.join("node_modules").join(&package);
            if !package_dir.is_dir() {
                continue;
            }

            let found = match subpath {
                Some(sub) => self.resolve_path(&normalize_path(&package_dir.join(sub))),
                None => self.resolve_directory(&package_dir),
            };
            if found.is_some() {
                return found;
            }
        }

        None
    }

    /// File as named, then with an extension added, then as a directory
    fn resolve_path(&self, candidate: &Path) -> Option<PathBuf> {
        if let Some(file) = resolve_file(candidate) {
            return Some(file);
        }
        if candidate.is_dir() {
            return self.resolve_directory(candidate);
        }
        None
    }

    fn resolve_directory(&self, dir: &Path) -> Option<PathBuf> {
        if let Some(entry) = self.package_entry(dir) {
            let target = normalize_path(&dir.join(entry));
            if target != dir {
                if let Some(found) = resolve_file(&target).or_else(|| resolve_index(&target)) {
                    return Some(found);
                }
            }
        }
        resolve_index(dir)
    }

    fn package_entry(&self, dir: &Path) -> Option<String> {
        let content = fs::read_to_string(dir.join("package.json")).ok()?;
        let manifest: serde_json::Value = serde_json::from_str(&content).ok()?;

        ENTRY_FIELDS.iter().find_map(|field| {
            manifest
                .get(field)
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
        })
    }
}

impl SpecifierResolver for NodeResolver {
    fn resolve(&self, specifier: &str, containing_file: &Path) -> Result<PathBuf> {
        let base_dir = containing_file.parent().unwrap_or_else(|| Path::new("/"));

        let found = if is_relative_specifier(specifier) || specifier.starts_with('/') {
            self.resolve_path(&normalize_path(&base_dir.join(specifier)))
        } else {
            self.resolve_bare(specifier, base_dir)
        };

        found.ok_or_else(|| BuildError::Resolution {
            specifier: specifier.to_string(),
            from: containing_file.to_path_buf(),
        })
    }
}

fn resolve_file(candidate: &Path) -> Option<PathBuf> {
    if candidate.is_file() {
        return Some(candidate.to_path_buf());
    }
    FILE_EXTENSIONS
        .iter()
        .map(|ext| with_added_extension(candidate, ext))
        .find(|p| p.is_file())
}

fn resolve_index(dir: &Path) -> Option<PathBuf> {
    INDEX_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}

fn with_added_extension(path: &Path, ext: &str) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_owned();
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}

/// "@scope/name/sub/path" → ("@scope/name", Some("sub/path"))
/// "name" → ("name", None)
fn split_package_specifier(specifier: &str) -> Option<(String, Option<&str>)> {
    let name_segments = if specifier.starts_with('@') { 2 } else { 1 };
    let mut parts = specifier.splitn(name_segments + 1, '/');

    let mut package = Vec::with_capacity(name_segments);
    for _ in 0..name_segments {
        match parts.next() {
            Some(seg) if !seg.is_empty() => package.push(seg),
            _ => return None,
        }
    }

    let subpath = parts.next().filter(|s| !s.is_empty());
    Some((package.join("/"), subpath))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_split_package_specifier() {
        assert_eq!(split_package_specifier("tape"), Some(("tape".to_string(), None)));
        assert_eq!(
            split_package_specifier("tape-promise/tape"),
            Some(("tape-promise".to_string(), Some("tape")))
        );
        assert_eq!(
            split_package_specifier("@agoric/eventual-send"),
            Some(("@agoric/eventual-send".to_string(), None))
        );
        assert_eq!(
            split_package_specifier("@agoric/eventual-send/src/E"),
            Some(("@agoric/eventual-send".to_string(), Some("src/E")))
        );
        assert_eq!(split_package_specifier("@agoric"), None);
        assert_eq!(split_package_specifier(""), None);
    }

    #[test]
    fn test_relative_with_and_without_extension() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("test/a.js"), "");
        touch(&root.join("src/b.js"), "");

        let resolver = NodeResolver::default();
        let from = root.join("test/a.js");
        assert_eq!(resolver.resolve("../src/b.js", &from).unwrap(), root.join("src/b.js"));
        assert_eq!(resolver.resolve("../src/b", &from).unwrap(), root.join("src/b.js"));
    }

    #[test]
    fn test_relative_directory_uses_index() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("main.js"), "");
        touch(&root.join("lib/index.js"), "");

        let resolver = NodeResolver::default();
        assert_eq!(
            resolver.resolve("./lib", &root.join("main.js")).unwrap(),
            root.join("lib/index.js")
        );
    }

    #[test]
    fn test_bare_prefers_module_field() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("main.js"), "");
        touch(
            &root.join("node_modules/@agoric/eventual-send/package.json"),
            r#"{"main": "dist/index.cjs", "module": "src/index.js"}"#,
        );
        touch(&root.join("node_modules/@agoric/eventual-send/src/index.js"), "");

        let resolver = NodeResolver::default();
        assert_eq!(
            resolver
                .resolve("@agoric/eventual-send", &root.join("main.js"))
                .unwrap(),
            root.join("node_modules/@agoric/eventual-send/src/index.js")
        );
    }

    #[test]
    fn test_bare_falls_back_to_main_field() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("main.js"), "");
        touch(
            &root.join("node_modules/dep/package.json"),
            r#"{"module": "", "main": "lib/dep.js"}"#,
        );
        touch(&root.join("node_modules/dep/lib/dep.js"), "");
        touch(&root.join("node_modules/dep/index.js"), "");

        let resolver = NodeResolver;
        assert_eq!(
            resolver.resolve("dep", &root.join("main.js")).unwrap(),
            root.join("node_modules/dep/lib/dep.js")
        );
    }

    #[test]
    fn test_bare_subpath_walks_up() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("packages/app/test/deep/t.js"), "");
        touch(&root.join("node_modules/tape-promise/tape.js"), "");

        let resolver = NodeResolver::default();
        assert_eq!(
            resolver
                .resolve("tape-promise/tape", &root.join("packages/app/test/deep/t.js"))
                .unwrap(),
            root.join("node_modules/tape-promise/tape.js")
        );
    }

    #[test]
    fn test_nearest_node_modules_wins() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("app/main.js"), "");
        touch(&root.join("node_modules/dep/index.js"), "");
        touch(&root.join("app/node_modules/dep/index.js"), "");

        let resolver = NodeResolver::default();
        assert_eq!(
            resolver.resolve("dep", &root.join("app/main.js")).unwrap(),
            root.join("app/node_modules/dep/index.js")
        );
    }

    #[test]
    fn test_main_pointing_at_itself_falls_back_to_index() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("main.js"), "");
        touch(&root.join("node_modules/dep/package.json"), r#"{"main": "."}"#);
        touch(&root.join("node_modules/dep/index.js"), "");

        let resolver = NodeResolver::default();
        assert_eq!(
            resolver.resolve("dep", &root.join("main.js")).unwrap(),
            root.join("node_modules/dep/index.js")
        );
    }

    #[test]
    fn test_unresolvable_names_specifier_and_importer() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("main.js"), "");

        let resolver = NodeResolver::default();
        let err = resolver
            .resolve("no-such-package", &root.join("main.js"))
            .unwrap_err();
        match err {
            BuildError::Resolution { specifier, from } => {
                assert_eq!(specifier, "no-such-package");
                assert_eq!(from, root.join("main.js"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
