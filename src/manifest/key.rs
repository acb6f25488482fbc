//! Flat module keys for the XS module table.
//!
//! XS indexes modules by a single name rather than by file location, so
//! every traced file needs a key. Precedence, first match wins:
//! - bare specifier → the specifier itself
//! - file under the package directory → "./" + relative path
//! - file in a scoped package's `src/` → "@scope/<rest>"
//! - anything else → the specifier itself

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::types::{strip_source_ext, DependencyRecord};

// node_modules/@agoric/eventual-send/src/E.js → (@agoric, E.js)
static SCOPED_SOURCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"node_modules/(@[^/]+)/[^/]+/src/(.+)$").unwrap());

/// Manifest key for `record`, relative to the package directory `top_dir`
pub fn resolve_key(record: &DependencyRecord, top_dir: &Path) -> String {
    if record.is_bare() {
        return record.specifier.clone();
    }

    if let Ok(relative) = record.filename.strip_prefix(top_dir) {
        return format!("./{}", strip_source_ext(&to_slash(relative)));
    }

    let full = to_slash(&record.filename);
    if let Some(cap) = SCOPED_SOURCE_PATTERN.captures(&full) {
        return format!("{}/{}", &cap[1], strip_source_ext(&cap[2]));
    }

    record.specifier.clone()
}

/// Manifest value for `record`: its path without the source extension
pub fn module_path(record: &DependencyRecord) -> String {
    strip_source_ext(&to_slash(&record.filename)).to_string()
}

fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOP: &str = "/work/pkg";

    fn key(specifier: &str, filename: &str) -> String {
        resolve_key(&DependencyRecord::new(specifier, filename), Path::new(TOP))
    }

    #[test]
    fn test_bare_specifier_unchanged() {
        assert_eq!(key("foo", "/work/pkg/node_modules/foo/index.js"), "foo");
        assert_eq!(
            key("tape-promise/tape", "/opt/tape-xs/src/tape.js"),
            "tape-promise/tape"
        );
    }

    #[test]
    fn test_entry_specifier_is_bare() {
        assert_eq!(key("test/test-basic", "/work/pkg/test/test-basic.js"), "test/test-basic");
    }

    #[test]
    fn test_local_file_relative_to_top() {
        assert_eq!(key("./b", "/work/pkg/a/b.js"), "./a/b");
        assert_eq!(key("../src/util.mjs", "/work/pkg/src/util.mjs"), "./src/util");
    }

    #[test]
    fn test_top_dir_prefix_is_component_wise() {
        // /work/pkg-other is not inside /work/pkg
        assert_eq!(key("../../pkg-other/x.js", "/work/pkg-other/x.js"), "../../pkg-other/x.js");
    }

    #[test]
    fn test_scoped_package_source_collapses_to_scope() {
        assert_eq!(
            key("./E", "/elsewhere/node_modules/@scope/pkg/src/X.js"),
            "@scope/X"
        );
        assert_eq!(
            key("./E", "/home/u/node_modules/@agoric/eventual-send/src/E.js"),
            "@agoric/E"
        );
        assert_eq!(
            key("../lib/deep", "/x/node_modules/@agoric/marshal/src/lib/deep.js"),
            "@agoric/lib/deep"
        );
    }

    #[test]
    fn test_local_wins_over_scoped_layout() {
        assert_eq!(
            key("./E", "/work/pkg/node_modules/@agoric/eventual-send/src/E.js"),
            "./node_modules/@agoric/eventual-send/src/E"
        );
    }

    #[test]
    fn test_fallback_to_specifier() {
        assert_eq!(key("./helper", "/elsewhere/node_modules/plain/lib/helper.js"), "./helper");
        assert_eq!(key("./x", "/elsewhere/node_modules/@scope/pkg/dist/x.js"), "./x");
    }

    #[test]
    fn test_module_path_strips_extension() {
        let record = DependencyRecord::new("./a", "/work/pkg/a.js");
        assert_eq!(module_path(&record), "/work/pkg/a");
        let record = DependencyRecord::new("./d", "/work/pkg/d.json");
        assert_eq!(module_path(&record), "/work/pkg/d.json");
    }
}
