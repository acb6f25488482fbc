use serde::{Deserialize, Serialize};
use std::path::Path;

use super::ModuleMap;
use crate::types::strip_source_ext;

/// Module key of the console binding every XS test build carries
pub const CONSOLE_MODULE: &str = "xs-platform/console";

/// Top-level manifest settings that do not depend on the traced graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestDefaults {
    pub include: String,
    pub creation: Creation,
    /// Components to strip; empty keeps everything, which dynamically
    /// loaded test code may need
    pub strip: Vec<String>,
    /// Modules preloaded so the test harness is shared by tests and driver
    pub preload: Vec<String>,
}

/// XS machine sizing; larger than the microcontroller-oriented default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Creation {
    pub keys: CreationKeys,
    pub stack: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreationKeys {
    pub available: u32,
}

impl Default for ManifestDefaults {
    fn default() -> Self {
        Self {
            include: "$(MODDABLE)/examples/manifest_base.json".to_string(),
            creation: Creation::default(),
            strip: Vec::new(),
            preload: vec!["tape-promise/tape".to_string()],
        }
    }
}

impl Default for Creation {
    fn default() -> Self {
        Self {
            keys: CreationKeys::default(),
            stack: 4096,
        }
    }
}

impl Default for CreationKeys {
    fn default() -> Self {
        Self { available: 4096 }
    }
}

/// The configuration document handed to `mcconfig`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manifest {
    #[serde(flatten)]
    pub defaults: ManifestDefaults,
    pub modules: ModuleMap,
}

impl Manifest {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A module key that is always present regardless of the traced graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedBinding {
    pub key: String,
    pub path: String,
}

impl FixedBinding {
    pub fn new(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
        }
    }

    /// `xs-platform/console` backed by the asset tree's console module
    pub fn console(assets_dir: &Path) -> Self {
        let path = assets_dir.join("src").join("console");
        Self::new(CONSOLE_MODULE, path.to_string_lossy().replace('\\', "/"))
    }
}

/// Merge defaults, the driver entry point, fixed bindings and traced modules.
///
/// Traced modules are layered last and may replace `main` or a fixed binding.
pub fn assemble(
    defaults: &ManifestDefaults,
    main: &str,
    modules: &ModuleMap,
    fixed: &[FixedBinding],
) -> Manifest {
    let mut all = ModuleMap::new();
    all.insert("main", format!("./{}", strip_source_ext(main)));

    for binding in fixed {
        all.insert(binding.key.clone(), binding.path.clone());
    }

    for (key, path) in modules.iter() {
        all.insert(key, path);
    }

    Manifest {
        defaults: defaults.clone(),
        modules: all,
    }
}
