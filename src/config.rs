use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::graph::DEFAULT_MAX_MODULES;
use crate::manifest::{CollisionPolicy, ManifestDefaults};

/// Looked up in the package directory when no `--config` is given
pub const CONFIG_FILE: &str = "tape-xs.toml";

/// Environment variable naming the asset root
pub const ASSETS_ENV: &str = "TAPE_XS_ASSETS";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Upper bound on traced modules
    pub max_modules: usize,
    /// Fail instead of overwriting when two files share a module key
    pub strict_keys: bool,
    pub manifest: ManifestDefaults,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_modules: DEFAULT_MAX_MODULES,
            strict_keys: false,
            manifest: ManifestDefaults::default(),
        }
    }
}

impl BuildConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Explicit file if given, else `<package_dir>/tape-xs.toml` if present,
    /// else defaults
    pub fn discover(package_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = package_dir.join(CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn collision_policy(&self) -> CollisionPolicy {
        if self.strict_keys {
            CollisionPolicy::Reject
        } else {
            CollisionPolicy::Overwrite
        }
    }
}

/// Asset root: explicit flag, then `TAPE_XS_ASSETS`, then the install root
/// of the running executable (`<root>/bin/tape-xs-build` → `<root>`)
pub fn resolve_assets_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }

    if let Some(dir) = std::env::var_os(ASSETS_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    let exe_dir = exe
        .parent()
        .context("Executable has no parent directory")?
        .to_path_buf();
    Ok(install_root(&exe_dir))
}

fn install_root(exe_dir: &Path) -> PathBuf {
    match (exe_dir.file_name(), exe_dir.parent()) {
        (Some(name), Some(parent)) if name == "bin" => parent.to_path_buf(),
        _ => exe_dir.to_path_buf(),
    }
}
