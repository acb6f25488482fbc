use anyhow::{Context, Result};
use console::{style, Emoji};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use super::Args;
use crate::config::{resolve_assets_dir, BuildConfig};
use crate::error::BuildError;
use crate::generate::render_driver;
use crate::graph::{Closure, ClosureBuilder};
use crate::manifest::{assemble, resolve_key, FixedBinding, ModuleMap};
use crate::resolve::{normalize_path, FsReader, PackageResolver};
use crate::types::EntryFile;

pub const MANIFEST_FILE: &str = "test-xs-manifest.json";
pub const MAIN_FILE: &str = "test-xs-main.js";

/// Driver template, relative to the asset root
const MAIN_TEMPLATE: &str = "tpl/main_tpl.js";

static TRACING: Emoji<'_, '_> = Emoji("🔗 ", "");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "");

#[derive(Debug)]
pub struct BuildSummary {
    pub package: String,
    pub manifest: PathBuf,
    pub main: PathBuf,
    pub modules: usize,
}

pub async fn run_build(args: &Args) -> Result<BuildSummary> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;

    let package_dir = normalize_path(&cwd.join(&args.directory));
    let package = package_name(&package_dir)?;

    let mut config = BuildConfig::discover(&package_dir, args.config.as_deref())?;
    if let Some(max) = args.max_modules {
        config.max_modules = max;
    }
    if args.strict_keys {
        config.strict_keys = true;
    }

    let assets = normalize_path(&cwd.join(resolve_assets_dir(args.assets.as_deref())?));
    let entries = expand_entries(&args.files, &cwd)?;

    if args.verbose {
        eprintln!(
            "{}Tracing {} entries in {} (assets: {})",
            TRACING,
            style(entries.len()).cyan(),
            style(package_dir.display()).green(),
            assets.display()
        );
    }

    let closure = trace(&entries, &assets, &config, args.verbose).await?;

    let (modules, collisions) =
        ModuleMap::from_records(&closure.records, &package_dir, config.collision_policy())?;
    for collision in &collisions {
        eprintln!(
            "{}{} key {}: {} replaces {}",
            WARNING,
            style("warning:").yellow().bold(),
            style(&collision.key).cyan(),
            collision.replacement,
            style(&collision.previous).dim()
        );
    }

    if args.verbose {
        for record in &closure.records {
            eprintln!(
                "  {} {} {}",
                style(resolve_key(record, &package_dir)).cyan(),
                style("←").dim(),
                record.filename.display()
            );
        }
    }

    let manifest = assemble(
        &config.manifest,
        MAIN_FILE,
        &modules,
        &[FixedBinding::console(&assets)],
    );
    let manifest_json = manifest.to_json().context("Failed to serialize manifest")?;

    let template_path = assets.join(MAIN_TEMPLATE);
    let template = fs::read_to_string(&template_path)
        .with_context(|| format!("Failed to read driver template {}", template_path.display()))?;
    let driver = render_driver(&template, &package, &closure.entry_specifiers())
        .context("Failed to render driver")?;

    let summary = BuildSummary {
        package,
        manifest: args.out_dir.join(MANIFEST_FILE),
        main: args.out_dir.join(MAIN_FILE),
        modules: modules.len(),
    };

    if args.dry_run {
        println!("{}", manifest_json);
        return Ok(summary);
    }

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;
    fs::write(&summary.manifest, &manifest_json)
        .with_context(|| format!("Failed to write {}", summary.manifest.display()))?;
    fs::write(&summary.main, &driver)
        .with_context(|| format!("Failed to write {}", summary.main.display()))?;

    print_summary(&summary);

    Ok(summary)
}

async fn trace(
    entries: &[EntryFile],
    assets: &Path,
    config: &BuildConfig,
    verbose: bool,
) -> Result<Closure> {
    let builder = ClosureBuilder::new(Arc::new(FsReader), Arc::new(PackageResolver::new(assets)))
        .with_max_modules(config.max_modules);

    let pb = if verbose {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("{}Tracing imports...", TRACING));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = builder.build(entries).await;
    pb.finish_and_clear();

    Ok(result?)
}

fn print_summary(summary: &BuildSummary) {
    println!("\n{}Build complete!\n", SUCCESS);
    println!("  Package:   {}", style(&summary.package).green());
    println!("  Modules:   {}", style(summary.modules).cyan());
    println!("  Manifest:  {}", summary.manifest.display());
    println!("  Main:      {}", summary.main.display());
    println!(
        "\ntry: {}",
        style(format!("mcconfig -d -m {}", summary.manifest.display())).bold()
    );
}

/// Last path component of the package directory
pub fn package_name(package_dir: &Path) -> Result<String, BuildError> {
    package_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| {
            BuildError::Usage(format!(
                "cannot derive a package name from {}",
                package_dir.display()
            ))
        })
}

/// Entry files as given on the command line; directories expand to the
/// `.js` files beneath them in name order
pub fn expand_entries(files: &[String], cwd: &Path) -> Result<Vec<EntryFile>, BuildError> {
    let mut entries = Vec::new();

    for given in files {
        let path = cwd.join(given);
        if !path.is_dir() {
            entries.push(EntryFile::new(given, cwd));
            continue;
        }

        let base = given.trim_end_matches('/');
        for entry in WalkDir::new(&path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let is_js = entry.path().extension().and_then(|e| e.to_str()) == Some("js");
            if !is_js {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&path) else {
                continue;
            };
            let relative = relative.to_string_lossy().replace('\\', "/");
            let specifier = if base.is_empty() {
                relative
            } else {
                format!("{}/{}", base, relative)
            };
            entries.push(EntryFile::new(&specifier, cwd));
        }
    }

    if entries.is_empty() {
        return Err(BuildError::Usage("no entry files to build".to_string()));
    }

    Ok(entries)
}
