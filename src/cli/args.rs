use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "tape-xs-build",
    version,
    about = "Build a tape-style test driver and module manifest for the XS runtime",
    after_help = "Example: tape-xs-build /full/path/to/a-package/ test/*.js"
)]
pub struct Args {
    /// Package directory; its name becomes the package name
    pub directory: PathBuf,

    /// Entry test files, relative to the current directory. A directory
    /// expands to every .js file beneath it.
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Asset root holding src/ replacements and tpl/main_tpl.js
    /// [default: $TAPE_XS_ASSETS, then the install root]
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Where the manifest and driver are written
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Configuration file [default: <DIRECTORY>/tape-xs.toml if present]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum number of modules to trace
    #[arg(long, value_name = "N")]
    pub max_modules: Option<usize>,

    /// Fail when two files map to the same module key
    #[arg(long)]
    pub strict_keys: bool,

    /// Print the manifest instead of writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Report every traced module
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let args = Args::try_parse_from(["tape-xs-build", "/pkg/", "test/a.js", "test/b.js"]).unwrap();
        assert_eq!(args.directory, PathBuf::from("/pkg/"));
        assert_eq!(args.files, vec!["test/a.js", "test/b.js"]);
        assert_eq!(args.out_dir, PathBuf::from("."));
        assert!(!args.strict_keys);
        assert!(args.max_modules.is_none());
    }

    #[test]
    fn test_requires_entry_files() {
        assert!(Args::try_parse_from(["tape-xs-build", "/pkg/"]).is_err());
        assert!(Args::try_parse_from(["tape-xs-build"]).is_err());
    }

    #[test]
    fn test_parse_options() {
        let args = Args::try_parse_from([
            "tape-xs-build",
            "--assets",
            "/opt/tape-xs",
            "--max-modules",
            "50",
            "--strict-keys",
            "--dry-run",
            "-v",
            "pkg",
            "test",
        ])
        .unwrap();
        assert_eq!(args.assets, Some(PathBuf::from("/opt/tape-xs")));
        assert_eq!(args.max_modules, Some(50));
        assert!(args.strict_keys && args.dry_run && args.verbose);
    }
}
