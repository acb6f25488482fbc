use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use crate::analyze::extract_imports;
use crate::error::{BuildError, Result};
use crate::resolve::{is_graph_module, normalize_path, SourceReader, SpecifierResolver};
use crate::types::{DependencyRecord, EntryFile};

/// Default cap on the number of modules a single build may trace
pub const DEFAULT_MAX_MODULES: usize = 10_000;

/// Every module statically reachable from a set of entry files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Closure {
    /// Entry files in the order they were given
    pub entries: Vec<EntryFile>,
    /// Entry records first, then discovered modules in discovery order
    pub records: Vec<DependencyRecord>,
}

impl Closure {
    /// Identifiers the driver uses to load each entry
    pub fn entry_specifiers(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.specifier.clone()).collect()
    }
}

/// Depth-first traversal of static imports
pub struct ClosureBuilder {
    reader: Arc<dyn SourceReader>,
    resolver: Arc<dyn SpecifierResolver>,
    accept: fn(&str) -> bool,
    max_modules: usize,
}

impl ClosureBuilder {
    pub fn new(reader: Arc<dyn SourceReader>, resolver: Arc<dyn SpecifierResolver>) -> Self {
        Self {
            reader,
            resolver,
            accept: is_graph_module,
            max_modules: DEFAULT_MAX_MODULES,
        }
    }

    /// Replace the predicate deciding which specifiers belong in the graph
    pub fn with_filter(mut self, accept: fn(&str) -> bool) -> Self {
        self.accept = accept;
        self
    }

    pub fn with_max_modules(mut self, max_modules: usize) -> Self {
        self.max_modules = max_modules;
        self
    }

    /// Trace all modules reachable from `entries`.
    ///
    /// Each file is recorded once, keyed on its resolved absolute path; the
    /// first specifier that reaches a file names it. Fails on the first
    /// unreadable or unresolvable module.
    pub async fn build(&self, entries: &[EntryFile]) -> Result<Closure> {
        let seeds: Vec<DependencyRecord> = entries.iter().map(EntryFile::record).collect();

        let mut visited: HashSet<PathBuf> = seeds.iter().map(|r| r.filename.clone()).collect();
        let mut out = seeds.clone();
        let mut queue = seeds;

        if out.len() > self.max_modules {
            return Err(BuildError::TooManyModules {
                limit: self.max_modules,
            });
        }

        while let Some(current) = queue.pop() {
            let source = self.reader.read(&current.filename).await?;

            for specifier in extract_imports(&source) {
                if !(self.accept)(&specifier) {
                    continue;
                }

                let resolved = self.resolver.resolve(&specifier, &current.filename)?;
                let filename = normalize_path(&resolved);
                if !visited.insert(filename.clone()) {
                    continue;
                }

                if out.len() >= self.max_modules {
                    return Err(BuildError::TooManyModules {
                        limit: self.max_modules,
                    });
                }

                let record = DependencyRecord::new(specifier, filename);
                out.push(record.clone());
                queue.push(record);
            }
        }

        Ok(Closure {
            entries: entries.to_vec(),
            records: out,
        })
    }
}
