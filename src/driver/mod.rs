//! Finds Python files and documents them one at a time.

use crate::ast::Codegen;
use crate::config::Config;
use crate::doc::{DocGenerator, DocstringTransformer, TransformStats, UnitKinds};
use crate::error::Result;
use crate::parser::parse_module;
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SKIPPED_DIRS: &[&str] = &["__pycache__", "node_modules", "venv", "site-packages"];

/// Expands `paths` into the Python files they name, in a stable order and
/// without duplicates. Directories are searched recursively; hidden and
/// environment directories are left out.
pub fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let walker = WalkDir::new(path)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry));

            for entry in walker {
                match entry {
                    Ok(entry) if entry.file_type().is_file() && is_python_file(entry.path()) => {
                        if seen.insert(entry.path().to_path_buf()) {
                            files.push(entry.into_path());
                        }
                    }
                    Ok(_) => {}
                    Err(err) => warn!("Skipping unreadable entry under {}: {}", path.display(), err),
                }
            }
        } else if path.is_file() && is_python_file(path) {
            if seen.insert(path.clone()) {
                files.push(path.clone());
            }
        } else {
            warn!("Skipping {}: not a Python file or directory", path.display());
        }
    }

    files
}

fn is_python_file(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "py")
}

fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.iter().any(|dir| *dir == name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub changed: bool,
    pub stats: TransformStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_scanned: usize,
    pub files_changed: usize,
    pub files_failed: usize,
    pub documented: usize,
    pub unit_failures: usize,
}

impl RunSummary {
    fn record(&mut self, report: &FileReport) {
        if report.changed {
            self.files_changed += 1;
        }
        self.documented += report.stats.documented;
        self.unit_failures += report.stats.failed;
    }
}

pub struct Driver<'g, G: DocGenerator + ?Sized> {
    generator: &'g G,
    kinds: UnitKinds,
    indent_unit: String,
    check: bool,
}

impl<'g, G: DocGenerator + ?Sized> Driver<'g, G> {
    pub fn new(generator: &'g G, config: &Config) -> Self {
        Self {
            generator,
            kinds: config.kinds,
            indent_unit: config.indent_unit(),
            check: config.check,
        }
    }

    /// Documents one file's text and returns the new text.
    pub fn process_source(&self, source: &str) -> Result<(String, TransformStats)> {
        let module = parse_module(source)?;
        let outcome = DocstringTransformer::new(self.generator, self.kinds)
            .with_indent_unit(self.indent_unit.as_str())
            .transform(module);
        Ok((outcome.module.code(), outcome.stats))
    }

    /// Documents `path` in place. Nothing is written when the file fails to
    /// parse, is unchanged, or the driver only checks.
    pub fn process_file(&self, path: &Path) -> Result<FileReport> {
        info!("Processing {}", path.display());
        let source = fs::read_to_string(path)?;
        let (output, stats) = self.process_source(&source)?;
        let changed = output != source;

        if changed && !self.check {
            fs::write(path, &output)?;
            info!(
                "Wrote {} ({} docstrings added, {} failed)",
                path.display(),
                stats.documented,
                stats.failed
            );
        } else if changed {
            info!("{} would change", path.display());
        } else {
            debug!("{} unchanged", path.display());
        }

        Ok(FileReport {
            path: path.to_path_buf(),
            changed,
            stats,
        })
    }

    pub fn run(&self, paths: &[PathBuf]) -> RunSummary {
        let files = collect_files(paths);
        info!("Found {} Python files", files.len());

        let mut summary = RunSummary::default();
        for path in &files {
            summary.files_scanned += 1;
            match self.process_file(path) {
                Ok(report) => summary.record(&report),
                Err(err) => {
                    error!("Failed to process {}: {}", path.display(), err);
                    summary.files_failed += 1;
                }
            }
        }

        summary
    }
}
