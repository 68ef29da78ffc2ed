//! Directory tree mirroring
//!
//! Walks a source tree and replicates it under a destination root: directories
//! are created, gemtext documents are converted to HTML and every other file is
//! copied byte for byte. Nothing that already exists at the destination is
//! overwritten. Failures are recorded in the [`MirrorReport`] and never abort
//! the walk.

use crate::converter::{convert_reader, ConvertError};
use crate::diagnostic::Diagnostic;
use crate::report::MirrorReport;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

pub const DEFAULT_MARKUP_EXTENSION: &str = "gmi";
pub const DEFAULT_OUTPUT_EXTENSION: &str = "html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorOptions {
    /// Extension, without the dot, of files that are converted
    pub markup_extension: String,
    /// Extension given to converted files
    pub output_extension: String,
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self {
            markup_extension: DEFAULT_MARKUP_EXTENSION.to_string(),
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
        }
    }
}

impl MirrorOptions {
    pub fn with_markup_extension(mut self, extension: impl Into<String>) -> Self {
        self.markup_extension = extension.into();
        self
    }

    pub fn with_output_extension(mut self, extension: impl Into<String>) -> Self {
        self.output_extension = extension.into();
        self
    }

    /// Name of the converted file for `file_name`, or `None` if it is not a
    /// markup document. Matching is a case-sensitive suffix test on `.<ext>`.
    pub fn converted_name(&self, file_name: &str) -> Option<String> {
        let suffix = format!(".{}", self.markup_extension);
        let stem = file_name.strip_suffix(suffix.as_str())?;
        Some(format!("{}.{}", stem, self.output_extension))
    }
}

/// Failure of a single filesystem operation during the walk
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("failed to create directory: {source}")]
    CreateDir {
        #[source]
        source: io::Error,
        path: PathBuf,
    },
    #[error("failed to read directory: {source}")]
    ReadDir {
        #[source]
        source: io::Error,
        path: PathBuf,
    },
    #[error("failed to copy file: {source}")]
    Copy {
        #[source]
        source: io::Error,
        path: PathBuf,
    },
    #[error("failed to open document: {source}")]
    Open {
        #[source]
        source: io::Error,
        path: PathBuf,
    },
    #[error("failed to create output file: {source}")]
    Create {
        #[source]
        source: io::Error,
        path: PathBuf,
    },
    #[error("failed to read document: {source}")]
    Read {
        #[source]
        source: io::Error,
        path: PathBuf,
    },
    #[error("failed to write output file: {source}")]
    Write {
        #[source]
        source: io::Error,
        path: PathBuf,
    },
}

impl MirrorError {
    pub fn path(&self) -> &Path {
        match self {
            MirrorError::CreateDir { path, .. }
            | MirrorError::ReadDir { path, .. }
            | MirrorError::Copy { path, .. }
            | MirrorError::Open { path, .. }
            | MirrorError::Create { path, .. }
            | MirrorError::Read { path, .. }
            | MirrorError::Write { path, .. } => path,
        }
    }
}

impl From<MirrorError> for Diagnostic {
    fn from(err: MirrorError) -> Self {
        Diagnostic::error(err.to_string(), Some(err.path()))
    }
}

/// What happened to one visited entry
enum Outcome {
    Created,
    Converted { lines: usize },
    Copied,
    Skipped,
}

pub struct TreeMirror {
    source_root: PathBuf,
    dest_root: PathBuf,
    options: MirrorOptions,
}

impl TreeMirror {
    pub fn new(source_root: impl Into<PathBuf>, dest_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            dest_root: dest_root.into(),
            options: MirrorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MirrorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &MirrorOptions {
        &self.options
    }

    /// Same relative path as `entry`, re-rooted under the destination root
    pub fn destination_for(&self, entry: &Path) -> PathBuf {
        let relative = entry.strip_prefix(&self.source_root).unwrap_or(entry);
        self.dest_root.join(relative)
    }

    /// Walk the whole source tree. Entry order between siblings is by file name.
    /// Directory symlinks are recreated as plain directories and not followed.
    pub fn run(&self) -> MirrorReport {
        let start_time = Instant::now();
        let mut report = MirrorReport::new(&self.source_root, &self.dest_root);
        log::info!(
            "Mirroring {} into {}",
            self.source_root.display(),
            self.dest_root.display()
        );

        // A destination nested in the source must not be walked into.
        let excluded = fs::canonicalize(&self.dest_root).ok();
        self.visit_dir(&self.source_root, excluded.as_deref(), &mut report);

        report.duration_ms = start_time.elapsed().as_millis() as u64;
        log::info!(
            "Mirrored {} documents, {} files, {} directories ({} warnings, {} errors)",
            report.statistics.documents_converted,
            report.statistics.files_copied,
            report.statistics.directories_created,
            report.statistics.warning_count,
            report.statistics.error_count
        );
        report
    }

    fn visit_dir(&self, dir: &Path, excluded: Option<&Path>, report: &mut MirrorReport) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(source) => {
                report.add_diagnostic(
                    MirrorError::ReadDir {
                        source,
                        path: dir.to_path_buf(),
                    }
                    .into(),
                );
                return;
            }
        };

        // (path, is_dir, is_symlink); the type is taken without following links
        let mut paths = Vec::new();
        for entry in entries {
            match entry.and_then(|e| Ok((e.path(), e.file_type()?))) {
                Ok((path, file_type)) => {
                    let is_symlink = file_type.is_symlink();
                    let is_dir = if is_symlink { path.is_dir() } else { file_type.is_dir() };
                    paths.push((path, is_dir, is_symlink));
                }
                Err(source) => report.add_diagnostic(
                    MirrorError::ReadDir {
                        source,
                        path: dir.to_path_buf(),
                    }
                    .into(),
                ),
            }
        }
        paths.sort();

        for (path, is_dir, is_symlink) in paths {
            if is_dir {
                if excluded.is_some() && fs::canonicalize(&path).ok().as_deref() == excluded {
                    log::debug!("Skipping destination tree {}", path.display());
                    continue;
                }
                let outcome = self.mirror_directory(&path, report);
                self.record(outcome, report);
                // Symlinked directories are mirrored but never descended into.
                if is_symlink {
                    log::debug!("Not following directory symlink {}", path.display());
                } else {
                    self.visit_dir(&path, excluded, report);
                }
            } else {
                let outcome = self.mirror_file(&path, report);
                self.record(outcome, report);
            }
        }
    }

    fn record(&self, outcome: Option<Outcome>, report: &mut MirrorReport) {
        let stats = &mut report.statistics;
        match outcome {
            Some(Outcome::Created) => stats.directories_created += 1,
            Some(Outcome::Converted { lines }) => {
                stats.documents_converted += 1;
                stats.lines_converted += lines;
            }
            Some(Outcome::Copied) => stats.files_copied += 1,
            Some(Outcome::Skipped) => stats.entries_skipped += 1,
            None => {}
        }
    }

    /// Returns `None` when the operation failed and an error was recorded.
    fn mirror_directory(&self, source: &Path, report: &mut MirrorReport) -> Option<Outcome> {
        let dest = self.destination_for(source);
        log::debug!("Directory {} -> {}", source.display(), dest.display());
        if dest.exists() {
            report.add_diagnostic(Diagnostic::warning("directory exists", &dest));
            return Some(Outcome::Skipped);
        }
        match fs::create_dir(&dest) {
            Ok(()) => Some(Outcome::Created),
            Err(source) => {
                report.add_diagnostic(MirrorError::CreateDir { source, path: dest }.into());
                None
            }
        }
    }

    fn mirror_file(&self, source: &Path, report: &mut MirrorReport) -> Option<Outcome> {
        let dest = self.destination_for(source);
        let converted = source
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| self.options.converted_name(name));

        match converted {
            Some(name) => {
                let target = dest.with_file_name(name);
                log::debug!("Document {} -> {}", source.display(), target.display());
                if target.exists() {
                    report.add_diagnostic(Diagnostic::warning("file exists", &target));
                    return Some(Outcome::Skipped);
                }
                match convert_document(source, &target) {
                    Ok((lines, truncated)) => {
                        if truncated {
                            report.add_diagnostic(Diagnostic::warning(
                                "missing closing fence",
                                source,
                            ));
                        }
                        Some(Outcome::Converted { lines })
                    }
                    Err(err) => {
                        report.add_diagnostic(err.into());
                        None
                    }
                }
            }
            None => {
                log::debug!("File {} -> {}", source.display(), dest.display());
                if dest.exists() {
                    report.add_diagnostic(Diagnostic::warning("file exists", &dest));
                    return Some(Outcome::Skipped);
                }
                match fs::copy(source, &dest) {
                    Ok(_) => Some(Outcome::Copied),
                    Err(err) => {
                        report.add_diagnostic(
                            MirrorError::Copy {
                                source: err,
                                path: source.to_path_buf(),
                            }
                            .into(),
                        );
                        None
                    }
                }
            }
        }
    }
}

/// Convert `source` into a new file at `target`, returning the number of
/// source lines and whether the document ended inside a preformatted block.
/// A partially written target is removed on failure.
fn convert_document(source: &Path, target: &Path) -> Result<(usize, bool), MirrorError> {
    let input = File::open(source).map_err(|source_err| MirrorError::Open {
        source: source_err,
        path: source.to_path_buf(),
    })?;
    let output = File::create(target).map_err(|source_err| MirrorError::Create {
        source: source_err,
        path: target.to_path_buf(),
    })?;

    match convert_reader(BufReader::new(input), BufWriter::new(output)) {
        Ok(summary) => Ok((summary.source_lines, summary.truncated_preformat)),
        Err(err) => {
            if let Err(remove_err) = fs::remove_file(target) {
                log::debug!("Could not remove {}: {}", target.display(), remove_err);
            }
            Err(match err {
                ConvertError::Read(source_err) => MirrorError::Read {
                    source: source_err,
                    path: source.to_path_buf(),
                },
                ConvertError::Write(source_err) => MirrorError::Write {
                    source: source_err,
                    path: target.to_path_buf(),
                },
            })
        }
    }
}

/// Mirror `source_root` into `dest_root` with default options
pub fn mirror(source_root: &Path, dest_root: &Path) -> MirrorReport {
    TreeMirror::new(source_root, dest_root).run()
}
