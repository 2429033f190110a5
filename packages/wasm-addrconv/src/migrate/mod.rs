//! Bulk migration of legacy addresses in a file tree.
//!
//! The calling thread walks the tree and feeds regular files into a bounded
//! queue consumed by a fixed group of worker threads. The queue capacity equals
//! the number of workers, so traversal only blocks when every worker is busy
//! and a full queue is waiting. [`Migrator::run`] returns once every queued
//! file has been processed.
//!
//! Failures are isolated: an address that does not convert is left in place,
//! and a file that cannot be read or written is skipped. Every failure ends up
//! in the returned [`MigrationReport`] and is logged at error level.

mod scan;
mod walk;

pub use scan::{rewrite_content, Rewrite, LEGACY_ADDRESS_REGEX};

use crate::address::AddressError;
use parking_lot::Mutex;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Files of this size or larger are skipped by default (1 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1 << 20;

/// Default number of files processed concurrently.
pub fn default_jobs() -> usize {
    std::cmp::max(1, num_cpus::get() * 2)
}

/// Settings of a migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateConfig {
    /// Number of worker threads, and capacity of the file queue.
    pub jobs: usize,
    /// Files of this size or larger are not scanned.
    pub max_file_size: u64,
    /// Compute replacements without writing them.
    pub dry_run: bool,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            jobs: default_jobs(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            dry_run: false,
        }
    }
}

impl MigrateConfig {
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = std::cmp::max(1, jobs);
        self
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    Stat,
    ReadDir,
    Read,
    Write,
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoOp::Stat => write!(f, "failed to read file info"),
            IoOp::ReadDir => write!(f, "failed to read directory"),
            IoOp::Read => write!(f, "failed to read file"),
            IoOp::Write => write!(f, "failed to rewrite file"),
        }
    }
}

#[derive(Debug)]
pub enum MigrateError {
    Io {
        path: PathBuf,
        op: IoOp,
        source: io::Error,
    },
    Convert {
        path: PathBuf,
        address: String,
        source: AddressError,
    },
}

impl MigrateError {
    pub fn io(path: impl Into<PathBuf>, op: IoOp, source: io::Error) -> Self {
        MigrateError::Io {
            path: path.into(),
            op,
            source,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            MigrateError::Io { path, .. } | MigrateError::Convert { path, .. } => path,
        }
    }
}

impl fmt::Display for MigrateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrateError::Io { path, op, source } => {
                write!(f, "{}: {}: {}", op, path.display(), source)
            }
            MigrateError::Convert {
                path,
                address,
                source,
            } => write!(
                f,
                "failed to convert address: {}: {}: {}",
                path.display(),
                address,
                source
            ),
        }
    }
}

impl std::error::Error for MigrateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MigrateError::Io { source, .. } => Some(source),
            MigrateError::Convert { source, .. } => Some(source),
        }
    }
}

/// A file in which at least one address was replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenFile {
    pub path: PathBuf,
    pub substitutions: usize,
}

/// Outcome of a migration run, sorted by path.
#[derive(Debug, Default)]
pub struct MigrationReport {
    /// Regular files handed to the workers.
    pub files_visited: usize,
    /// Files rewritten (or that would be, in a dry run).
    pub rewritten: Vec<RewrittenFile>,
    pub failures: Vec<MigrateError>,
}

impl MigrationReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record_failure(&mut self, error: MigrateError) {
        tracing::error!("{}", error);
        self.failures.push(error);
    }

    fn sort(&mut self) {
        self.rewritten.sort_by(|a, b| a.path.cmp(&b.path));
        // stable, keeps per-file failures in match order
        self.failures.sort_by(|a, b| a.path().cmp(b.path()));
    }
}

/// Rewrites legacy addresses in every file under a root path.
#[derive(Debug, Clone, Default)]
pub struct Migrator {
    config: MigrateConfig,
}

impl Migrator {
    pub fn new(config: MigrateConfig) -> Self {
        Self { config }
    }

    /// Migrate every regular file under `root` (or `root` itself if it is a file).
    pub fn run(&self, root: impl AsRef<Path>) -> MigrationReport {
        let root = root.as_ref();
        let jobs = std::cmp::max(1, self.config.jobs);
        let report = Mutex::new(MigrationReport::default());
        let (sender, receiver) = crossbeam::channel::bounded::<PathBuf>(jobs);

        std::thread::scope(|scope| {
            for _ in 0..jobs {
                let receiver = receiver.clone();
                let report = &report;
                scope.spawn(move || {
                    for path in receiver.iter() {
                        self.process_file(&path, report);
                    }
                });
            }
            drop(receiver);

            walk::walk_files(
                root,
                &mut |path| {
                    report.lock().files_visited += 1;
                    if let Err(e) = sender.send(path) {
                        tracing::error!("no worker left to process {}", e.0.display());
                    }
                },
                &mut |error| report.lock().record_failure(error),
            );
            // workers exit once the queue is drained
            drop(sender);
        });

        let mut report = report.into_inner();
        report.sort();
        tracing::info!(
            "visited {} files, {} {}, {} errors",
            report.files_visited,
            report.rewritten.len(),
            if self.config.dry_run {
                "would be rewritten"
            } else {
                "rewritten"
            },
            report.failures.len()
        );
        report
    }

    fn process_file(&self, path: &Path, report: &Mutex<MigrationReport>) {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) => return report.lock().record_failure(MigrateError::io(path, IoOp::Stat, e)),
        };
        if metadata.len() >= self.config.max_file_size {
            tracing::debug!("skipping large file {}", path.display());
            return;
        }

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => return report.lock().record_failure(MigrateError::io(path, IoOp::Read, e)),
        };
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(_) => {
                tracing::debug!("skipping non-text file {}", path.display());
                return;
            }
        };

        let Rewrite {
            content: rewritten,
            substitutions,
            failures,
        } = rewrite_content(&content);

        let mut written = None;
        if let Some(rewritten) = rewritten {
            // truncating the existing file keeps its permissions
            if self.config.dry_run {
                written = Some(Ok(()));
            } else {
                written = Some(fs::write(path, rewritten));
            }
        }

        let mut report = report.lock();
        for (address, source) in failures {
            report.record_failure(MigrateError::Convert {
                path: path.to_path_buf(),
                address,
                source,
            });
        }
        match written {
            Some(Ok(())) => {
                tracing::info!("{} addresses replaced in {}", substitutions, path.display());
                report.rewritten.push(RewrittenFile {
                    path: path.to_path_buf(),
                    substitutions,
                });
            }
            Some(Err(e)) => report.record_failure(MigrateError::io(path, IoOp::Write, e)),
            None => {}
        }
    }
}

/// Migrate the tree under `root` with the default configuration.
pub fn migrate(root: impl AsRef<Path>) -> MigrationReport {
    Migrator::default().run(root)
}
