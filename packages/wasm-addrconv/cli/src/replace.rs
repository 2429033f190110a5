use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use wasm_addrconv::migrate::{default_jobs, DEFAULT_MAX_FILE_SIZE};
use wasm_addrconv::{MigrateConfig, MigrationReport, Migrator};

#[derive(Args)]
pub struct ReplaceArgs {
    /// Root of the file tree to rewrite (a single file is accepted too)
    path: PathBuf,
    /// Number of files processed concurrently [default: twice the number of CPUs]
    #[arg(short, long)]
    jobs: Option<usize>,
    /// Skip files of this size or larger, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE)]
    max_file_size: u64,
    /// Print the files that would be rewritten without modifying them
    #[arg(long)]
    dry_run: bool,
}

impl ReplaceArgs {
    fn config(&self) -> MigrateConfig {
        MigrateConfig::default()
            .with_jobs(self.jobs.unwrap_or_else(default_jobs))
            .with_max_file_size(self.max_file_size)
            .with_dry_run(self.dry_run)
    }
}

/// Per-file failures are logged by the migrator and do not fail the command.
pub fn handle_command(args: ReplaceArgs) -> Result<()> {
    fs::symlink_metadata(&args.path)
        .with_context(|| format!("Failed to access {}", args.path.display()))?;

    let report = Migrator::new(args.config()).run(&args.path);
    if args.dry_run {
        print_dry_run(&report);
    }
    Ok(())
}

fn print_dry_run(report: &MigrationReport) {
    for file in &report.rewritten {
        println!("{}\t{}", file.substitutions, file.path.display());
    }
}
