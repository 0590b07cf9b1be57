//! Backup Rotate - Main entry point
//!
//! Takes a fresh tar archive of the source directory, then thins the backup
//! directory back down to the configured maximum using logarithmic retention.

use anyhow::Result;
use backup_rotate::retention::{plan_deletions, BackupSet};
use backup_rotate::store::ArchiveStore;
use backup_rotate::{config::Config, utils};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Source directory path (overrides config)
    #[arg(short, long)]
    src_dir: Option<PathBuf>,

    /// Backup directory path (overrides config)
    #[arg(short, long)]
    backup_dir: Option<PathBuf>,

    /// Backup name prefix (overrides config)
    #[arg(short, long)]
    prefix: Option<String>,

    /// Expected time between backup runs, in seconds (overrides config)
    #[arg(short = 'i', long)]
    interval_secs: Option<i64>,

    /// Maximum number of backups kept (overrides config)
    #[arg(short, long)]
    max_kept: Option<usize>,

    /// Age at which a backup is outdated, in seconds (overrides config)
    #[arg(short, long)]
    outdated_secs: Option<i64>,

    /// Gzip-compress new backups
    #[arg(short, long)]
    compress: bool,

    /// Decide and report deletions without creating or removing anything
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,
}

impl Args {
    /// Fold CLI overrides into the loaded (or default) configuration.
    fn apply_to(&self, config: &mut Config) {
        if let Some(src_dir) = &self.src_dir {
            config.backup.src_dir = src_dir.clone();
        }
        if let Some(backup_dir) = &self.backup_dir {
            config.backup.backup_dir = backup_dir.clone();
        }
        if let Some(prefix) = &self.prefix {
            config.backup.prefix = prefix.clone();
        }
        if self.compress {
            config.backup.compress = true;
        }
        if let Some(interval) = self.interval_secs {
            config.retention.expected_interval_secs = interval;
        }
        if let Some(max_kept) = self.max_kept {
            config.retention.max_kept = max_kept;
        }
        if let Some(outdated) = self.outdated_secs {
            config.retention.outdated_age_secs = outdated;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = if let Some(config_path) = &args.config {
        Config::from_file(config_path)?
    } else {
        default_config()
    };
    args.apply_to(&mut config);
    config.validate()?;

    // Initialize logging
    let log_level = args.log_level.as_deref().unwrap_or(&config.log.level);
    utils::logger::init(log_level)?;

    info!(
        "Starting backup-rotate v{} ({} -> {})",
        env!("CARGO_PKG_VERSION"),
        config.backup.src_dir.display(),
        config.backup.backup_dir.display()
    );

    let store = ArchiveStore::new(&config.backup);
    let now = chrono::Local::now().naive_local();

    // Take the new backup first so it counts toward the retained set. A
    // failed archive run still leaves the directory worth cleaning.
    if args.dry_run {
        info!("Dry run: skipping archive creation");
    } else if let Err(e) = store.create(now) {
        error!(error = %e, "Backup creation failed, continuing with cleanup");
    }

    let set = BackupSet::new(store.list()?)?;
    let total = set.len();
    let victims = plan_deletions(set, &config.retention, now)?;

    if victims.is_empty() {
        info!(backups = total, "Nothing to clean");
        return Ok(());
    }

    if args.dry_run {
        for victim in &victims {
            info!(archive = %victim.name, "Would remove");
        }
        info!(backups = total, planned = victims.len(), "Dry run complete");
        return Ok(());
    }

    let failures = store.remove_all(&victims);
    info!(
        backups = total,
        removed = victims.len() - failures,
        failed = failures,
        "Cleanup complete"
    );
    if failures > 0 {
        anyhow::bail!("{failures} backup(s) could not be removed");
    }
    Ok(())
}

/// Configuration used when no file is given; directories must then come
/// from the command line.
fn default_config() -> Config {
    Config {
        backup: backup_rotate::config::BackupConfig {
            src_dir: PathBuf::new(),
            backup_dir: PathBuf::new(),
            prefix: "backup".to_string(),
            compress: false,
        },
        retention: Default::default(),
        log: Default::default(),
    }
}
