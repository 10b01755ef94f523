pub mod clean;
pub mod duplicates;
pub mod scan;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use scrubber_lib::util::parse_size_string;
use scrubber_lib::{
    select_backend, write_json_report, AutoCleanSelector, Classifier, Config, DuplicateDetector,
    HashAlgorithm, ScanOptions, Settings,
};
use std::path::PathBuf;

pub const DEFAULT_TOP: usize = 20;

#[derive(Parser)]
#[command(name = "scrubber")]
#[command(about = "Scan and clean storage to free space", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(default_value = ".", help = "Path to scan")]
    pub path: PathBuf,

    #[arg(long, help = "Don't delete anything; just report")]
    pub dry_run: bool,

    #[arg(long, help = "Delete files matching the auto-clean rules (temp, cache, updates)")]
    pub auto_clean: bool,

    #[arg(long, help = "Find duplicate files by content (may be slow)")]
    pub find_duplicates: bool,

    #[arg(long, help = "Show the N largest files [default: 20]")]
    pub top: Option<usize>,

    #[arg(long, help = "Path substring or glob to exclude (repeatable)")]
    pub exclude: Vec<String>,

    #[arg(long, help = "Ask per file before deleting during auto-clean")]
    pub interactive_delete: bool,

    #[arg(long, help = "Permanently delete files instead of moving them to the trash (dangerous)")]
    pub permanent: bool,

    #[arg(long, help = "Minimum file size to consider, e.g. 4096 or 10MB")]
    pub min_size: Option<String>,

    #[arg(long, help = "Minimum file age in days to consider")]
    pub min_age: Option<u64>,

    #[arg(long, help = "Write a JSON report to this file")]
    pub report_json: Option<PathBuf>,

    #[arg(long, short = 'y', help = "Assume yes for the delete confirmation")]
    pub yes: bool,

    #[arg(long, help = "Path to a scrubber.toml config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Hash algorithm for duplicates: blake3 or md5")]
    pub hash_algorithm: Option<String>,

    #[arg(long, short = 'v', help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, short = 'q', help = "Suppress progress output")]
    pub quiet: bool,
}

/// Effective settings after merging flags over the config file.
struct RunOptions {
    scan: ScanOptions,
    top: usize,
    algorithm: HashAlgorithm,
}

fn resolve_options(cli: &Cli, settings: &Settings) -> Result<RunOptions> {
    let mut exclude_patterns = cli.exclude.clone();
    exclude_patterns.extend(settings.scan.exclude.iter().cloned());

    let min_size = match &cli.min_size {
        Some(s) => parse_size_string(s).map_err(anyhow::Error::msg).context("Invalid --min-size")?,
        None => settings.scan.min_size_bytes()?.unwrap_or(0),
    };

    let algorithm = match &cli.hash_algorithm {
        Some(s) => s.parse::<HashAlgorithm>()?,
        None => settings.scan.hash_algorithm()?.unwrap_or_default(),
    };

    Ok(RunOptions {
        scan: ScanOptions {
            min_size,
            min_age_days: cli.min_age.or(settings.scan.min_age_days).unwrap_or(0),
            exclude_patterns,
        },
        top: cli.top.or(settings.scan.top).unwrap_or(DEFAULT_TOP),
        algorithm,
    })
}

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.clone()).context("Failed to load configuration")?;
    let options = resolve_options(&cli, &config.settings)?;

    // A missing trash facility is fatal before anything is scanned.
    let backend = if cli.auto_clean && !cli.dry_run {
        Some(select_backend(cli.permanent)?)
    } else {
        None
    };

    let outcome = scan::run_scan(&cli.path, &options.scan, cli.quiet)
        .with_context(|| format!("Failed to scan {}", cli.path.display()))?;
    let records = &outcome.records;

    let classifier = Classifier::with_overrides(&config.settings.rules);
    scan::print_summary(&outcome, &classifier);

    let mut detector = DuplicateDetector::new(options.algorithm);
    if cli.find_duplicates {
        let groups = duplicates::find_with_progress(&mut detector, records, cli.quiet);
        duplicates::print_groups(&groups, detector.stats());
    }

    if let Some(report_path) = &cli.report_json {
        write_json_report(report_path, &outcome.root, records, detector.hashes())
            .with_context(|| format!("Failed to write report to {}", report_path.display()))?;
        println!(
            "{} Wrote JSON report to {}",
            style("✓").green(),
            report_path.display()
        );
    }

    if cli.auto_clean {
        let selector = AutoCleanSelector::with_overrides(&config.settings.rules);
        let candidates = selector.select(records);
        match backend {
            Some(backend) => clean::run_delete(backend, &candidates, cli.yes, cli.interactive_delete)?,
            None => clean::print_dry_run(&candidates),
        }
    }

    scan::print_top(records, options.top);

    Ok(())
}
