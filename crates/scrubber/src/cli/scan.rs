use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use console::style;
use scrubber_lib::util::{create_spinner, format_bytes, format_timestamp};
use scrubber_lib::{scan_directory, summarize, top_files, Classifier, FileRecord, Result, ScanOptions, ScanOutcome};
use std::path::Path;

pub fn run_scan(path: &Path, options: &ScanOptions, quiet: bool) -> Result<ScanOutcome> {
    println!("{} Scanning {}...", style(">>>").cyan(), style(path.display()).bold());

    let spinner = (!quiet).then(|| {
        let spinner = create_spinner("Walking directory tree");
        spinner.enable_steady_tick(std::time::Duration::from_millis(120));
        spinner
    });

    let outcome = scan_directory(path, options);

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let outcome = outcome?;

    let stats = &outcome.stats;
    println!("\n{} Scan completed", style("✓").green());
    println!("  Files matched: {}", style(stats.files_matched).cyan());
    println!("  Directories scanned: {}", style(stats.dirs_scanned).cyan());
    if stats.dirs_excluded > 0 {
        println!("  Directories excluded: {}", style(stats.dirs_excluded).dim());
    }
    if stats.skipped_too_small + stats.skipped_too_new > 0 {
        println!(
            "  Filtered out: {} too small, {} too new",
            stats.skipped_too_small, stats.skipped_too_new
        );
    }
    if stats.errors > 0 {
        println!("  Errors: {}", style(stats.errors).yellow());
    }

    Ok(outcome)
}

pub fn print_summary(outcome: &ScanOutcome, classifier: &Classifier) {
    let summary = summarize(&outcome.records, classifier);

    println!("\n{}", style("Scan Summary").bold());
    println!("{}", style("─".repeat(60)).dim());
    println!("  Root: {}", outcome.root.display());
    println!("  Total files: {}", style(summary.total_files).cyan());
    println!("  Total size: {}\n", style(format_bytes(summary.total_bytes)).cyan());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Category").fg(Color::Cyan),
        Cell::new("Files").fg(Color::Cyan),
        Cell::new("Size").fg(Color::Cyan),
    ]);

    for (category, totals) in &summary.by_category {
        table.add_row(vec![
            Cell::new(category.as_str()),
            Cell::new(totals.files),
            Cell::new(format_bytes(totals.bytes)),
        ]);
    }

    println!("{}", table);
    println!(
        "  Reclaimable (temp, cache, update): {}\n",
        style(format_bytes(summary.reclaimable_bytes())).yellow()
    );
}

pub fn print_top(records: &[FileRecord], n: usize) {
    let top = top_files(records, n);
    if top.is_empty() {
        return;
    }

    println!("\n{}", style(format!("Top {} largest files", top.len())).bold());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Size").fg(Color::Cyan),
        Cell::new("Modified").fg(Color::Cyan),
        Cell::new("Path").fg(Color::Cyan),
    ]);

    for record in top {
        table.add_row(vec![
            Cell::new(format_bytes(record.size)),
            Cell::new(format_timestamp(&record.modified)),
            Cell::new(record.path.display()),
        ]);
    }

    println!("{}", table);
}
