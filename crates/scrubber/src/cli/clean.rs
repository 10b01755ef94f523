use anyhow::Result;
use console::style;
use scrubber_lib::util::format_bytes;
use scrubber_lib::{DeleteOptions, DeleteOutcome, Deleter, FileRecord, RemovalBackend, TerminalPrompter};

pub fn print_dry_run(candidates: &[&FileRecord]) {
    let total: u64 = candidates.iter().map(|r| r.size).sum();
    println!(
        "{} Auto-clean candidates: {} ({})",
        style(">>>").cyan(),
        style(candidates.len()).yellow(),
        format_bytes(total)
    );
    for record in candidates {
        println!("  {} {}", style("would remove").dim(), record.path.display());
    }
    println!("{}", style("Dry run: no files were deleted").yellow());
}

pub fn run_delete(
    backend: Box<dyn RemovalBackend>,
    candidates: &[&FileRecord],
    assume_yes: bool,
    interactive: bool,
) -> Result<()> {
    println!(
        "{} Auto-clean candidates: {} (via {})",
        style(">>>").cyan(),
        style(candidates.len()).yellow(),
        backend.name()
    );
    if candidates.is_empty() {
        return Ok(());
    }

    let deleter = Deleter::new(backend);
    let options = DeleteOptions {
        confirm: assume_yes,
        interactive,
    };
    let report = deleter.delete(candidates, options, &mut TerminalPrompter::new())?;

    if report.aborted {
        println!("{}", style("Aborted").yellow());
        return Ok(());
    }

    for (path, outcome) in &report.outcomes {
        match outcome {
            DeleteOutcome::Removed => println!("  {} {}", style("✓").green(), path.display()),
            DeleteOutcome::Skipped => println!("  {} {}", style("skipped").dim(), path.display()),
            DeleteOutcome::Failed(reason) => {
                println!("  {} {}: {}", style("✗").red(), path.display(), reason)
            }
        }
    }

    println!(
        "\n{} Removed {} files ({}), skipped {}, failed {}",
        style("✓").green(),
        report.removed_count(),
        format_bytes(report.removed_bytes),
        report.skipped_count(),
        report.failed_count()
    );

    Ok(())
}
