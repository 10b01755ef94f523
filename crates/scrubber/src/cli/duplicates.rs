use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use console::style;
use scrubber_lib::index::DedupStats;
use scrubber_lib::util::{create_progress_bar, format_bytes};
use scrubber_lib::{DuplicateDetector, DuplicateGroup, FileRecord};

pub fn find_with_progress<'a>(
    detector: &mut DuplicateDetector,
    records: &'a [FileRecord],
    quiet: bool,
) -> Vec<DuplicateGroup<'a>> {
    println!(
        "{} Searching for duplicate files ({})...",
        style(">>>").cyan(),
        detector.algorithm()
    );

    if quiet {
        return detector.find_duplicates(records);
    }

    let pb = create_progress_bar(0, "Hashing candidates");
    let groups = detector.find_duplicates_with_progress(records, &mut |done, total| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    });
    pb.finish_and_clear();
    groups
}

pub fn print_groups(groups: &[DuplicateGroup<'_>], stats: &DedupStats) {
    if groups.is_empty() {
        println!("{}\n", style("No duplicates found").green());
        return;
    }

    println!(
        "{} Found {} duplicate groups ({} files, {} wasted)",
        style("✓").green(),
        style(groups.len()).yellow(),
        stats.duplicate_files,
        style(format_bytes(stats.wasted_bytes)).red()
    );
    if stats.hash_failures > 0 {
        println!("  Unreadable files skipped: {}", style(stats.hash_failures).yellow());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Group").fg(Color::Cyan),
        Cell::new("Hash").fg(Color::Cyan),
        Cell::new("Size").fg(Color::Cyan),
        Cell::new("Path").fg(Color::Cyan),
    ]);

    for (i, group) in groups.iter().enumerate() {
        let short_hash: String = group.hash.chars().take(12).collect();
        for (j, file) in group.files.iter().enumerate() {
            let (label, hash) = if j == 0 {
                ((i + 1).to_string(), short_hash.clone())
            } else {
                (String::new(), String::new())
            };
            table.add_row(vec![
                Cell::new(label),
                Cell::new(hash),
                Cell::new(format_bytes(file.size)),
                Cell::new(file.path.display()),
            ]);
        }
    }

    println!("{}\n", table);
}
