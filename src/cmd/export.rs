//! Export command CLI handler.

use crate::extract::{self, ExtractConfig, ExtractStats, TableKind};
use crate::input::Compression;
use std::path::PathBuf;
use std::time::Instant;

pub fn run(
    file: PathBuf,
    table: String,
    output: Option<PathBuf>,
    max_lines: Option<usize>,
    progress: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let table = table
        .parse::<TableKind>()
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let output = output.unwrap_or_else(|| PathBuf::from(table.default_output()));

    if !file.exists() {
        anyhow::bail!("input file does not exist: {}", file.display());
    }

    let file_size = std::fs::metadata(&file)?.len();
    let file_size_mb = file_size as f64 / (1024.0 * 1024.0);

    let compression = Compression::from_path(&file);
    if compression != Compression::None {
        println!("Detected compression: {}", compression);
    }

    println!(
        "Extracting `{}` from {} ({:.2} MB)",
        table.table_name(),
        file.display(),
        file_size_mb
    );

    let start_time = Instant::now();

    let config = ExtractConfig {
        input: file,
        output: output.clone(),
        table,
        max_lines,
        progress,
        dry_run,
    };
    let stats = extract::run(&config)?;

    let elapsed = start_time.elapsed();

    println!("Found {} records", stats.records_found);
    if stats.records_skipped > 0 {
        println!("Skipped {} malformed records", stats.records_skipped);
    }

    if dry_run {
        println!("(Dry run - no output written)");
    } else {
        println!(
            "Saved {} records to {}",
            stats.records_exported,
            output.display()
        );
    }

    print_summary(&stats, table);

    println!();
    println!("✓ Completed in {:.3?}", elapsed);

    Ok(())
}

fn print_summary(stats: &ExtractStats, table: TableKind) {
    let summary = &stats.summary;

    println!();
    println!("Non-deleted records: {}", summary.live_records);

    if summary.groups.is_empty() {
        return;
    }

    println!("Records per {}:", table.group_label());
    for group in &summary.groups {
        match group.published {
            Some(published) => println!(
                "  {} {}: {} records ({} published)",
                table.group_label(),
                group.key,
                group.records,
                published
            ),
            None => println!(
                "  {} {}: {} records",
                table.group_label(),
                group.key,
                group.records
            ),
        }
    }

    if summary.group_total > summary.groups.len() {
        println!(
            "  ... ({} more {}s)",
            summary.group_total - summary.groups.len(),
            table.group_label()
        );
    }
}
