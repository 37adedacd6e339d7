//! The extraction pipeline.
//!
//! locate the table's INSERT statement → reassemble its value tuples →
//! tokenize and map each one → write the JSON array → build the summary.
//! Malformed records are reported and skipped; a missing INSERT statement
//! aborts the run before any output is written.

use crate::input;
use crate::locator;
use crate::model::{Program, ProgramUnit, TableRecord, VideoMaterial};
use crate::record::RecordScanner;
use crate::report::{self, Summary};
use crate::tokenizer;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Characters of a rejected record shown in the skip report
const PREVIEW_LEN: usize = 100;

/// Built-in table schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Programs,
    Units,
    VideoMaterials,
}

impl TableKind {
    pub const ALL: [TableKind; 3] = [
        TableKind::Programs,
        TableKind::Units,
        TableKind::VideoMaterials,
    ];

    /// Table name inside the dump
    pub fn table_name(&self) -> &'static str {
        match self {
            TableKind::Programs => Program::TABLE,
            TableKind::Units => ProgramUnit::TABLE,
            TableKind::VideoMaterials => VideoMaterial::TABLE,
        }
    }

    pub fn field_count(&self) -> usize {
        match self {
            TableKind::Programs => Program::FIELD_COUNT,
            TableKind::Units => ProgramUnit::FIELD_COUNT,
            TableKind::VideoMaterials => VideoMaterial::FIELD_COUNT,
        }
    }

    pub fn scan_limit(&self) -> Option<usize> {
        match self {
            TableKind::Programs => Program::SCAN_LIMIT,
            TableKind::Units => ProgramUnit::SCAN_LIMIT,
            TableKind::VideoMaterials => VideoMaterial::SCAN_LIMIT,
        }
    }

    pub fn group_label(&self) -> &'static str {
        match self {
            TableKind::Programs => Program::group_label(),
            TableKind::Units => ProgramUnit::group_label(),
            TableKind::VideoMaterials => VideoMaterial::group_label(),
        }
    }

    /// Default output file name for this table
    pub fn default_output(&self) -> &'static str {
        match self {
            TableKind::Programs => "programs.json",
            TableKind::Units => "program_units.json",
            TableKind::VideoMaterials => "video_materials.json",
        }
    }
}

impl std::str::FromStr for TableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "programs" => Ok(TableKind::Programs),
            "units" => Ok(TableKind::Units),
            "video-materials" | "video_materials" => Ok(TableKind::VideoMaterials),
            _ => Err(format!(
                "unknown table: {} (expected programs, units, or video-materials)",
                s
            )),
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::Programs => write!(f, "programs"),
            TableKind::Units => write!(f, "units"),
            TableKind::VideoMaterials => write!(f, "video-materials"),
        }
    }
}

/// Configuration for one export run
#[derive(Debug)]
pub struct ExtractConfig {
    /// Input SQL dump
    pub input: PathBuf,
    /// Output JSON file
    pub output: PathBuf,
    /// Which built-in schema to extract
    pub table: TableKind,
    /// Overrides the schema's built-in scan bound when set
    pub max_lines: Option<usize>,
    /// Show progress while scanning
    pub progress: bool,
    /// Parse and summarize without writing the JSON file
    pub dry_run: bool,
}

/// Statistics from one export run
#[derive(Debug, Default)]
pub struct ExtractStats {
    /// Raw tuples reassembled from the dump
    pub records_found: u64,
    /// Records that mapped cleanly and were written
    pub records_exported: u64,
    /// Records rejected by the field mapper
    pub records_skipped: u64,
    /// Group breakdown for the stdout summary
    pub summary: Summary,
}

pub fn run(config: &ExtractConfig) -> anyhow::Result<ExtractStats> {
    match config.table {
        TableKind::Programs => run_table::<Program>(config),
        TableKind::Units => run_table::<ProgramUnit>(config),
        TableKind::VideoMaterials => run_table::<VideoMaterial>(config),
    }
}

fn run_table<T: TableRecord>(config: &ExtractConfig) -> anyhow::Result<ExtractStats> {
    if !config.input.exists() {
        anyhow::bail!("input file does not exist: {}", config.input.display());
    }

    let lines = input::read_lines(&config.input)?;

    let marker = locator::insert_marker(T::TABLE);
    let start = locator::find_marker(&lines, &marker).with_context(|| {
        format!(
            "could not find `{}` INSERT statement in {}",
            T::TABLE,
            config.input.display()
        )
    })?;

    let body = &lines[start + 1..];
    let limit = config.max_lines.or(T::SCAN_LIMIT);

    let progress_bar = if config.progress {
        let total = limit.map_or(body.len(), |l| l.min(body.len()));
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} lines {msg}",
            )
            .unwrap(),
        );
        pb.set_message(format!("Scanning `{}`...", T::TABLE));
        Some(pb)
    } else {
        None
    };

    let mut records: Vec<T> = Vec::new();
    let mut stats = ExtractStats::default();

    for raw in RecordScanner::with_limit(body, limit) {
        stats.records_found += 1;

        let fields = tokenizer::split_fields(tokenizer::strip_tuple(&raw));
        match T::from_fields(&fields) {
            Ok(record) => records.push(record),
            Err(e) => {
                stats.records_skipped += 1;
                if let Some(pb) = &progress_bar {
                    pb.suspend(|| report_skip(&e, &raw));
                } else {
                    report_skip(&e, &raw);
                }
            }
        }

        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }

    if !config.dry_run {
        write_json(&config.output, &records)?;
    }

    stats.records_exported = records.len() as u64;
    stats.summary = report::summarize(&records, report::MAX_GROUPS);

    Ok(stats)
}

fn report_skip(error: &impl std::fmt::Display, raw: &str) {
    eprintln!("  ⚠ skipping record: {}", error);
    eprintln!("    record: {}", preview(raw));
}

/// Truncate a record for the skip report (char-boundary safe).
fn preview(record: &str) -> String {
    let mut truncated: String = record.chars().take(PREVIEW_LEN).collect();
    if truncated.len() < record.len() {
        truncated.push_str("...");
    }
    truncated
}

fn write_json<T: Serialize>(path: &Path, records: &[T]) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
