mod export;
mod tables;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sql-extractor")]
#[command(version)]
#[command(about = "Extract table rows from MySQL dump files as JSON", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export one table's rows from a SQL dump to a JSON file
    Export {
        /// Input SQL dump file
        /// Supports .gz, .bz2, .xz, .zst compression
        file: PathBuf,

        /// Table schema to extract: programs, units, or video-materials
        #[arg(short, long)]
        table: String,

        /// Output JSON file (default: <table>.json in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum lines to scan after the INSERT statement
        #[arg(long)]
        max_lines: Option<usize>,

        /// Show progress during scanning
        #[arg(short, long)]
        progress: bool,

        /// Parse and summarize without writing the JSON file
        #[arg(long)]
        dry_run: bool,
    },

    /// List the built-in table schemas
    Tables,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Export {
            file,
            table,
            output,
            max_lines,
            progress,
            dry_run,
        } => export::run(file, table, output, max_lines, progress, dry_run),
        Commands::Tables => tables::run(),
        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "sql-extractor",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}
