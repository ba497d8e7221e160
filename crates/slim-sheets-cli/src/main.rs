//! Slim Sheets CLI - look up single cells in XLSX workbooks

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use slim_sheets::prelude::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "slim")]
#[command(author, version, about = "Read individual cells from large XLSX workbooks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the values of one or more cells given as A1 references
    ///
    /// Each value is printed on its own line; empty cells print an empty line.
    Get {
        /// Input workbook (xlsx)
        input: PathBuf,

        /// Cell references, e.g. O41 BP183
        #[arg(required = true)]
        references: Vec<String>,

        #[command(flatten)]
        lookup: LookupArgs,
    },

    /// Print the value of the cell at a 1-based row and column
    At {
        /// Input workbook (xlsx)
        input: PathBuf,

        /// Row number (1-based)
        #[arg(allow_negative_numbers = true)]
        row: i64,

        /// Column number (1-based)
        #[arg(allow_negative_numbers = true)]
        column: i64,

        #[command(flatten)]
        lookup: LookupArgs,
    },

    /// List all sheets in a workbook
    Sheets {
        /// Input workbook (xlsx)
        input: PathBuf,
    },
}

#[derive(Args)]
struct LookupArgs {
    /// Sheet name, matched case-insensitively (default: first sheet)
    #[arg(short, long)]
    sheet: Option<String>,

    /// Match cells by their stored references instead of by position
    #[arg(short, long)]
    declared: bool,
}

impl LookupArgs {
    fn options(&self) -> ReaderOptions {
        let mut options = ReaderOptions::new().lookup_mode(if self.declared {
            LookupMode::Declared
        } else {
            LookupMode::Positional
        });
        options.sheet_name = self.sheet.clone();
        options
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Get {
            input,
            references,
            lookup,
        } => get_cells(&input, &references, &lookup),
        Commands::At {
            input,
            row,
            column,
            lookup,
        } => get_cell_at(&input, row, column, &lookup),
        Commands::Sheets { input } => list_sheets(&input),
    }
}

fn open_reader(input: &Path, lookup: &LookupArgs) -> Result<CellReader> {
    let mut reader = CellReader::with_options(input, lookup.options());
    reader
        .open()
        .with_context(|| format!("Failed to open '{}'", input.display()))?;
    Ok(reader)
}

fn get_cells(input: &Path, references: &[String], lookup: &LookupArgs) -> Result<()> {
    let mut reader = open_reader(input, lookup)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for reference in references {
        let value = reader
            .get_value_by_reference(reference)
            .with_context(|| format!("Failed to read cell '{}'", reference))?;
        writeln!(out, "{}", value.unwrap_or_default())?;
    }

    Ok(())
}

fn get_cell_at(input: &Path, row: i64, column: i64, lookup: &LookupArgs) -> Result<()> {
    let mut reader = open_reader(input, lookup)?;
    let value = reader
        .get_value(row, column)
        .with_context(|| format!("Failed to read cell at row {}, column {}", row, column))?;

    if value.is_none() {
        eprintln!("Warning: no value at row {}, column {}", row, column);
    }
    println!("{}", value.unwrap_or_default());
    Ok(())
}

fn list_sheets(input: &Path) -> Result<()> {
    let mut reader = CellReader::new(input);
    let names = reader
        .sheet_names()
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    println!("Sheets in '{}':", input.display());
    for (i, name) in names.iter().enumerate() {
        println!("  {}: {}", i + 1, name);
    }

    Ok(())
}
