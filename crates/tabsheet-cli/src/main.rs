//! tabsheet CLI - HTML table to XLSX conversion tool

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tabsheet::prelude::*;
use tabsheet::{preview_text, DEFAULT_FILE_NAME, DEFAULT_SHEET_NAME};

#[derive(Parser)]
#[command(name = "tabsheet")]
#[command(author, version, about = "Convert the first table of an HTML page to XLSX")]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an HTML file to an XLSX workbook
    Convert {
        /// Input HTML file
        input: PathBuf,

        /// Output XLSX file (default: converted.xlsx next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Worksheet name
        #[arg(long, default_value = DEFAULT_SHEET_NAME)]
        sheet_name: String,

        /// Only trim cell text instead of collapsing inner whitespace
        #[arg(long)]
        keep_whitespace: bool,

        /// Fail instead of writing an empty worksheet for a table without rows
        #[arg(long)]
        fail_on_empty: bool,
    },

    /// Print the table extracted from an HTML file
    Preview {
        /// Input HTML file
        input: PathBuf,
    },

    /// Print the cells of an XLSX workbook with their formatting
    Inspect {
        /// Input XLSX file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            sheet_name,
            keep_whitespace,
            fail_on_empty,
        } => {
            let mut options = ConvertOptions::default();
            options.model.sheet_name = sheet_name;
            if keep_whitespace {
                options.extract.whitespace = WhitespaceMode::Trim;
            }
            if fail_on_empty {
                options.model.empty_grid = EmptyGridPolicy::Fail;
            }
            convert(&input, output.as_deref(), options)
        }
        Commands::Preview { input } => preview(&input),
        Commands::Inspect { input } => inspect(&input),
    }
}

fn convert(input: &Path, output: Option<&Path>, options: ConvertOptions) -> Result<()> {
    let conversion = Converter::new(options)
        .convert_file(input)
        .with_context(|| format!("Failed to convert '{}'", input.display()))?;

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => input
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(DEFAULT_FILE_NAME),
    };

    conversion
        .save(&output)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;

    eprintln!(
        "Wrote {} rows x {} columns to '{}'",
        conversion.grid.row_count(),
        conversion.grid.col_count(),
        output.display()
    );
    Ok(())
}

fn preview(input: &Path) -> Result<()> {
    let grid = Converter::default()
        .extract_file(input)
        .with_context(|| format!("Failed to extract a table from '{}'", input.display()))?;

    if grid.is_empty() {
        eprintln!("Warning: Table has no rows");
        return Ok(());
    }

    io::stdout()
        .write_all(preview_text(&grid).as_bytes())
        .context("Failed to write to stdout")?;
    Ok(())
}

fn inspect(input: &Path) -> Result<()> {
    let sheet = XlsxReader::read_file(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    println!("File: {}", input.display());
    println!("Sheet: \"{}\"", sheet.sheet_name);
    println!(
        "Used range: {} rows x {} columns",
        sheet.row_count(),
        sheet.col_count()
    );
    println!("Parts: {}", sheet.part_names.join(", "));
    println!();

    for cell in &sheet.cells {
        println!(
            "{}\t{}\t{}\t{:?}",
            cell.address,
            if cell.style.bold { "bold" } else { "regular" },
            cell.style.horizontal.xlsx_name(),
            cell.text
        );
    }

    Ok(())
}
