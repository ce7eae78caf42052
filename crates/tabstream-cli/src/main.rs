//! tabstream CLI - inspect streamed spreadsheet data by reference

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tabstream::prelude::*;
use tabstream::LineTerminator;

#[derive(Parser)]
#[command(name = "tabstream")]
#[command(
    author,
    version,
    about = "Look up cells, rows and ranges in CSV data by spreadsheet reference"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Input file (csv, tsv)
    input: PathBuf,

    /// Field delimiter (default: from the file extension)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Detect types in the first record too
    #[arg(long)]
    no_header: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one cell, e.g. `tabstream cell data.csv B3`
    Cell {
        #[command(flatten)]
        input: InputArgs,

        /// Cell reference (A1 style)
        reference: String,
    },

    /// Print one row by its 1-based number
    Row {
        #[command(flatten)]
        input: InputArgs,

        /// Row reference, e.g. 7
        reference: String,
    },

    /// Print a rectangular range as tab-separated values
    Range {
        #[command(flatten)]
        input: InputArgs,

        /// Range reference, e.g. A1:C10
        reference: String,
    },

    /// Count rows, blank rows and hidden rows in one pass
    Scan {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Re-emit the data as CSV to stdout or a file
    #[command(alias = "csv")]
    ToCsv {
        #[command(flatten)]
        input: InputArgs,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output field delimiter
        #[arg(long, default_value = ",")]
        out_delimiter: char,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Cell { input, reference } => show_cell(&input, &reference),
        Commands::Row { input, reference } => show_row(&input, &reference),
        Commands::Range { input, reference } => show_range(&input, &reference),
        Commands::Scan { input } => scan(&input),
        Commands::ToCsv {
            input,
            output,
            out_delimiter,
        } => to_csv(&input, output.as_deref(), out_delimiter),
    }
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("Delimiter '{delimiter}' is not a single ASCII character"))
}

fn open(args: &InputArgs) -> Result<Workbook<CsvSource>> {
    let path = &args.input;
    let mut workbook = Workbook::<CsvSource>::open(path)
        .with_context(|| format!("Failed to open '{}'", path.display()))?;

    if args.delimiter.is_some() || args.no_header {
        let mut options = workbook.worksheets().get(0)?.source().options().clone();
        if let Some(d) = args.delimiter {
            options.delimiter = delimiter_byte(d)?;
        }
        options.has_header = !args.no_header;
        let name = workbook.worksheets().get(0)?.name().to_string();
        workbook = Workbook::from_worksheets([CsvSource::from_path(path, options).into_worksheet(name)]);
    }

    tracing::debug!("Opened '{}'", path.display());
    Ok(workbook)
}

fn show_cell(args: &InputArgs, reference: &str) -> Result<()> {
    let mut workbook = open(args)?;
    let sheet = workbook.worksheet_mut(0)?;
    let cell = sheet
        .cell(reference)
        .with_context(|| format!("Failed to read cell '{reference}'"))?;
    println!("{} = {} ({})", reference.to_uppercase(), cell.value(), cell.value().type_name());
    workbook.close()?;
    Ok(())
}

fn show_row(args: &InputArgs, reference: &str) -> Result<()> {
    let mut workbook = open(args)?;
    let sheet = workbook.worksheet_mut(0)?;
    let row = sheet
        .row(reference)
        .with_context(|| format!("Failed to read row '{reference}'"))?;

    if row.is_empty() {
        eprintln!("Row {reference} is past the end of the data");
    }
    for (column, cell) in row.labelled_cells() {
        println!("{column}{reference}\t{}", cell.value());
    }
    workbook.close()?;
    Ok(())
}

fn show_range(args: &InputArgs, reference: &str) -> Result<()> {
    let mut workbook = open(args)?;
    let sheet = workbook.worksheet_mut(0)?;
    let block = sheet
        .range_values(reference)
        .with_context(|| format!("Failed to read range '{reference}'"))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for row in block {
        let line: Vec<String> = row.iter().map(|c| c.value().to_string()).collect();
        writeln!(out, "{}", line.join("\t")).context("Failed to write to stdout")?;
    }
    workbook.close()?;
    Ok(())
}

fn scan(args: &InputArgs) -> Result<()> {
    let workbook = open(args)?;
    let sheet = workbook.worksheets().get(0)?;

    let (mut rows, mut blank, mut hidden, mut widest) = (0u64, 0u64, 0u64, 0usize);
    for row in sheet.rows() {
        let row = row.with_context(|| format!("Failed to read row {}", rows + 1))?;
        rows += 1;
        blank += u64::from(row.is_blank());
        hidden += u64::from(row.is_hidden());
        widest = widest.max(row.len());
    }

    println!("Sheet: {}", sheet.name());
    println!("Rows: {rows}");
    println!("Blank rows: {blank}");
    println!("Hidden rows: {hidden}");
    println!("Widest row: {widest} cells");
    Ok(())
}

fn to_csv(args: &InputArgs, output: Option<&Path>, delimiter: char) -> Result<()> {
    let workbook = open(args)?;
    let sheet = workbook.worksheets().get(0)?;
    let options = CsvWriteOptions {
        delimiter: delimiter_byte(delimiter)?,
        line_terminator: LineTerminator::LF,
        ..Default::default()
    };

    if let Some(output_path) = output {
        let written = CsvWriter::write_file(sheet, output_path, &options)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!("Wrote {} rows to '{}'", written, output_path.display());
    } else {
        CsvWriter::write(sheet, io::stdout().lock(), &options)
            .context("Failed to write to stdout")?;
    }

    Ok(())
}
