use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use passbook_tools::clean::clean_tree;
use passbook_tools::convert;
use passbook_tools::error::EXIT_FAILED;
use passbook_tools::io::{excel_read, json};
use passbook_tools::{PassbookError, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(cli.verbose) {
        eprintln!("error: {error}");
        std::process::exit(EXIT_FAILED);
    }

    if let Err(error) = run(cli.command) {
        if error.is_skip() {
            eprintln!("skipped: {error}");
        } else {
            eprintln!("error: {error}");
        }
        std::process::exit(error.exit_code());
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Convert(args) => {
            convert::excel_to_statement(
                &args.excel_file,
                &args.sheet_identifier,
                &args.output_file,
                Some(args.indent),
            )?;
            Ok(())
        }
        Command::Format(args) => {
            convert::table_json_to_statement(&args.input, &args.output, Some(args.indent))?;
            Ok(())
        }
        Command::Clean(args) => match &args.output {
            Some(output) => convert::clean_json_file(&args.input, output, args.indent),
            None => {
                let cleaned = clean_tree(json::read_json(&args.input)?);
                println!("{}", json::to_json_string(&cleaned, args.indent)?);
                Ok(())
            }
        },
        Command::Dump(args) => match &args.output {
            Some(output) => {
                convert::excel_to_table_json(&args.excel_file, &args.sheet_identifier, output, args.indent)
            }
            None => {
                if !args.excel_file.exists() {
                    return Err(PassbookError::MissingInput(args.excel_file));
                }
                let document = excel_read::read_sheet_table(&args.excel_file, &args.sheet_identifier)?;
                println!("{}", json::to_json_string(&document, args.indent)?);
                Ok(())
            }
        },
    }
}

fn init_logging(verbose: u8) -> Result<()> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| PassbookError::Logging(err.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Convert cooperative member passbook worksheets into JSON statements."
)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). Overrides RUST_LOG.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert one worksheet of a passbook workbook into a statement.
    Convert(ConvertArgs),
    /// Convert a table JSON document into a statement.
    Format(FormatArgs),
    /// Strip nulls, zeros, and zero-only lists from a JSON document.
    Clean(CleanArgs),
    /// Export one worksheet as a raw table JSON document.
    Dump(DumpArgs),
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Passbook workbook (xlsx, xls, or ods).
    excel_file: PathBuf,

    /// Sheet name, name prefix, or a string starting with the sheet number.
    sheet_identifier: String,

    /// Statement output path.
    output_file: PathBuf,

    /// Spaces per indentation level.
    #[arg(long, default_value_t = 4)]
    indent: usize,
}

#[derive(clap::Args)]
struct FormatArgs {
    /// Table JSON document (`{column: {row: cell}}`).
    input: PathBuf,

    /// Statement output path.
    #[arg(short, long)]
    output: PathBuf,

    /// Spaces per indentation level.
    #[arg(short, long, default_value_t = 2)]
    indent: usize,
}

#[derive(clap::Args)]
struct CleanArgs {
    /// JSON document to clean.
    input: PathBuf,

    /// Output path; printed to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Spaces per indentation level; compact when omitted.
    #[arg(short, long)]
    indent: Option<usize>,
}

#[derive(clap::Args)]
struct DumpArgs {
    /// Passbook workbook (xlsx, xls, or ods).
    excel_file: PathBuf,

    /// Sheet name, name prefix, or a string starting with the sheet number.
    sheet_identifier: String,

    /// Output path; printed to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Spaces per indentation level; compact when omitted.
    #[arg(short, long)]
    indent: Option<usize>,
}
