use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use ppc_table_extract::{
    DocumentMetadata, ExtractOptions, ExtractWarning, ListOverride, PageRange, PageSelection,
    chunk_pdf, extract_ppc_from_pdf, extract_schedules_from_pdf, write_json,
    write_raw_tables_csv,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "ppc2json",
    version,
    about = "Extract structured records from academic program PDFs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify and parse the tables of a program document (PPC).
    Ppc(CommonArgs),
    /// Rebuild class timetables from a schedule document.
    Schedule(CommonArgs),
    /// Split page text into structural chunks with document metadata.
    Chunks(ChunkArgs),
    /// Dump every detected table grid into one CSV sheet.
    Raw(RawArgs),
}

#[derive(Debug, Args)]
struct CommonArgs {
    /// Input PDF path.
    #[arg(short, long)]
    input: PathBuf,

    /// Output path.
    #[arg(short, long)]
    output: PathBuf,

    /// Page selection like 1-3,5.
    #[arg(long)]
    pages: Option<String>,

    /// Minimum cells required per candidate table row.
    #[arg(long, default_value_t = 2)]
    min_cols: usize,

    /// Pages whose keyword tables are elective continuations, like 25-28.
    #[arg(long)]
    elective_pages: Option<String>,

    /// Pages whose bare tables are faculty rosters, like 97,98.
    #[arg(long)]
    faculty_pages: Option<String>,

    /// Program heading that precedes the class group on schedule pages.
    #[arg(long)]
    program: Option<String>,

    /// Extra room regex, tried after the built-in ones. Repeatable.
    #[arg(long = "room-pattern")]
    room_patterns: Vec<String>,

    /// Enable verbose warning output.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Args)]
struct ChunkArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Document id attached to every chunk; defaults to the file stem.
    #[arg(long)]
    doc_id: Option<String>,

    /// Human-readable document name; defaults to the file name.
    #[arg(long)]
    doc_name: Option<String>,

    /// Chunks shorter than this are never treated as duplicates.
    #[arg(long, default_value_t = 50)]
    min_length: usize,

    /// Acronym expansion in format SIGLA=expansão. Repeatable.
    #[arg(long = "acronym")]
    acronyms: Vec<String>,
}

#[derive(Debug, Args)]
struct RawArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output delimiter character.
    #[arg(long, default_value = ",")]
    delimiter: char,
}

fn parse_acronym(value: &str) -> Result<(String, String)> {
    let (acronym, expansion) = value
        .split_once('=')
        .ok_or_else(|| anyhow!("invalid --acronym '{value}', expected format: SIGLA=expansão"))?;
    let acronym = acronym.trim();
    let expansion = expansion.trim();
    if acronym.is_empty() || expansion.is_empty() {
        anyhow::bail!("invalid --acronym '{value}', both sides must be non-empty");
    }
    Ok((acronym.to_string(), expansion.to_string()))
}

fn parse_options(args: &CommonArgs) -> Result<ExtractOptions> {
    let mut options = ExtractOptions {
        min_cols: args.min_cols,
        ..ExtractOptions::default()
    };

    options.pages = args
        .pages
        .as_deref()
        .map(PageSelection::from_str)
        .transpose()
        .context("failed to parse --pages")?;

    if let Some(value) = args.elective_pages.as_deref() {
        options.classifier.elective_override_pages = PageRange::from_str(value)
            .context("failed to parse --elective-pages")?;
    }

    if let Some(value) = args.faculty_pages.as_deref() {
        options.classifier.faculty_special_pages = PageSelection::from_str(value)
            .context("failed to parse --faculty-pages")?
            .iter()
            .collect();
    }

    if let Some(program) = &args.program {
        options.schedule.program_heading.clone_from(program);
    }

    if !args.room_patterns.is_empty() {
        options.schedule.room_patterns = ListOverride::Extend(args.room_patterns.clone());
    }

    Ok(options)
}

fn log_warnings(warnings: &[ExtractWarning], verbose: bool) {
    if warnings.is_empty() {
        return;
    }

    eprintln!("warning: {} issue(s) detected", warnings.len());
    if verbose {
        for warning in warnings {
            eprintln!(
                "  - {:?} page={:?} table={:?}: {}",
                warning.code, warning.page, warning.table_index, warning.message
            );
        }
    }
}

fn file_label(path: &Path, stem: bool) -> String {
    let name = if stem {
        path.file_stem()
    } else {
        path.file_name()
    };
    name.map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Returns how many records were written.
fn run_ppc(args: &CommonArgs) -> Result<usize> {
    let options = parse_options(args)?;
    let report = extract_ppc_from_pdf(&args.input, &options)
        .with_context(|| format!("failed to extract tables from '{}'", args.input.display()))?;
    write_json(&args.output, &report.pages)
        .with_context(|| format!("failed to write '{}'", args.output.display()))?;
    log_warnings(&report.warnings, args.verbose);
    Ok(report.record_count())
}

fn run_schedule(args: &CommonArgs) -> Result<usize> {
    let options = parse_options(args)?;
    let report = extract_schedules_from_pdf(&args.input, &options)
        .with_context(|| format!("failed to extract schedules from '{}'", args.input.display()))?;
    write_json(&args.output, &report.pages)
        .with_context(|| format!("failed to write '{}'", args.output.display()))?;
    log_warnings(&report.warnings, args.verbose);
    Ok(report.pages.len())
}

fn run_chunks(args: &ChunkArgs) -> Result<usize> {
    let common = &args.common;
    let mut options = parse_options(common)?;
    options.dedup_min_length = args.min_length;
    options.acronyms = args
        .acronyms
        .iter()
        .map(|value| parse_acronym(value))
        .collect::<Result<BTreeMap<_, _>>>()?;

    let doc_id = args
        .doc_id
        .clone()
        .unwrap_or_else(|| file_label(&common.input, true));
    let doc_name = args
        .doc_name
        .clone()
        .unwrap_or_else(|| file_label(&common.input, false));
    let metadata = DocumentMetadata::new(doc_id, doc_name).extracted_now();

    let report = chunk_pdf(&common.input, &options, &metadata)
        .with_context(|| format!("failed to chunk '{}'", common.input.display()))?;
    write_json(&common.output, &report.chunks)
        .with_context(|| format!("failed to write '{}'", common.output.display()))?;
    log_warnings(&report.warnings, common.verbose);
    Ok(report.chunks.len())
}

fn run_raw(args: &RawArgs) -> Result<usize> {
    let common = &args.common;
    if !args.delimiter.is_ascii() {
        anyhow::bail!("delimiter must be a single ASCII character");
    }

    let options = parse_options(common)?;
    let report = extract_ppc_from_pdf(&common.input, &options)
        .with_context(|| format!("failed to extract tables from '{}'", common.input.display()))?;
    let merged = write_raw_tables_csv(&common.output, &report.pages, args.delimiter as u8)
        .with_context(|| format!("failed to write '{}'", common.output.display()))?;
    log_warnings(&report.warnings, common.verbose);
    Ok(merged.row_count)
}

fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ppc_table_extract=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    let outcome = match &cli.command {
        Commands::Ppc(args) => run_ppc(args),
        Commands::Schedule(args) => run_schedule(args),
        Commands::Chunks(args) => run_chunks(args),
        Commands::Raw(args) => run_raw(args),
    };

    match outcome {
        Ok(0) => ExitCode::from(2),
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}
