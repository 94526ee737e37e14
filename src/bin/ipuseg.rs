//! ipuseg CLI: segment structure annotations into identified IPUs.
//!
//! Usage:
//!   ipuseg run [--input structure.csv] [--output IPU_data.csv] [--config cfg.yaml]
//!   ipuseg inspect <STRUCTURE> [--file NAME]

use clap::{Parser, Subcommand};
use ipuseg::segment::extract_segments;
use ipuseg::structure::{number_markers, split_phrases, Structure};
use ipuseg::identifier::identify;
use ipuseg::{CsvSink, CsvSource, IpusegError, PipelineConfig, SegmentationPipeline};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ipuseg",
    version,
    about = "Inter-pausal unit segmentation for s/p structure annotations"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment every record of an input table and write the IPU table
    Run {
        /// Input table with `file` and `structure` columns
        #[arg(short, long, default_value = "structure.csv")]
        input: PathBuf,
        /// Output table path
        #[arg(short, long, default_value = "IPU_data.csv")]
        output: PathBuf,
        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write a JSON diagnostics report here
        #[arg(long)]
        report: Option<PathBuf>,
        /// Process records in parallel
        #[arg(long)]
        parallel: bool,
        /// Append a `phrase` column to the output
        #[arg(long)]
        phrase_column: bool,
        /// Field delimiter for input and output
        #[arg(long)]
        delimiter: Option<char>,
        /// Exit with status 2 when any error-severity diagnostic was reported
        #[arg(long)]
        strict: bool,
    },
    /// Show every stage for a single structure string
    Inspect {
        /// Structure string over `s` and `p`
        structure: String,
        /// File identifier used to build the keys
        #[arg(short, long, default_value = "subject_session")]
        file: String,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

struct RunArgs {
    input: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
    report: Option<PathBuf>,
    parallel: bool,
    phrase_column: bool,
    delimiter: Option<char>,
    strict: bool,
}

fn load_config(args: &RunArgs) -> Result<PipelineConfig, IpusegError> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_yaml_file(path)?,
        None => PipelineConfig::new(),
    };
    if args.parallel {
        config = config.with_parallel(true);
    }
    if args.phrase_column {
        config = config.with_phrase_column(true);
    }
    if let Some(delimiter) = args.delimiter {
        config = config.with_delimiter(delimiter);
    }
    config.validate()?;
    Ok(config)
}

fn execute_run(args: &RunArgs) -> Result<bool, IpusegError> {
    let config = load_config(args)?;
    let layout = config.table_layout()?;

    let mut source = CsvSource::open(&args.input, layout.clone())?;
    let mut sink = CsvSink::create(&args.output, layout);
    let output = SegmentationPipeline::new(config).run_tables(&mut source, &mut sink)?;

    if let Some(path) = &args.report {
        output.report().write_to(path)?;
    }

    let summary = output.summary;
    println!(
        "Wrote {} rows from {} records to '{}' ({} rejected, {} without segments, {} warnings)",
        summary.rows_emitted,
        summary.records_read,
        args.output.display(),
        summary.records_rejected,
        summary.records_empty,
        summary.warnings,
    );
    Ok(summary.has_errors())
}

fn cmd_run(args: RunArgs) -> i32 {
    match execute_run(&args) {
        Ok(true) if args.strict => 2,
        Ok(_) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_inspect(structure: &str, file: &str) -> i32 {
    let parsed = match Structure::parse(structure) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let numbered = number_markers(parsed.as_str());
    let groups = split_phrases(numbered.as_str());
    println!("structure : {}", parsed.as_str());
    println!("numbered  : {}", numbered);
    println!("phrases   : {}", groups.len());
    for group in &groups {
        println!("  [{}] {:?}", group.ordinal, group.text);
    }

    let extracted = extract_segments(file, &groups);
    println!("segments  : {}", extracted.len());
    println!("{:<8}  {:>5}  {:>6}  {:<24}  {:<24}", "TOKEN", "IPU", "PHRASE", "ID", "ID_IPU");
    println!("{}", "-".repeat(74));
    for segment in extracted.segments() {
        match identify(segment) {
            Ok(row) => println!(
                "{:<8}  {:>5}  {:>6}  {:<24}  {:<24}",
                row.token, row.ipu_index, row.phrase_index, row.id, row.id_ipu
            ),
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        }
    }
    0
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match cli.command {
        Commands::Run {
            input,
            output,
            config,
            report,
            parallel,
            phrase_column,
            delimiter,
            strict,
        } => cmd_run(RunArgs {
            input,
            output,
            config,
            report,
            parallel,
            phrase_column,
            delimiter,
            strict,
        }),
        Commands::Inspect { structure, file } => cmd_inspect(&structure, &file),
    };
    std::process::exit(code);
}
