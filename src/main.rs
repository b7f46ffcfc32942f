use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use heritage::config::AnalyzerConfig;
use heritage::core::{HierarchyGraph, MarkerAnalyzer};
use heritage::formatters::{JsonCompactFormatter, JsonFormatter, TextFormatter, TextVerbosity};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "heritage",
    version = "0.1.0",
    author = "heritage developers",
    about = "Override, implementation and subclass gutter markers from declaration models"
)]
struct Cli {
    /// Directory containing declaration files
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Output file path (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format: text, json, json-compact
    #[arg(short, long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// JSON config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Comma-separated declaration file suffixes (overrides config)
    #[arg(long, value_name = "SUFFIXES", value_delimiter = ',')]
    extensions: Option<Vec<String>>,

    /// Disable the declaration cache
    #[arg(long)]
    no_cache: bool,

    /// Classification worker threads
    #[arg(long, value_name = "N")]
    threads: Option<usize>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Text,
    Json,
    JsonCompact,
}

impl OutputFormat {
    fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::JsonCompact => "json-compact",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        input,
        output,
        format,
        config,
        extensions,
        no_cache,
        threads,
        verbose: _,
    } = cli;

    let start_time = Instant::now();

    let mut config = match config {
        Some(path) => AnalyzerConfig::from_file(&path)?,
        None => AnalyzerConfig::default(),
    };
    if let Some(extensions) = extensions {
        config = config.with_extensions(extensions);
    }
    if no_cache {
        config = config.without_cache();
    }
    if let Some(threads) = threads {
        config = config.with_threads(threads);
    }

    // Progress goes to stderr so stdout stays clean for the report.
    eprintln!("HERITAGE - Inheritance Gutter Markers");
    eprintln!("Input: {}", input.display());
    eprintln!("Format: {}", format.as_str());

    let analyzer = MarkerAnalyzer::new(config);
    let (index, file_count) = analyzer.load_index(&input)?;
    eprintln!("Indexed {} types from {} files", index.len(), file_count);

    let mut report = analyzer.analyze_index(&index)?;
    report.stats.files = file_count;
    eprintln!(
        "Classified in {:.2}s: {} markers",
        start_time.elapsed().as_secs_f64(),
        report.stats.markers
    );

    let rendered = match format {
        OutputFormat::Text => TextFormatter::new()
            .with_verbosity(TextVerbosity::Standard)
            .format_report(&report)?,
        OutputFormat::Json => {
            let hierarchy = HierarchyGraph::from_index(&index);
            JsonFormatter::new().format_report(&report, Some(&hierarchy))?
        }
        OutputFormat::JsonCompact => JsonCompactFormatter::new().format_report(&report)?,
    };

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            eprintln!("Output: {}", path.display());
        }
        None => print!("{}", rendered),
    }

    eprintln!(
        "Total execution time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
