// Command-line entry point for pymsbuild.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pymsbuild::domain::diagnostic::Diagnostic;
use pymsbuild::ports::DiagnosticSink;
use pymsbuild::{compile_file_with_sink, CompilerConfig};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Python source file to compile
    source: PathBuf,

    /// Write markup to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Value of the Project element's DefaultTargets attribute
    #[arg(long, default_value = CompilerConfig::DEFAULT_TARGETS)]
    default_targets: String,

    /// Spaces per nesting level
    #[arg(long, default_value_t = CompilerConfig::DEFAULT_INDENT_WIDTH)]
    indent: usize,

    /// How recorded diagnostics are reported on stderr
    #[arg(long, value_enum, default_value_t = DiagnosticsFormat::Text)]
    diagnostics: DiagnosticsFormat,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DiagnosticsFormat {
    Text,
    Json,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Writes each diagnostic to stderr as soon as it is recorded.
struct StderrReporter {
    format: DiagnosticsFormat,
}

impl DiagnosticSink for StderrReporter {
    fn report(&mut self, diagnostic: &Diagnostic) {
        match self.format {
            DiagnosticsFormat::Text => eprintln!("[WARN] {}", diagnostic),
            DiagnosticsFormat::Json => match serde_json::to_string(diagnostic) {
                Ok(line) => eprintln!("{}", line),
                Err(err) => tracing::warn!(%err, "cannot serialize diagnostic"),
            },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = CompilerConfig {
        default_targets: cli.default_targets.clone(),
        indent_width: cli.indent,
    };

    let mut reporter = StderrReporter {
        format: cli.diagnostics,
    };
    let report = match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Cannot create output file {}", path.display()))?;
            compile_file_with_sink(&cli.source, BufWriter::new(file), &config, &mut reporter)
        }
        None => compile_file_with_sink(&cli.source, io::stdout().lock(), &config, &mut reporter),
    }
    .with_context(|| format!("Failed to compile {}", cli.source.display()))?;

    tracing::debug!(targets = report.targets, "wrote markup");
    Ok(())
}
