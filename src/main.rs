use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use std::io;
use std::path::{self, PathBuf};
use tracing_subscriber::EnvFilter;

use delphi_depend::core::{FileScanner, UnitAnalyzer};
use delphi_depend::formatters::{DotFormatter, EdgeDisplay, JsonCompactFormatter};

/// Environment variable holding a `tracing` filter such as `debug`.
const LOG_ENV: &str = "DELPHI_DEPEND_LOG";

const USAGE: &str = "delphi-depend [--format <dot|json-compact>] {+|-}e {+|-}m {+|-}n <path>";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "delphi-depend",
    version,
    about = "Extract unit dependencies from a Delphi source tree as a Graphviz digraph",
    override_usage = USAGE
)]
struct Cli {
    /// Output format: dot, json-compact
    #[arg(short, long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Dot)]
    format: OutputFormat,

    /// Extension of the source files to scan
    #[arg(long, value_name = "EXT", default_value = "pas")]
    source_ext: String,

    /// Do not report skipped files on stderr
    #[arg(short, long)]
    quiet: bool,

    /// `-e` drops external units, `+m` shows implementation uses,
    /// `+n` shows interface uses, followed by the root directory
    #[arg(
        value_name = "ARGS",
        num_args = 0..,
        allow_hyphen_values = true,
        trailing_var_arg = true
    )]
    args: Vec<String>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Dot,
    JsonCompact,
}

/// The four positional switches, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RunOptions {
    prune_external: bool,
    display: EdgeDisplay,
    root: PathBuf,
}

impl RunOptions {
    /// `None` when the argument count is wrong. Any value other than the
    /// enabling form of a switch counts as "off".
    fn from_args(args: &[String]) -> Result<Option<Self>> {
        let [external, implementation, interface, root] = args else {
            return Ok(None);
        };

        let root = path::absolute(root)
            .with_context(|| format!("Failed to resolve path {root}"))?;

        Ok(Some(Self {
            prune_external: external == "-e",
            display: EdgeDisplay {
                implementation: implementation == "+m",
                interface: interface == "+n",
            },
            root,
        }))
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => {
            println!("Usage: {USAGE}");
            return Ok(());
        }
    };
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let Some(options) = RunOptions::from_args(&cli.args)? else {
        println!("Usage: {USAGE}");
        return Ok(());
    };

    let analyzer = UnitAnalyzer::new(FileScanner::with_extension(&cli.source_ext));
    let analysis = analyzer
        .analyze(&options.root)
        .with_context(|| format!("Failed to analyze {}", options.root.display()))?;

    if !cli.quiet {
        for skipped in &analysis.skipped {
            eprintln!("Warning: Skipped {}", skipped.error);
        }
    }

    let dependencies = if options.prune_external {
        analysis.internal_dependencies()
    } else {
        analysis.dependencies
    };

    let mut out = io::stdout().lock();
    match cli.format {
        OutputFormat::Dot => DotFormatter::new()
            .with_display(options.display)
            .write_to(&dependencies, &mut out)?,
        OutputFormat::JsonCompact => JsonCompactFormatter::new()
            .with_display(options.display)
            .write_to(&dependencies, &mut out)?,
    }

    Ok(())
}
