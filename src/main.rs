mod report;

use anyhow::{Context as _, Result};
use quadlint::{Linter, Options, Source, UnitType};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

struct CliConfig {
    paths: Vec<PathBuf>,
    options: Options,
    format: Format,
    color: bool,
}

fn main() {
    init_logging();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    match run(&config) {
        Ok(blocking) => std::process::exit(if blocking { 1 } else { 0 }),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(2);
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("QUADLINT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

/// Returns whether the run found blocking errors.
fn run(config: &CliConfig) -> Result<bool> {
    let sources = collect_sources(&config.paths)?;
    tracing::debug!(files = sources.len(), "collected unit files");

    let report = Linter::builtin().lint(&sources, &config.options);
    match config.format {
        Format::Text => report::print_text(&report, config.color),
        Format::Json => report::print_json(&report).context("failed to encode report")?,
    }
    Ok(report.summary().has_blocking_errors)
}

fn collect_sources(paths: &[PathBuf]) -> Result<Vec<Source>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let entries = std::fs::read_dir(path).with_context(|| format!("failed to read directory {}", path.display()))?;
            let mut found = Vec::new();
            for entry in entries {
                let entry = entry.with_context(|| format!("failed to read directory {}", path.display()))?;
                let candidate = entry.path();
                if candidate.is_file() && UnitType::from_path(&candidate).is_some() {
                    found.push(candidate);
                }
            }
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }

    files.iter().map(|p| read_source(p)).collect()
}

fn read_source(path: &Path) -> Result<Source> {
    let text = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(Source::new(path, text))
}

fn parse_args() -> Result<CliConfig, String> {
    let mut paths = Vec::new();
    let mut options = Options::default();
    let mut format = Format::Text;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("quadlint {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--check-references" => options.check_references = true,
            "--format" => {
                let value = args.next().ok_or_else(|| "error: --format expects a value".to_string())?;
                format = parse_format(&value)?;
            }
            "--" => {
                paths.extend(args.by_ref().map(PathBuf::from));
                break;
            }
            _ if arg.starts_with("--format=") => {
                format = parse_format(arg.trim_start_matches("--format="))?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => paths.push(PathBuf::from(arg)),
        }
    }

    if paths.is_empty() {
        return Err(format!("error: no unit files given\n\n{}", help_text()));
    }

    Ok(CliConfig { paths, options, format, color })
}

fn parse_format(value: &str) -> Result<Format, String> {
    match value {
        "text" => Ok(Format::Text),
        "json" => Ok(Format::Json),
        _ => Err(format!("error: invalid --format '{value}' (expected text or json)")),
    }
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "quadlint {}\n\n\
Usage:\n  quadlint [OPTIONS] <PATH>...\n\n\
Paths may be unit files or directories; directories are scanned one level\n\
deep for .container, .volume, .kube, .network, .image, .build and .pod files.\n\n\
Options:\n\
  --check-references      Verify that referenced units are among the inputs\n\
  --format <text|json>    Output format (default: text)\n\
  --color                 Force ANSI color output\n\
  --no-color              Disable ANSI color output\n\
  -h, --help              Show this help\n\
  -V, --version           Show version\n\n\
Environment:\n\
  QUADLINT_LOG            Log filter for diagnostics on stderr (default: warn)\n\n\
Exit status:\n  0 no errors (warnings allowed), 1 errors found, 2 usage or I/O error",
        env!("CARGO_PKG_VERSION")
    )
}
