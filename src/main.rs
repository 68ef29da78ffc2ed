//! gmi2html - Mirror a directory of gemtext documents as HTML
//!
//! Usage:
//!   gmi2html                        (asks for both directories)
//!   gmi2html -i ./capsule -o ./site
//!   gmi2html -i ./capsule -o ./site --report report.json --report-format json

use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

use gmi2html::config::load_config;
use gmi2html::prompt::{self, DestRoot};
use gmi2html::{styling, ReportFormat, TreeMirror};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ReportFormatArg {
    /// JSON format
    Json,
    /// Human-readable text
    Text,
}

impl From<ReportFormatArg> for ReportFormat {
    fn from(arg: ReportFormatArg) -> Self {
        match arg {
            ReportFormatArg::Json => ReportFormat::Json,
            ReportFormatArg::Text => ReportFormat::Text,
        }
    }
}

#[derive(ClapParser)]
#[command(
    version,
    about = "Convert a tree of gemtext documents into HTML",
    long_about = "Mirrors the input directory into the output directory:\n\n\
                  - .gmi documents are converted to .html\n\
                  - every other file is copied unchanged\n\
                  - nothing already present in the output is overwritten\n\n\
                  Directories not given on the command line are asked for interactively."
)]
struct Cli {
    /// Input directory (asked for if not specified)
    #[arg(short, long, value_name = "DIR")]
    input: Option<PathBuf>,

    /// Output directory, created if missing (asked for if not specified)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Write a run report to this file
    #[arg(long, value_name = "REPORT_FILE")]
    report: Option<PathBuf>,

    /// Report format (defaults to the config file setting, then text)
    #[arg(long, value_enum)]
    report_format: Option<ReportFormatArg>,

    /// Config file (defaults to $XDG_CONFIG_HOME/gmi2html/gmi2html.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// debug log file
    #[arg(short, long, value_name = "FILE")]
    debuglogfile: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn init_logger(filter_level: log::LevelFilter, logfile: Option<PathBuf>) {
    let mut loggers: Vec<Box<dyn simplelog::SharedLogger>> = vec![simplelog::TermLogger::new(
        filter_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )];
    if let Some(filename) = logfile {
        match File::create(&filename) {
            Ok(file) => loggers.push(simplelog::WriteLogger::new(
                filter_level,
                simplelog::Config::default(),
                file,
            )),
            Err(e) => eprintln!("cannot create log file {}: {}", filename.display(), e),
        }
    }
    if let Err(e) = simplelog::CombinedLogger::init(loggers) {
        eprintln!("failed to initialize logger: {}", e);
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logger(args.verbose.log_level_filter(), args.debuglogfile.clone());
    if args.no_color {
        styling::set_colors(false);
    }

    let config = match load_config(args.config.as_deref())? {
        Some(loaded) => {
            log::debug!("Loaded config from {}", loaded.path.display());
            loaded.config
        }
        None => Default::default(),
    };

    let source_root = match args.input {
        Some(path) => {
            prompt::validate_source_root(&path)?;
            path
        }
        None => prompt::ask_source_root()?,
    };

    let dest_root = match args.output {
        Some(path) => {
            if prompt::prepare_dest_root(&path)? == DestRoot::Existing {
                styling::print_warning(&format!("directory {} already exists", path.display()));
            }
            path
        }
        None => prompt::ask_dest_root()?,
    };

    let report = TreeMirror::new(source_root, dest_root)
        .with_options(config.mirror_options())
        .run();
    styling::print_diagnostics(&report);

    if let Some(report_path) = &args.report {
        let format = args
            .report_format
            .map(ReportFormat::from)
            .unwrap_or_else(|| config.report_format());
        let content = report.render(format)?;
        fs::write(report_path, content)
            .with_context(|| format!("failed to write report to {}", report_path.display()))?;
        log::info!("Report written to {}", report_path.display());
    }

    styling::print_success();
    Ok(())
}
