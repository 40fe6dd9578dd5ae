//! asinpack: deterministic image renaming for Amazon product listings.
//!
//! Given an ordered batch of images and one or more ASIN codes, asinpack
//! assigns each image a variant slot by position (MAIN, FRNT, SIDE, BACK,
//! PT01…) and expands that across every ASIN into a manifest of
//! `<ASIN>.<VARIANT><ext>` output names, then bundles the renamed files.
//!
//! # Modules
//!
//! - [`naming`]: Identifiers, uploaded items, variant labels, naming config
//! - [`assign`]: Positional variant assignment
//! - [`manifest`]: Identifier × item expansion and the processing log
//! - [`upload`]: Extension filtering and item identity
//! - [`package`]: ZIP and directory bundling
//! - [`session`]: The processing state machine
//! - [`error`]: Error types for asinpack operations

pub mod assign;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod naming;
pub mod package;
pub mod session;
pub mod upload;

use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use serde::Serialize;

pub use error::AsinpackError;

use crate::logging::{LogConfig, LogFormat};
use crate::manifest::{Manifest, ManifestReport};
use crate::naming::{Identifier, NamingConfig, MAX_IDENTIFIER_LEN};
use crate::package::{ArchivePackager, DirPackager, ZipPackager};
use crate::session::{ProcessOutcome, Session};

/// The asinpack CLI application.
#[derive(Parser)]
#[command(name = "asinpack")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Naming config file (YAML, or JSON by extension).
    #[arg(long, global = true, env = "ASINPACK_CONFIG")]
    config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,

    /// Log output format on stderr.
    #[arg(long, value_enum, default_value = "pretty", global = true)]
    log_format: LogFormatArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Show which variant each image would receive.
    Assign(AssignArgs),
    /// Build the rename manifest without writing any files.
    Plan(PlanArgs),
    /// Build the manifest and bundle the renamed images.
    Pack(PackArgs),
}

/// Arguments for the assign subcommand.
#[derive(clap::Args)]
struct AssignArgs {
    /// Image files or directories, in slot order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Inputs shared by plan and pack.
#[derive(clap::Args)]
struct BuildArgs {
    /// ASIN code; repeat or comma-separate for several.
    #[arg(short = 'a', long = "asin", value_delimiter = ',')]
    asins: Vec<String>,

    /// File with one ASIN code per line.
    #[arg(long)]
    asin_file: Option<PathBuf>,

    /// Image files or directories, in slot order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

/// Arguments for the plan subcommand.
#[derive(clap::Args)]
struct PlanArgs {
    #[command(flatten)]
    build: BuildArgs,

    /// Output format ('text', 'json', or 'csv').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the pack subcommand.
#[derive(clap::Args)]
struct PackArgs {
    #[command(flatten)]
    build: BuildArgs,

    /// Archive path (default: Amazon_Images_<timestamp>.zip in the current directory).
    #[arg(long, conflicts_with = "out_dir")]
    out: Option<PathBuf>,

    /// Write renamed copies into this directory instead of a ZIP archive.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

/// Run the asinpack CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), AsinpackError> {
    let cli = Cli::parse();

    let log_config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        with_ansi: io::stderr().is_terminal(),
        use_env_filter: !cli.verbosity.is_present(),
    };
    if let Err(error) = logging::init_logging(&log_config) {
        eprintln!("warning: failed to initialize logging: {error}");
    }

    let config = match &cli.config {
        Some(path) => NamingConfig::load(path)?,
        None => NamingConfig::default(),
    };

    match cli.command {
        Some(Commands::Assign(args)) => run_assign(args, config),
        Some(Commands::Plan(args)) => run_plan(args, config),
        Some(Commands::Pack(args)) => run_pack(args, config),
        None => {
            println!("asinpack {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Deterministic image renaming for ASIN listings.");
            println!();
            println!("Run 'asinpack --help' for usage information.");
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct AssignRow<'a> {
    position: usize,
    item_id: u64,
    file_name: &'a str,
    variant: &'a str,
}

/// Execute the assign subcommand.
fn run_assign(args: AssignArgs, config: NamingConfig) -> Result<(), AsinpackError> {
    let mut session = Session::new(config);
    let files = upload::collect_raw_files(&args.inputs)?;
    let rejected = session.upload(files);
    if session.items().is_empty() {
        return Err(AsinpackError::NoItems { rejected });
    }

    let assignments = session.assignments();
    match args.output.as_str() {
        "json" => {
            let rows: Vec<AssignRow<'_>> = assignments
                .iter()
                .map(|a| AssignRow {
                    position: a.position,
                    item_id: a.item.id.as_u64(),
                    file_name: &a.item.file_name,
                    variant: a.variant.as_str(),
                })
                .collect();
            let json = serde_json::to_string_pretty(&rows)
                .map_err(|source| AsinpackError::ManifestSerialize { source })?;
            println!("{json}");
        }
        "text" => {
            for a in &assignments {
                println!("{:>3}  {} -> {}", a.position, a.item.file_name, a.variant);
            }
            if rejected > 0 {
                println!();
                println!("{rejected} file(s) skipped (unsupported extension)");
            }
        }
        other => {
            return Err(AsinpackError::UnsupportedFormat(format!(
                "'{}' (supported: text, json)",
                other
            )));
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct PlanOutput<'a> {
    report: &'a ManifestReport,
    #[serde(flatten)]
    manifest: &'a Manifest,
}

/// Execute the plan subcommand.
fn run_plan(args: PlanArgs, config: NamingConfig) -> Result<(), AsinpackError> {
    if !matches!(args.output.as_str(), "text" | "json" | "csv") {
        return Err(AsinpackError::UnsupportedFormat(format!(
            "'{}' (supported: text, json, csv)",
            args.output
        )));
    }

    let (session, report) = build_session(&args.build, config)?;
    let manifest = session.manifest();

    match args.output.as_str() {
        "json" => {
            let output = PlanOutput {
                report: &report,
                manifest,
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|source| AsinpackError::ManifestSerialize { source })?;
            println!("{json}");
        }
        "csv" => print!("{}", manifest.to_csv_string()?),
        _ => {
            for line in session.log() {
                println!("{line}");
            }
            println!();
            println!("Plan:");
            print!("{report}");
        }
    }

    Ok(())
}

/// Execute the pack subcommand.
fn run_pack(args: PackArgs, config: NamingConfig) -> Result<(), AsinpackError> {
    let (session, report) = build_session(&args.build, config)?;
    let manifest = session.manifest();

    let package_report = match (&args.out_dir, &args.out) {
        (Some(dir), _) => DirPackager.package(manifest, dir)?,
        (None, Some(path)) => ZipPackager.package(manifest, path)?,
        (None, None) => {
            let path = PathBuf::from(package::bundle_name(chrono::Utc::now()));
            ZipPackager.package(manifest, &path)?
        }
    };

    println!(
        "Packed {} file(s) into {}",
        package_report.entries,
        package_report.destination.display()
    );
    print!("{report}");
    if package_report.overwritten > 0 {
        println!(
            "  note: {} record(s) overwritten by later records with the same name",
            package_report.overwritten
        );
    }

    Ok(())
}

/// Loads identifiers and inputs into a session and runs the build.
fn build_session(
    args: &BuildArgs,
    config: NamingConfig,
) -> Result<(Session, ManifestReport), AsinpackError> {
    let mut raw_asins: Vec<String> = args.asins.iter().map(|s| s.trim().to_string()).collect();
    if let Some(path) = &args.asin_file {
        let text = fs::read_to_string(path).map_err(|source| AsinpackError::IoAt {
            path: path.clone(),
            source,
        })?;
        raw_asins.extend(text.lines().map(|l| l.trim().to_string()));
    }

    for asin in &raw_asins {
        let normalised = Identifier::from_input(asin);
        if !normalised.as_str().eq_ignore_ascii_case(asin) {
            tracing::warn!(
                asin = %asin,
                kept = %normalised,
                "ASIN reduced to at most {MAX_IDENTIFIER_LEN} letters and digits"
            );
        }
    }

    let mut session = Session::new(config);
    session.set_identifiers(&raw_asins);
    if session.valid_identifiers().is_empty() {
        return Err(AsinpackError::NoIdentifiers);
    }

    let files = upload::collect_raw_files(&args.inputs)?;
    let rejected = session.upload(files);

    match session.process()? {
        ProcessOutcome::Completed(report) => Ok((session, report)),
        ProcessOutcome::GateNotMet => Err(AsinpackError::NoItems { rejected }),
    }
}
