//! `cds`: build and validate shared class-metadata archives.
//!
//! Provides `cds dump` to record a classpath fingerprint into an archive,
//! `cds run` to check the current classpath against an archive under a
//! sharing mode, and `cds inspect` to print what an archive recorded.

#![warn(missing_docs)]

mod dump;
mod inspect;
mod run;
mod settings;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use cds_common::SharingMode;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Shared class-metadata archive tool.
#[derive(Parser, Debug)]
#[command(name = "cds", version, about = "Shared class-metadata archive tool")]
pub struct Cli {
    /// Increase tool logging (`-v` info, `-vv` debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `cds.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record the classpath fingerprint and write an archive.
    Dump(DumpArgs),
    /// Validate the current classpath against an archive.
    Run(RunArgs),
    /// Print the header and fingerprint stored in an archive.
    Inspect(InspectArgs),
}

/// Arguments for the `cds dump` subcommand.
#[derive(Parser, Debug)]
pub struct DumpArgs {
    /// Classpath to record, entries separated by the platform separator.
    #[arg(long, visible_alias = "cp", default_value = "")]
    pub classpath: String,

    /// Archive file to write (falls back to `sharing.archive`).
    #[arg(long)]
    pub archive: Option<PathBuf>,

    /// File whose bytes become the archive payload.
    #[arg(long)]
    pub payload: Option<PathBuf>,
}

/// Arguments for the `cds run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Current classpath, entries separated by the platform separator.
    #[arg(long, visible_alias = "cp", default_value = "")]
    pub classpath: String,

    /// Archive file to validate against (falls back to `sharing.archive`).
    #[arg(long)]
    pub archive: Option<PathBuf>,

    /// Sharing mode: `off`, `auto`, or `required` (alias `on`).
    #[arg(long)]
    pub share: Option<SharingMode>,

    /// Log selector such as `class+path=info`; may be repeated.
    #[arg(long = "log")]
    pub log: Vec<String>,
}

/// Arguments for the `cds inspect` subcommand.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Archive file to read (falls back to `sharing.archive`).
    #[arg(long)]
    pub archive: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Output format for `inspect`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable text.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        color,
        config: cli.config,
    };

    let class_path_logging = match cli.command {
        Command::Run(ref args) => settings::class_path_logging(&global, &args.log),
        Command::Dump(_) | Command::Inspect(_) => false,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_directives(cli.verbose, class_path_logging)))
        .with_writer(std::io::stderr)
        .with_ansi(color)
        .with_target(false)
        .without_time()
        .init();

    let result = match cli.command {
        Command::Dump(ref args) => dump::run(args, &global),
        Command::Run(ref args) => run::run(args, &global),
        Command::Inspect(ref args) => inspect::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Tool log directives: `-v` raises everything, and an enabled `class+path`
/// category turns on the validator's per-entry events.
fn log_directives(verbose: u8, class_path_logging: bool) -> String {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let mut directives = format!("cds={level}");
    if class_path_logging && verbose < 2 {
        directives.push_str(",cds::class_path=debug");
    }
    directives
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_dump() {
        let cli = Cli::parse_from([
            "cds",
            "dump",
            "--classpath",
            "a.jar:b.jar",
            "--archive",
            "app.jsa",
        ]);
        match cli.command {
            Command::Dump(ref args) => {
                assert_eq!(args.classpath, "a.jar:b.jar");
                assert_eq!(args.archive, Some(PathBuf::from("app.jsa")));
                assert!(args.payload.is_none());
            }
            _ => panic!("expected Dump command"),
        }
    }

    #[test]
    fn parse_run_defaults() {
        let cli = Cli::parse_from(["cds", "run", "--archive", "app.jsa"]);
        match cli.command {
            Command::Run(ref args) => {
                assert_eq!(args.classpath, "");
                assert!(args.share.is_none());
                assert!(args.log.is_empty());
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn parse_run_with_mode_and_logging() {
        let cli = Cli::parse_from([
            "cds",
            "run",
            "--cp",
            "a.jar",
            "--share",
            "on",
            "--log",
            "class+path=info",
            "--log",
            "cds=warning",
        ]);
        match cli.command {
            Command::Run(ref args) => {
                assert_eq!(args.classpath, "a.jar");
                assert_eq!(args.share, Some(SharingMode::Required));
                assert_eq!(args.log, vec!["class+path=info", "cds=warning"]);
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn parse_run_rejects_unknown_mode() {
        let result = Cli::try_parse_from(["cds", "run", "--share", "sometimes"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_inspect_json() {
        let cli = Cli::parse_from(["cds", "inspect", "--archive", "app.jsa", "--format", "json"]);
        match cli.command {
            Command::Inspect(ref args) => {
                assert_eq!(args.format, ReportFormat::Json);
            }
            _ => panic!("expected Inspect command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from([
            "cds",
            "-vv",
            "--color",
            "never",
            "--config",
            "/etc/cds.toml",
            "inspect",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.color, ColorChoice::Never);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/cds.toml")));
    }

    #[test]
    fn log_directives_follow_verbosity() {
        assert_eq!(log_directives(0, false), "cds=warn");
        assert_eq!(log_directives(1, false), "cds=info");
        assert_eq!(log_directives(3, false), "cds=debug");
    }

    #[test]
    fn class_path_category_enables_validator_events() {
        assert_eq!(log_directives(0, true), "cds=warn,cds::class_path=debug");
        assert_eq!(log_directives(2, true), "cds=debug");
    }
}
