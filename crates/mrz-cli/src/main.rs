//! # mrz CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mrz_cli::check::{run_check, CheckArgs};
use mrz_cli::formats::{run_formats, FormatsArgs};
use mrz_cli::generate::{run_generate, GenerateArgs};
use mrz_cli::load_config;

/// MRZ codec CLI
///
/// Generates and checks ICAO 9303 machine-readable zones for TD1, TD2 and
/// TD3 documents and MRV-A/MRV-B visas.
#[derive(Parser, Debug)]
#[command(name = "mrz", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML checker configuration (reference date, century pivots).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render MRZ lines from document fields.
    Generate(GenerateArgs),

    /// Verify the check digits of MRZ lines.
    Check(CheckArgs),

    /// List supported formats.
    Formats(FormatsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "mrz CLI starting");

    let result = match &cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Check(args) => {
            load_config(cli.config.as_deref()).and_then(|config| run_check(args, &config))
        }
        Commands::Formats(args) => run_formats(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_generate_with_fields() {
        let cli = Cli::try_parse_from([
            "mrz",
            "generate",
            "--format",
            "P",
            "--surname",
            "ERIKSSON",
            "--given-names",
            "ANNA MARIA",
            "--optional-data-1",
            "ZE184226B",
            "--json",
        ])
        .unwrap();
        if let Commands::Generate(args) = cli.command {
            assert_eq!(args.format, "P");
            assert_eq!(args.surname.as_deref(), Some("ERIKSSON"));
            assert_eq!(args.given_names.as_deref(), Some("ANNA MARIA"));
            assert_eq!(args.optional_data_1.as_deref(), Some("ZE184226B"));
            assert!(args.json);
            assert!(args.input.is_none());
        } else {
            panic!("expected generate");
        }
    }

    #[test]
    fn cli_parse_generate_requires_format() {
        assert!(Cli::try_parse_from(["mrz", "generate", "--surname", "X"]).is_err());
    }

    #[test]
    fn cli_parse_check_defaults() {
        let cli = Cli::try_parse_from(["mrz", "check", "--format", "TD1"]).unwrap();
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.format, "TD1");
            assert!(args.file.is_none());
            assert!(!args.no_warnings);
            assert!(!args.json);
        } else {
            panic!("expected check");
        }
    }

    #[test]
    fn cli_parse_check_with_all_options() {
        let cli = Cli::try_parse_from([
            "mrz",
            "check",
            "--format",
            "MRVA",
            "--file",
            "visa.txt",
            "--no-warnings",
            "--json",
        ])
        .unwrap();
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.file, Some(PathBuf::from("visa.txt")));
            assert!(args.no_warnings);
            assert!(args.json);
        } else {
            panic!("expected check");
        }
    }

    #[test]
    fn cli_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "mrz", "formats", "-vv", "--config", "mrz.yaml", "--log-json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("mrz.yaml")));
        assert!(cli.log_json);
        assert!(matches!(cli.command, Commands::Formats(_)));
    }

    #[test]
    fn cli_parse_unknown_subcommand_fails() {
        assert!(Cli::try_parse_from(["mrz", "parse"]).is_err());
    }
}
