//! # Check CLI — Verify MRZ lines.
//!
//! Reads MRZ lines from `--file` or standard input and prints a report of
//! every check digit plus any warnings.
//!
//! Exit status is `0` when every check digit passes and
//! [`EXIT_INVALID`](crate::EXIT_INVALID) when any fails. Malformed input
//! (wrong line count or width) is an error and exits `1`.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use mrz_core::{Checker, CheckerConfig, Format, ValidationResult};

use crate::{read_input, EXIT_INVALID};

/// Arguments for `mrz check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Layout tag: TD1, TD2, P (or TD3), MRVA, MRVB.
    #[arg(long)]
    pub format: String,

    /// File with the MRZ lines. Reads standard input if omitted.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Skip expiry, date plausibility and code warnings.
    #[arg(long)]
    pub no_warnings: bool,

    /// Print the full result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute `mrz check`.
pub fn run_check(args: &CheckArgs, config: &CheckerConfig) -> Result<u8> {
    let text = read_input(args.file.as_deref())?;
    let result = check_text(args, config, &text)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_report(&result)?);
    }
    Ok(if result.valid { 0 } else { EXIT_INVALID })
}

/// Check `text` according to `args` without touching stdin or stdout.
pub fn check_text(args: &CheckArgs, config: &CheckerConfig, text: &str) -> Result<ValidationResult> {
    let format: Format = args.format.parse()?;
    let checker = Checker::new(config.clone());
    tracing::debug!(
        %format,
        reference_date = %checker.config().reference_date,
        "checking MRZ"
    );
    let result = checker
        .check(text, format, !args.no_warnings)
        .with_context(|| format!("cannot check input as {format}"))?;
    for warning in &result.warnings {
        tracing::warn!(field = %warning.field, "{}", warning.message);
    }
    Ok(result)
}

/// Human-readable report.
pub fn render_report(result: &ValidationResult) -> Result<String> {
    let mut out = String::new();
    write_report(&mut out, result).context("failed to render report")?;
    Ok(out)
}

fn write_report(out: &mut String, result: &ValidationResult) -> std::fmt::Result {
    let f = &result.fields;
    let verdict = if result.valid { "VALID" } else { "INVALID" };
    writeln!(out, "{} MRZ: {verdict}", result.format)?;
    writeln!(out)?;
    for (label, value) in [
        ("document type", &f.document_type),
        ("issuing state", &f.country_code),
        ("document number", &f.document_number),
        ("surname", &f.surname),
        ("given names", &f.given_names),
        ("nationality", &f.nationality),
        ("birth date", &f.birth_date),
        ("sex", &f.sex),
        ("expiry date", &f.expiry_date),
        ("optional data 1", &f.optional_data_1),
        ("optional data 2", &f.optional_data_2),
    ] {
        if !value.is_empty() {
            writeln!(out, "  {label:<16} {value}")?;
        }
    }
    writeln!(out)?;
    for c in &result.checks {
        let status = if c.passed { "ok" } else { "FAIL" };
        write!(
            out,
            "  {:<16} {status:<4} (found {}, expected {})",
            c.checksum.to_string(),
            c.found,
            c.expected
        )?;
        if let Some(field) = c.non_numeric {
            write!(out, " letter in {field}")?;
        }
        writeln!(out)?;
    }
    if !result.warnings.is_empty() {
        writeln!(out)?;
        for w in &result.warnings {
            writeln!(out, "  warning: {}", w.message)?;
        }
    }
    Ok(())
}
