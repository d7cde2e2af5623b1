//! # Formats CLI — List supported MRZ layouts.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use mrz_core::{Checksum, Format};

/// Arguments for `mrz formats`.
#[derive(Args, Debug)]
pub struct FormatsArgs {
    /// Print as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct FormatSummary {
    tag: &'static str,
    description: &'static str,
    lines: usize,
    width: usize,
    checks: Vec<Checksum>,
}

fn summaries() -> Vec<FormatSummary> {
    Format::all()
        .iter()
        .map(|f| {
            let profile = f.profile();
            FormatSummary {
                tag: f.as_str(),
                description: f.description(),
                lines: profile.line_count,
                width: profile.line_width,
                checks: profile.checks.iter().map(|r| r.checksum).collect(),
            }
        })
        .collect()
}

/// Execute `mrz formats`.
pub fn run_formats(args: &FormatsArgs) -> Result<u8> {
    let summaries = summaries();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(0);
    }
    println!("Supported formats:");
    println!();
    for s in &summaries {
        println!("  {:<5} {}x{:<3} {}", s.tag, s.lines, s.width, s.description);
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summaries_cover_every_format() {
        let s = summaries();
        assert_eq!(s.len(), mrz_core::FORMAT_COUNT);
        let td1 = s.iter().find(|s| s.tag == "TD1").unwrap();
        assert_eq!((td1.lines, td1.width), (3, 30));
        assert_eq!(td1.checks.len(), 4);
        let mrvb = s.iter().find(|s| s.tag == "MRVB").unwrap();
        assert!(!mrvb.checks.contains(&Checksum::Composite));
    }

    #[test]
    fn summaries_serialize() {
        let json = serde_json::to_value(summaries()).unwrap();
        assert_eq!(json[2]["tag"], "P");
        assert_eq!(json[2]["width"], 44);
    }
}
