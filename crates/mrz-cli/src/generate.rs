//! # Generate CLI — Document fields to MRZ lines.
//!
//! Fields come from an optional JSON or YAML document (`--input`) and are
//! then overridden by individual flags, so a template file can be reused
//! with a different holder.
//!
//! ```bash
//! mrz generate --format P --input passport.yaml
//! mrz generate --format TD1 --document-type I --country-code UTO \
//!     --document-number D23145890 --birth-date 12/08/1974 --sex F \
//!     --expiry-date 15/04/2012 --nationality UTO \
//!     --surname ERIKSSON --given-names "ANNA MARIA"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use mrz_core::{Format, StructuredDocument};

/// Arguments for `mrz generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Layout tag: TD1, TD2, P (or TD3), MRVA, MRVB.
    #[arg(long)]
    pub format: String,

    /// JSON or YAML file holding the document fields.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Document code, e.g. P, I, ID, V.
    #[arg(long)]
    pub document_type: Option<String>,

    /// Issuing state (ICAO alpha-3).
    #[arg(long)]
    pub country_code: Option<String>,

    #[arg(long)]
    pub document_number: Option<String>,

    /// Birth date as DD/MM/YYYY.
    #[arg(long)]
    pub birth_date: Option<String>,

    /// M, F, X or <.
    #[arg(long)]
    pub sex: Option<String>,

    /// Expiry date as DD/MM/YYYY.
    #[arg(long)]
    pub expiry_date: Option<String>,

    #[arg(long)]
    pub nationality: Option<String>,

    #[arg(long)]
    pub surname: Option<String>,

    #[arg(long)]
    pub given_names: Option<String>,

    #[arg(long = "optional-data-1")]
    pub optional_data_1: Option<String>,

    /// TD1 only.
    #[arg(long = "optional-data-2")]
    pub optional_data_2: Option<String>,

    /// Print `{"format": ..., "lines": [...]}` instead of bare lines.
    #[arg(long)]
    pub json: bool,
}

/// Execute `mrz generate`.
pub fn run_generate(args: &GenerateArgs) -> Result<u8> {
    println!("{}", render(args)?);
    Ok(0)
}

/// Build the document, generate and format the output text.
pub fn render(args: &GenerateArgs) -> Result<String> {
    let format: Format = args.format.parse()?;
    let doc = build_document(args)?;
    tracing::info!(%format, document_type = %doc.document_type, "generating MRZ");

    let mrz = mrz_core::generate(&doc, format)
        .with_context(|| format!("cannot generate {format} MRZ"))?;
    tracing::debug!(format = %mrz.format(), lines = mrz.lines().len(), "generated MRZ");
    if args.json {
        Ok(serde_json::to_string_pretty(&mrz)?)
    } else {
        Ok(mrz.to_string())
    }
}

fn build_document(args: &GenerateArgs) -> Result<StructuredDocument> {
    let mut doc = match &args.input {
        Some(path) => load_document(path)?,
        None => StructuredDocument::default(),
    };
    let overrides = [
        (&mut doc.document_type, &args.document_type),
        (&mut doc.country_code, &args.country_code),
        (&mut doc.document_number, &args.document_number),
        (&mut doc.birth_date, &args.birth_date),
        (&mut doc.sex, &args.sex),
        (&mut doc.expiry_date, &args.expiry_date),
        (&mut doc.nationality, &args.nationality),
        (&mut doc.surname, &args.surname),
        (&mut doc.given_names, &args.given_names),
        (&mut doc.optional_data_1, &args.optional_data_1),
        (&mut doc.optional_data_2, &args.optional_data_2),
    ];
    for (field, value) in overrides {
        if let Some(value) = value {
            field.clone_from(value);
        }
    }
    Ok(doc)
}

/// Parse a document file. `.json` is read as JSON; anything else as YAML.
fn load_document(path: &Path) -> Result<StructuredDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read document: {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let doc = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON document: {}", path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML document: {}", path.display()))?
    };
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(format: &str) -> GenerateArgs {
        GenerateArgs {
            format: format.to_string(),
            input: None,
            document_type: None,
            country_code: None,
            document_number: None,
            birth_date: None,
            sex: None,
            expiry_date: None,
            nationality: None,
            surname: None,
            given_names: None,
            optional_data_1: None,
            optional_data_2: None,
            json: false,
        }
    }

    const TD3_YAML: &str = "\
document_type: P
country_code: UTO
document_number: L898902C3
birth_date: 12/08/1974
sex: F
expiry_date: 15/04/2012
nationality: UTO
surname: ERIKSSON
given_names: ANNA MARIA
optional_data_1: ZE184226B
";

    #[test]
    fn render_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("passport.yaml");
        std::fs::write(&path, TD3_YAML).unwrap();

        let mut a = args("P");
        a.input = Some(path);
        assert_eq!(
            render(&a).unwrap(),
            "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\n\
             L898902C36UTO7408122F1204159ZE184226B<<<<<10"
        );
    }

    #[test]
    fn render_from_json_file_with_legacy_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("visa.json");
        std::fs::write(
            &path,
            r#"{"document_type": "V", "contry_code": "UTO", "document_number": "L8988901C",
                "birth_date": "07/09/1940", "sex": "F", "expiration_date": "10/12/1996",
                "nationality": "XXX", "surname": "ERIKSSON", "given_names": "ANNA MARIA"}"#,
        )
        .unwrap();

        let mut a = args("MRVB");
        a.input = Some(path);
        assert_eq!(
            render(&a).unwrap(),
            "V<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<\nL8988901C4XXX4009078F9612109<<<<<<<<"
        );
    }

    #[test]
    fn flags_override_file_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("passport.yaml");
        std::fs::write(&path, TD3_YAML).unwrap();

        let mut a = args("TD3");
        a.input = Some(path);
        a.surname = Some("SMITH".into());
        let out = render(&a).unwrap();
        assert!(out.starts_with("P<UTOSMITH<<ANNA<MARIA<"));
    }

    #[test]
    fn render_json_output() {
        let mut a = args("TD2");
        a.document_type = Some("I".into());
        a.surname = Some("ERIKSSON".into());
        a.json = true;
        let value: serde_json::Value = serde_json::from_str(&render(&a).unwrap()).unwrap();
        assert_eq!(value["format"], "TD2");
        assert_eq!(value["lines"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn unknown_format_is_error() {
        assert!(render(&args("TD4")).is_err());
    }

    #[test]
    fn overlong_field_is_error() {
        let mut a = args("P");
        a.document_number = Some("ABCDEFGHIJKL".into());
        let err = render(&a).unwrap_err();
        assert!(format!("{err:#}").contains("document_number"));
    }

    #[test]
    fn malformed_yaml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "surname: [unterminated\n").unwrap();
        let mut a = args("P");
        a.input = Some(path);
        assert!(render(&a).is_err());
    }
}
