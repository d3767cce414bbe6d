//! CSV intake for scored protocols.

use super::domain::Response;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row { line: u64, message: String },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read protocol file: {}", err),
            ImportError::Csv(err) => write!(f, "invalid protocol CSV data: {}", err),
            ImportError::Row { line, message } => {
                write!(f, "invalid response on line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::Row { .. } => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct ResponseImporter;

impl ResponseImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Response>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads one response per row. Rows with an empty card are kept so the
    /// engine sees the protocol exactly as entered.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Response>, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut responses = Vec::new();

        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();
            let row: ResponseRow = record.deserialize(Some(&headers))?;
            responses.push(row.into_response(line)?);
        }

        tracing::debug!(rows = responses.len(), "imported protocol rows");
        Ok(responses)
    }
}

#[derive(Debug, Deserialize)]
struct ResponseRow {
    #[serde(default)]
    card: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    dq: String,
    #[serde(default)]
    determinants: String,
    #[serde(default)]
    fq: String,
    #[serde(default)]
    pair: String,
    #[serde(default)]
    contents: String,
    #[serde(default, deserialize_with = "popular_flag")]
    popular: PopularFlag,
    #[serde(default)]
    z: String,
    #[serde(default)]
    special_scores: String,
}

#[derive(Debug, Default)]
enum PopularFlag {
    Set,
    #[default]
    Unset,
    Invalid(String),
}

impl ResponseRow {
    fn into_response(self, line: u64) -> Result<Response, ImportError> {
        let popular = match self.popular {
            PopularFlag::Set => true,
            PopularFlag::Unset => false,
            PopularFlag::Invalid(raw) => {
                return Err(ImportError::Row {
                    line,
                    message: format!("popular must be P, true, yes or 1, got '{}'", raw),
                })
            }
        };

        Ok(Response {
            card: self.card,
            location: self.location,
            dq: self.dq,
            determinants: split_codes(&self.determinants, &['.', ',']),
            fq: self.fq,
            pair: self.pair,
            contents: split_codes(&self.contents, &[',', ';', ' ', '\t']),
            popular,
            z: self.z,
            special_scores: split_codes(&self.special_scores, &[',', ';', ' ', '\t']),
        })
    }
}

fn split_codes(raw: &str, separators: &[char]) -> Vec<String> {
    raw.split(|ch| separators.contains(&ch))
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

fn popular_flag<'de, D>(deserializer: D) -> Result<PopularFlag, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let flag = match raw.trim().to_ascii_lowercase().as_str() {
        "p" | "true" | "yes" | "y" | "1" => PopularFlag::Set,
        "" | "false" | "no" | "n" | "0" | "-" => PopularFlag::Unset,
        _ => PopularFlag::Invalid(raw),
    };
    Ok(flag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "card,location,dq,determinants,fq,pair,contents,popular,z,special_scores\n";

    fn import(body: &str) -> Result<Vec<Response>, ImportError> {
        ResponseImporter::from_reader(Cursor::new(format!("{HEADER}{body}")))
    }

    #[test]
    fn splits_multi_valued_columns() {
        let responses = import("II,W,+,Ma.CF,o,(2),\"H, Bl\",P,ZA,COP;DV\n").expect("imports");
        assert_eq!(responses.len(), 1);

        let response = &responses[0];
        assert_eq!(response.card, "II");
        assert_eq!(response.determinants, vec!["Ma", "CF"]);
        assert_eq!(response.contents, vec!["H", "Bl"]);
        assert_eq!(response.special_scores, vec!["COP", "DV"]);
        assert!(response.popular);
        assert_eq!(response.pair, "(2)");
    }

    #[test]
    fn keeps_rows_without_a_card() {
        let responses = import(",W,o,F,o,,A,,,\nI,W,o,F,o,,A,yes,ZW,\n").expect("imports");
        assert_eq!(responses.len(), 2);
        assert!(!responses[0].has_card());
        assert!(!responses[0].popular);
        assert!(responses[1].popular);
    }

    #[test]
    fn rejects_unreadable_popular_flag_with_line_number() {
        let err = import("I,W,o,F,o,,A,P,ZW,\nII,D,o,F,o,,A,sometimes,,\n")
            .expect_err("invalid popular flag");
        match err {
            ImportError::Row { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("sometimes"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ResponseImporter::from_path("/definitely/not/here.csv").expect_err("missing");
        assert!(matches!(err, ImportError::Io(_)));
    }
}
