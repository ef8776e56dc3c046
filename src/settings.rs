use std::path::PathBuf;

use config::{Config, Environment};
use serde::Deserialize;

use crate::error::CatalogError;

pub const DEFAULT_PUBLISHERS_FILE: &str = "publishers.json";
pub const DEFAULT_DELIMITER: &str = "\t";

/// Run-wide settings. Defaults can be overridden with `HB_PUBLISHERS_FILE`
/// and `HB_DELIMITER`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub publishers_file: PathBuf,
    pub delimiter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            publishers_file: PathBuf::from(DEFAULT_PUBLISHERS_FILE),
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_sources(Environment::with_prefix("HB"))
    }

    fn from_sources(env: Environment) -> Result<Self, CatalogError> {
        let settings = Config::builder()
            .set_default("publishers_file", DEFAULT_PUBLISHERS_FILE)?
            .set_default("delimiter", DEFAULT_DELIMITER)?
            .add_source(env)
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Delimiter as the single byte the writer needs.
    pub fn delimiter_byte(&self) -> Result<u8, CatalogError> {
        parse_delimiter(&self.delimiter)
    }
}

pub fn parse_delimiter(raw: &str) -> Result<u8, CatalogError> {
    let value = match raw {
        "\\t" | "tab" => "\t",
        other => other,
    };
    match value.as_bytes() {
        // quote and line terminators would make rows ambiguous
        [b'"' | b'\r' | b'\n'] => Err(CatalogError::BadDelimiter(raw.to_string())),
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(CatalogError::BadDelimiter(raw.to_string())),
    }
}
