use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::process::date_parser;

/// One source row keyed by its own header names.
pub type RawRow = HashMap<String, String>;

/// Which source columns feed the canonical `date`, `user` and `text` fields,
/// and how the source separates its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub date: String,
    pub user: String,
    pub text: String,
    #[serde(
        default = "default_delimiter",
        deserialize_with = "delimiter_from_char",
        serialize_with = "delimiter_to_char"
    )]
    pub delimiter: u8,
}

impl ColumnMapping {
    pub fn new(date: impl Into<String>, user: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            user: user.into(),
            text: text.into(),
            delimiter: default_delimiter(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

fn default_delimiter() -> u8 {
    b','
}

fn delimiter_from_char<'de, D: Deserializer<'de>>(de: D) -> Result<u8, D::Error> {
    let c = char::deserialize(de)?;
    if c.is_ascii() && c != '"' && c != '\n' && c != '\r' {
        Ok(c as u8)
    } else {
        Err(serde::de::Error::custom(format!(
            "delimiter must be a single ASCII character other than a quote or line break, got {c:?}"
        )))
    }
}

fn delimiter_to_char<S: serde::Serializer>(d: &u8, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_char(*d as char)
}

/// A row reduced to the canonical source fields, before cleaning and scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRow {
    pub date: NaiveDateTime,
    pub user: String,
    pub text: String,
}

#[derive(Error, Debug, PartialEq)]
pub enum MapError {
    #[error("no column `{column}` for field `{field}`")]
    MissingField { field: &'static str, column: String },

    #[error("cannot parse date `{value}`")]
    DateParse { value: String },
}

/// Pull the mapped columns out of `raw`, normalising the date and the user name.
pub fn map_row(raw: &RawRow, mapping: &ColumnMapping) -> Result<MappedRow, MapError> {
    let lookup = |field: &'static str, column: &str| {
        raw.get(column).ok_or_else(|| MapError::MissingField {
            field,
            column: column.to_string(),
        })
    };

    let date_raw = lookup("date", &mapping.date)?;
    let user = lookup("user", &mapping.user)?;
    let text = lookup("text", &mapping.text)?;

    let date = date_parser::parse_datetime(date_raw).ok_or_else(|| MapError::DateParse {
        value: date_raw.clone(),
    })?;

    Ok(MappedRow {
        date,
        user: user.to_lowercase(),
        text: text.clone(),
    })
}
