//! Spreadsheet access: the `SheetSource` seam, the Google Sheets client, and
//! the time-bounded cache the page reads through.

pub mod cache;
pub mod client;

use async_trait::async_trait;
use std::fmt;

pub use cache::SheetCache;
pub use client::GoogleSheetsClient;

/// Tab holding the labelled page content and the team-code list.
pub const CONTENT_SHEET: &str = "B2B Inputs";
/// Tab holding one row per offered time slot.
pub const TIMESLOTS_SHEET: &str = "Timeslots";

/// Rows of a sheet exactly as the values API returns them, header row first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetTable {
    rows: Vec<Vec<String>>,
}

impl SheetTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Position of a header cell, matched exactly.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header()?.iter().position(|h| h == name)
    }

    /// Everything after the header row.
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// A cell of a data row. The API drops trailing empty cells, so a missing
    /// cell reads as "".
    pub fn cell(row: &[String], index: usize) -> &str {
        row.get(index).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug)]
pub enum SheetsError {
    Auth(String),
    Http(reqwest::Error),
    Api { status: u16, message: String },
    Decode(String),
}

impl fmt::Display for SheetsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetsError::Auth(e) => write!(f, "Auth error: {e}"),
            SheetsError::Http(e) => write!(f, "HTTP error: {e}"),
            SheetsError::Api { status, message } => {
                write!(f, "Sheets API error ({status}): {message}")
            }
            SheetsError::Decode(e) => write!(f, "Decode error: {e}"),
        }
    }
}

impl std::error::Error for SheetsError {}

impl From<reqwest::Error> for SheetsError {
    fn from(e: reqwest::Error) -> Self {
        SheetsError::Http(e)
    }
}

impl From<gcp_auth::Error> for SheetsError {
    fn from(e: gcp_auth::Error) -> Self {
        SheetsError::Auth(e.to_string())
    }
}

/// Anything that can return the A:Z values of a named sheet.
#[async_trait]
pub trait SheetSource: Send + Sync {
    async fn fetch_values(&self, sheet_name: &str) -> Result<SheetTable, SheetsError>;
}
