//! Shared test infrastructure.
//!
//! - `FakeSheets` - in-memory `SheetSource` that counts calls and can fail on demand
//! - `table()` / `content_table()` / `timeslots_table()` - sheet builders

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use team_registration::sheets::{SheetSource, SheetTable, SheetsError};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const TEAM_CODES: &str = "MON001, MON002";
pub const WELCOME_TEXT: &str = "Welcome to the league";
pub const WELCOME_IMAGE: &str = "https://example.com/welcome.png";
pub const IMPORTANCE_TEXT: &str = "Weekly calls keep the team in sync";

// ============================================================================
// FAKE SOURCE
// ============================================================================

#[derive(Default)]
pub struct FakeSheets {
    tables: Mutex<HashMap<String, SheetTable>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl FakeSheets {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_table(&self, name: &str, table: SheetTable) {
        self.tables.lock().unwrap().insert(name.to_string(), table);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of remote fetches made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SheetSource for FakeSheets {
    async fn fetch_values(&self, sheet_name: &str) -> Result<SheetTable, SheetsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(SheetsError::Api {
                status: 503,
                message: "backend unavailable".to_string(),
            });
        }
        Ok(self
            .tables
            .lock()
            .unwrap()
            .get(sheet_name)
            .cloned()
            .unwrap_or_default())
    }
}

// ============================================================================
// TABLE BUILDERS
// ============================================================================

pub fn table(rows: &[&[&str]]) -> SheetTable {
    SheetTable::new(
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}

/// A `B2B Inputs` sheet with every label the page reads.
pub fn content_table() -> SheetTable {
    table(&[
        &["Content Type", "Content"],
        &["welcome_text", WELCOME_TEXT],
        &["welcome_image", WELCOME_IMAGE],
        &["importance_text", IMPORTANCE_TEXT],
        &["importance_image", ""],
        &["team_codes", TEAM_CODES],
    ])
}

/// A `Timeslots` sheet with two slots.
pub fn timeslots_table() -> SheetTable {
    table(&[
        &["team_type", "team_day", "team_time", "team_users"],
        &["Weekly", "Monday", "18:00", "4"],
        &["Weekly", "Thursday", "19:30", "7"],
    ])
}

pub const MONDAY_OPTION: &str = "Weekly | Monday | 18:00 (4 участников)";
pub const THURSDAY_OPTION: &str = "Weekly | Thursday | 19:30 (7 участников)";
