use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

use super::{SheetSource, SheetTable, SheetsError};

pub const DEFAULT_TTL_SECS: u64 = 60;

struct CachedTable {
    table: SheetTable,
    fetched_at: Instant,
}

/// Process-wide, per-sheet cache in front of a `SheetSource`.
///
/// Entries expire `ttl` after they were fetched. Failed fetches are not
/// stored, so the next request goes back to the source.
#[derive(Clone)]
pub struct SheetCache {
    source: Arc<dyn SheetSource>,
    ttl: Duration,
    entries: Arc<Mutex<HashMap<String, CachedTable>>>,
}

impl SheetCache {
    pub fn new(source: Arc<dyn SheetSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Cached table if it is still inside the window.
    fn lookup(&self, sheet_name: &str) -> Option<SheetTable> {
        let map = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        map.get(sheet_name)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.table.clone())
    }

    fn store(&self, sheet_name: &str, table: SheetTable) {
        let mut map = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        map.insert(
            sheet_name.to_string(),
            CachedTable { table, fetched_at: Instant::now() },
        );
    }

    /// Fetch a sheet, serving from the cache while the entry is fresh.
    pub async fn fetch(&self, sheet_name: &str) -> Result<SheetTable, SheetsError> {
        if let Some(table) = self.lookup(sheet_name) {
            log::debug!("Sheet cache hit: {sheet_name}");
            return Ok(table);
        }

        log::debug!("Sheet cache miss: {sheet_name}");
        let table = self.source.fetch_values(sheet_name).await?;
        self.store(sheet_name, table.clone());
        Ok(table)
    }

    /// Like `fetch`, but a failure degrades to an empty table plus a notice
    /// for the page to show.
    pub async fn fetch_or_empty(&self, sheet_name: &str) -> (SheetTable, Option<String>) {
        match self.fetch(sheet_name).await {
            Ok(table) => (table, None),
            Err(e) => {
                log::error!("Fetching sheet '{sheet_name}' failed: {e}");
                (SheetTable::empty(), Some(format!("Error fetching data: {e}")))
            }
        }
    }
}
