use crate::sheets::SheetTable;

pub const CONTENT_TYPE_COLUMN: &str = "Content Type";
pub const CONTENT_COLUMN: &str = "Content";

/// User-facing notice for a content table that cannot be read: one that has
/// rows but lacks the `Content Type` or `Content` header. An empty table
/// (nothing fetched) is not reported here.
pub fn check_content_table(table: &SheetTable) -> Option<String> {
    if table.is_empty() {
        return None;
    }
    let missing: Vec<&str> = [CONTENT_TYPE_COLUMN, CONTENT_COLUMN]
        .into_iter()
        .filter(|name| table.column_index(name).is_none())
        .collect();
    if missing.is_empty() {
        return None;
    }
    log::warn!("Content table is missing columns: {}", missing.join(", "));
    Some(format!("Error getting content: missing column(s) {}", quoted(&missing)))
}

/// Look up a labelled value in the content table.
///
/// Returns the `Content` cell of the first row whose `Content Type` equals
/// `label`, or "" when the label is absent or the table is malformed.
pub fn get_content(label: &str, table: &SheetTable) -> String {
    let (Some(label_idx), Some(value_idx)) = (
        table.column_index(CONTENT_TYPE_COLUMN),
        table.column_index(CONTENT_COLUMN),
    ) else {
        return String::new();
    };

    table
        .data_rows()
        .iter()
        .find(|row| SheetTable::cell(row, label_idx) == label)
        .map(|row| SheetTable::cell(row, value_idx).to_string())
        .unwrap_or_default()
}

pub(crate) fn quoted(names: &[&str]) -> String {
    names
        .iter()
        .map(|n| format!("'{n}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Split the configured code list on commas, trimming and dropping blanks.
/// A blank entry would otherwise make an empty code valid.
pub fn parse_team_codes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Everything the page reads from the content sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    pub welcome_text: String,
    pub welcome_image: String,
    pub importance_text: String,
    pub importance_image: String,
    pub team_codes: Vec<String>,
}

impl PageContent {
    pub fn from_table(table: &SheetTable) -> Self {
        Self {
            welcome_text: get_content("welcome_text", table),
            welcome_image: get_content("welcome_image", table),
            importance_text: get_content("importance_text", table),
            importance_image: get_content("importance_image", table),
            team_codes: parse_team_codes(&get_content("team_codes", table)),
        }
    }

    /// Exact, case-sensitive membership check.
    pub fn is_valid_code(&self, code: &str) -> bool {
        self.team_codes.iter().any(|c| c == code)
    }
}
