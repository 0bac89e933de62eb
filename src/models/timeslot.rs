use super::content::quoted;
use crate::sheets::SheetTable;

/// Option meaning "none of the offered times work for me".
pub const CANT_MAKE_IT: &str = "Не смогу в это время";

const TYPE_COLUMN: &str = "team_type";
const DAY_COLUMN: &str = "team_day";
const TIME_COLUMN: &str = "team_time";
const USERS_COLUMN: &str = "team_users";

/// One offered meeting slot, as listed in the timeslots sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeslot {
    pub slot_type: String,
    pub day: String,
    pub time: String,
    pub participants: String,
}

impl Timeslot {
    /// The option label shown in the multi-select. Also the slot's only identity.
    pub fn display(&self) -> String {
        format!(
            "{} | {} | {} ({} участников)",
            self.slot_type, self.day, self.time, self.participants
        )
    }
}

/// One slot per data row, columns matched by header name. A table missing
/// any of the four columns yields a user-facing notice instead of slots; an
/// empty table yields no slots. Missing cells in short rows read as "".
pub fn timeslots_from_table(table: &SheetTable) -> Result<Vec<Timeslot>, String> {
    if table.is_empty() {
        return Ok(Vec::new());
    }

    let columns = [TYPE_COLUMN, DAY_COLUMN, TIME_COLUMN, USERS_COLUMN];
    let indices: Vec<Option<usize>> = columns.iter().map(|c| table.column_index(c)).collect();
    let missing: Vec<&str> = columns
        .iter()
        .zip(&indices)
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        log::warn!("Timeslots table is missing columns: {}", missing.join(", "));
        return Err(format!("Error getting timeslots: missing column(s) {}", quoted(&missing)));
    }

    Ok(table
        .data_rows()
        .iter()
        .map(|row| Timeslot {
            slot_type: cell(row, indices[0]),
            day: cell(row, indices[1]),
            time: cell(row, indices[2]),
            participants: cell(row, indices[3]),
        })
        .collect())
}

fn cell(row: &[String], idx: Option<usize>) -> String {
    idx.map(|i| SheetTable::cell(row, i).to_string()).unwrap_or_default()
}

/// Multi-select options: each slot's display string, then the sentinel.
/// With no slots there is nothing to choose from, so no options at all.
pub fn time_options(slots: &[Timeslot]) -> Vec<String> {
    if slots.is_empty() {
        return Vec::new();
    }
    slots
        .iter()
        .map(Timeslot::display)
        .chain(std::iter::once(CANT_MAKE_IT.to_string()))
        .collect()
}
