//! Registration validation tests — team-code check, selection check, and
//! time-slot option building from the sheet.

mod common;

use common::*;
use team_registration::models::content::PageContent;
use team_registration::models::registration::{validate, RegistrationError, Submission};
use team_registration::models::timeslot::{time_options, timeslots_from_table, CANT_MAKE_IT};

fn submission(code: &str, times: &[&str]) -> Submission {
    Submission {
        team_code: code.to_string(),
        selected_times: times.iter().map(|t| t.to_string()).collect(),
        csrf_token: String::new(),
    }
}

#[test]
fn test_valid_code_and_time_passes() {
    let content = PageContent::from_table(&content_table());
    assert_eq!(validate(&content, &submission("MON002", &[MONDAY_OPTION])), Ok(()));
}

#[test]
fn test_sentinel_alone_counts_as_selection() {
    let content = PageContent::from_table(&content_table());
    assert_eq!(validate(&content, &submission("MON001", &[CANT_MAKE_IT])), Ok(()));
}

#[test]
fn test_case_or_space_mismatch_fails() {
    let content = PageContent::from_table(&content_table());
    for code in ["mon002", " MON002", "MON002 ", "MON00"] {
        assert_eq!(
            validate(&content, &submission(code, &[MONDAY_OPTION])),
            Err(RegistrationError::InvalidCode),
            "code {code:?}"
        );
    }
}

#[test]
fn test_empty_selection_always_fails() {
    let content = PageContent::from_table(&content_table());
    assert_eq!(
        validate(&content, &submission("MON001", &[])),
        Err(RegistrationError::NoTimeSelected)
    );
    // An invalid code with no selection still fails (code error reported first)
    assert!(validate(&content, &submission("nope", &[])).is_err());
}

#[test]
fn test_error_messages() {
    assert_eq!(RegistrationError::InvalidCode.to_string(), "Неверный код команды");
    assert_eq!(RegistrationError::NoTimeSelected.to_string(), "Пожалуйста, выберите время");
}

#[test]
fn test_options_from_timeslots_sheet() {
    let slots = timeslots_from_table(&timeslots_table()).expect("well-formed sheet");
    let options = time_options(&slots);
    assert_eq!(options, vec![MONDAY_OPTION, THURSDAY_OPTION, CANT_MAKE_IT]);
}

#[test]
fn test_header_only_timeslots_offer_nothing() {
    let header_only = table(&[&["team_type", "team_day", "team_time", "team_users"]]);
    let slots = timeslots_from_table(&header_only).expect("header-only sheet");
    assert!(slots.is_empty());
    assert!(time_options(&slots).is_empty());
}

#[test]
fn test_short_timeslot_row_reads_empty_cells() {
    let t = table(&[
        &["team_type", "team_day", "team_time", "team_users"],
        &["Daily", "Friday"],
    ]);
    let slots = timeslots_from_table(&t).expect("short row");
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].display(), "Daily | Friday |  ( участников)");
}

#[test]
fn test_timeslot_columns_matched_by_name() {
    let t = table(&[
        &["team_users", "team_time", "team_day", "team_type"],
        &["3", "10:00", "Sunday", "Monthly"],
    ]);
    let slots = timeslots_from_table(&t).expect("reordered columns");
    assert_eq!(slots[0].display(), "Monthly | Sunday | 10:00 (3 участников)");
}

#[test]
fn test_timeslots_without_expected_headers_offer_nothing() {
    let t = table(&[&["a", "b"], &["x", "y"]]);
    let notice = timeslots_from_table(&t).unwrap_err();
    assert!(notice.starts_with("Error getting timeslots:"));
    assert!(notice.contains("'team_type'"));
}
