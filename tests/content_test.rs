//! Content lookup tests — label lookup, team-code parsing, and degraded tables.

mod common;

use common::*;
use team_registration::models::content::{get_content, PageContent};
use team_registration::sheets::SheetTable;

#[test]
fn test_absent_label_is_empty() {
    let t = content_table();
    for label in ["missing", "Welcome_Text", "", "Content"] {
        assert_eq!(get_content(label, &t), "", "label {label:?}");
    }
}

#[test]
fn test_present_label_returns_value() {
    let t = content_table();
    assert_eq!(get_content("welcome_text", &t), WELCOME_TEXT);
    assert_eq!(get_content("welcome_image", &t), WELCOME_IMAGE);
    assert_eq!(get_content("team_codes", &t), TEAM_CODES);
}

#[test]
fn test_empty_table_is_empty() {
    assert_eq!(get_content("welcome_text", &SheetTable::empty()), "");
}

#[test]
fn test_header_only_table_is_empty() {
    let t = table(&[&["Content Type", "Content"]]);
    assert_eq!(get_content("welcome_text", &t), "");
}

#[test]
fn test_missing_columns_is_empty() {
    let t = table(&[&["Type", "Value"], &["welcome_text", "Hi"]]);
    assert_eq!(get_content("welcome_text", &t), "");
}

#[test]
fn test_page_content_from_table() {
    let content = PageContent::from_table(&content_table());
    assert_eq!(content.welcome_text, WELCOME_TEXT);
    assert_eq!(content.welcome_image, WELCOME_IMAGE);
    assert_eq!(content.importance_text, IMPORTANCE_TEXT);
    assert_eq!(content.importance_image, "");
    assert_eq!(content.team_codes, vec!["MON001", "MON002"]);
}

#[test]
fn test_code_membership_is_exact() {
    let content = PageContent::from_table(&content_table());
    assert!(content.is_valid_code("MON002"));
    assert!(!content.is_valid_code("mon002"));
    assert!(!content.is_valid_code(" MON002"));
    assert!(!content.is_valid_code("MON002 "));
    assert!(!content.is_valid_code(""));
}

#[test]
fn test_page_content_from_empty_table_is_default() {
    assert_eq!(PageContent::from_table(&SheetTable::empty()), PageContent::default());
}
