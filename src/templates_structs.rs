use askama::Template;

use crate::models::content::PageContent;

pub const PAGE_TITLE: &str = "Team Registration";

/// One entry of the time multi-select.
pub struct TimeOption {
    pub label: String,
    pub selected: bool,
}

impl TimeOption {
    pub fn list(options: &[String], selected: &[String]) -> Vec<Self> {
        options
            .iter()
            .map(|label| TimeOption {
                label: label.clone(),
                selected: selected.contains(label),
            })
            .collect()
    }
}

/// Result banner shown under the form after a submit.
pub enum Banner {
    Success(String),
    Error(String),
}

impl Banner {
    pub fn css_class(&self) -> &'static str {
        match self {
            Banner::Success(_) => "alert alert-success",
            Banner::Error(_) => "alert alert-error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Banner::Success(m) | Banner::Error(m) => m,
        }
    }
}

#[derive(Template)]
#[template(path = "registration.html")]
pub struct RegistrationTemplate {
    pub page_title: &'static str,
    pub content: PageContent,
    pub notices: Vec<String>,
    pub team_code: String,
    pub options: Vec<TimeOption>,
    pub banner: Option<Banner>,
    pub csrf_token: String,
}
