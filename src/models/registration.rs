use std::fmt;

use super::content::PageContent;

pub const SUCCESS_MESSAGE: &str = "Спасибо! Ваш ответ записан.";

/// Why a submission was turned down. Each variant maps to the banner text
/// shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    InvalidCode,
    NoTimeSelected,
    TooManyAttempts,
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::InvalidCode => write!(f, "Неверный код команды"),
            RegistrationError::NoTimeSelected => write!(f, "Пожалуйста, выберите время"),
            RegistrationError::TooManyAttempts => {
                write!(f, "Слишком много попыток. Попробуйте позже.")
            }
        }
    }
}

/// A decoded form post. Lives for one request only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub team_code: String,
    pub selected_times: Vec<String>,
    pub csrf_token: String,
}

impl Submission {
    /// Decode a urlencoded body. `timeslot` repeats once per selected option;
    /// unknown keys are ignored. The team code is kept verbatim.
    pub fn from_body(body: &str) -> Self {
        let mut submission = Submission::default();
        for (key, value) in parse_form_body(body) {
            match key.as_str() {
                "team_code" => submission.team_code = value,
                "csrf_token" => submission.csrf_token = value,
                "timeslot" => {
                    if !submission.selected_times.contains(&value) {
                        submission.selected_times.push(value);
                    }
                }
                _ => {}
            }
        }
        submission
    }

    /// Drop selections that are not currently on offer.
    pub fn retain_offered(&mut self, options: &[String]) {
        self.selected_times.retain(|t| options.contains(t));
    }
}

/// Check a submission against the freshly fetched content. The code is
/// checked first; only the first failure is reported.
pub fn validate(content: &PageContent, submission: &Submission) -> Result<(), RegistrationError> {
    if !content.is_valid_code(&submission.team_code) {
        return Err(RegistrationError::InvalidCode);
    }
    if submission.selected_times.is_empty() {
        return Err(RegistrationError::NoTimeSelected);
    }
    Ok(())
}

/// Decode a URL-encoded string (form data): `+` → space, `%HH` → byte.
fn url_decode(s: &str) -> String {
    let b = s.as_bytes();
    let mut out = Vec::with_capacity(b.len());
    let mut i = 0;
    while i < b.len() {
        match b[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < b.len() => {
                let hex = std::str::from_utf8(&b[i + 1..i + 3]).ok();
                if let Some(byte) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    out.push(byte);
                    i += 3;
                    continue;
                }
                out.push(b'%');
            }
            other => out.push(other),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Parse URL-encoded form body into key-value pairs, keeping repeats.
fn parse_form_body(body: &str) -> Vec<(String, String)> {
    body.split('&')
        .filter(|s| !s.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (url_decode(k), url_decode(v)),
            None => (url_decode(pair), String::new()),
        })
        .collect()
}
