use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gcp_auth::{CustomServiceAccount, TokenProvider};
use reqwest::Url;
use serde::Deserialize;

use super::{SheetSource, SheetTable, SheetsError};

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

/// Reads sheet values through the Google Sheets v4 REST API.
pub struct GoogleSheetsClient {
    api_base: String,
    spreadsheet_id: String,
    token_provider: Arc<dyn TokenProvider>,
    client: reqwest::Client,
}

// TokenProvider doesn't implement Debug
impl std::fmt::Debug for GoogleSheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheetsClient")
            .field("api_base", &self.api_base)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("token_provider", &"<TokenProvider>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(default)]
    status: String,
}

impl GoogleSheetsClient {
    pub fn new(
        api_base: &str,
        spreadsheet_id: &str,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Result<Self, SheetsError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            token_provider,
            client,
        })
    }

    /// Build a token provider from inline service-account JSON, or fall back to
    /// gcp_auth's discovery (GOOGLE_APPLICATION_CREDENTIALS, metadata server, gcloud).
    pub async fn token_provider(
        service_account_json: Option<&str>,
    ) -> Result<Arc<dyn TokenProvider>, SheetsError> {
        match service_account_json {
            Some(json) => {
                let account: Arc<dyn TokenProvider> =
                    Arc::new(CustomServiceAccount::from_json(json)?);
                Ok(account)
            }
            None => Ok(gcp_auth::provider().await?),
        }
    }

    /// URL of the A:Z values range for a sheet.
    pub fn values_url(&self, sheet_name: &str) -> Result<Url, SheetsError> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| SheetsError::Decode(format!("Bad API base URL {}: {e}", self.api_base)))?;
        let range = a1_range(sheet_name);
        url.path_segments_mut()
            .map_err(|_| SheetsError::Decode(format!("API base URL cannot have a path: {}", self.api_base)))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values", range.as_str()]);
        Ok(url)
    }

    async fn access_token(&self) -> Result<String, SheetsError> {
        let token = self.token_provider.token(&[SHEETS_SCOPE]).await?;
        Ok(token.as_str().to_string())
    }
}

#[async_trait]
impl SheetSource for GoogleSheetsClient {
    async fn fetch_values(&self, sheet_name: &str) -> Result<SheetTable, SheetsError> {
        let url = self.values_url(sheet_name)?;
        let access_token = self.access_token().await?;

        let response = self.client.get(url).bearer_auth(&access_token).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(err) if err.error.status.is_empty() => err.error.message,
                Ok(err) => format!("{} ({})", err.error.message, err.error.status),
                Err(_) => body,
            };
            return Err(SheetsError::Api { status: status.as_u16(), message });
        }

        parse_values(&body)
    }
}

/// `'Sheet Name'!A:Z`, with embedded quotes doubled.
pub fn a1_range(sheet_name: &str) -> String {
    format!("'{}'!A:Z", sheet_name.replace('\'', "''"))
}

/// Decode a ValueRange body. A missing `values` field is an empty sheet.
pub fn parse_values(body: &str) -> Result<SheetTable, SheetsError> {
    let range: ValueRange = serde_json::from_str(body)
        .map_err(|e| SheetsError::Decode(format!("Bad values response: {e}")))?;
    let rows = range
        .values
        .into_iter()
        .map(|row| row.into_iter().map(cell_to_string).collect())
        .collect();
    Ok(SheetTable::new(rows))
}

fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
