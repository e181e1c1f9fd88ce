mod auth;

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::OnceCell;

use crate::config::Config;
use crate::forms::{ContactForm, GetStartedForm, LenderPartnershipForm};

use auth::SheetsAuth;

pub const GET_STARTED_TAB: &str = "Get Started";
pub const CONTACT_TAB: &str = "Contact";
pub const LENDER_PARTNERSHIP_TAB: &str = "Lender Partnership";

#[derive(Debug)]
pub enum SheetsError {
    NotConfigured(&'static str),
    Credentials(String),
    Token(String),
    Api(String),
}

impl std::fmt::Display for SheetsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetsError::NotConfigured(var) => write!(f, "{var} not set"),
            SheetsError::Credentials(msg) => write!(f, "credentials error: {msg}"),
            SheetsError::Token(msg) => write!(f, "token error: {msg}"),
            SheetsError::Api(msg) => write!(f, "sheets api error: {msg}"),
        }
    }
}

/// Fixed header row for each known tab. Unknown tabs get no header.
pub fn headers_for_tab(tab: &str) -> &'static [&'static str] {
    match tab {
        GET_STARTED_TAB => &["Timestamp", "First Name", "Last Name", "Occupation"],
        CONTACT_TAB => &["Timestamp", "Name", "Email", "Topic", "Message"],
        LENDER_PARTNERSHIP_TAB => &[
            "Timestamp",
            "Name",
            "Company",
            "Email",
            "Phone",
            "Role",
            "City",
            "Notes",
        ],
        _ => &[],
    }
}

/// Append-only client for the Google Sheets v4 API.
///
/// The authenticated handle is built lazily from the credential blob
/// and cached for the process lifetime. A failed build caches nothing,
/// so the next call retries. Every failure surfaces as a `SheetsError`
/// for the caller to log; nothing here panics or propagates into the
/// HTTP response.
pub struct SheetsStore {
    http: reqwest::Client,
    api_url: String,
    credentials_json: Option<String>,
    spreadsheet_id: Option<String>,
    auth: OnceCell<Arc<SheetsAuth>>,
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: String,
}

impl SheetsStore {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build reqwest client"),
            api_url: config.sheets_api_url.clone(),
            credentials_json: config.google_credentials_json.clone(),
            spreadsheet_id: config.google_spreadsheet_id.clone(),
            auth: OnceCell::new(),
        }
    }

    async fn auth(&self) -> Result<&Arc<SheetsAuth>, SheetsError> {
        let raw = self
            .credentials_json
            .as_deref()
            .ok_or(SheetsError::NotConfigured("GOOGLE_CREDENTIALS_JSON"))?;

        self.auth
            .get_or_try_init(|| async { SheetsAuth::new(self.http.clone(), raw).map(Arc::new) })
            .await
    }

    fn spreadsheet_id(&self) -> Result<&str, SheetsError> {
        self.spreadsheet_id
            .as_deref()
            .ok_or(SheetsError::NotConfigured("GOOGLE_SPREADSHEET_ID"))
    }

    /// Append one row to a tab, creating the tab and its header row on
    /// first use. The ingestion timestamp is always prepended.
    pub async fn append_row(
        &self,
        spreadsheet_id: &str,
        tab: &str,
        values: &[String],
    ) -> Result<(), SheetsError> {
        let auth = self.auth().await?;
        let token = auth.access_token().await?;

        if !self.tab_exists(spreadsheet_id, tab, &token).await? {
            self.create_tab(spreadsheet_id, tab, &token).await?;
            let headers = headers_for_tab(tab);
            if !headers.is_empty() {
                let header_row: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
                self.append_values(spreadsheet_id, tab, &token, &header_row)
                    .await?;
            }
        }

        let mut row = Vec::with_capacity(values.len() + 1);
        row.push(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true));
        row.extend_from_slice(values);

        self.append_values(spreadsheet_id, tab, &token, &row).await?;
        tracing::info!("Appended row to sheet tab {tab}");
        Ok(())
    }

    async fn tab_exists(
        &self,
        spreadsheet_id: &str,
        tab: &str,
        token: &str,
    ) -> Result<bool, SheetsError> {
        let url = format!("{}/v4/spreadsheets/{spreadsheet_id}", self.api_url);
        let meta: SpreadsheetMeta = self
            .http
            .get(&url)
            .query(&[("fields", "sheets.properties.title")])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| SheetsError::Api(format!("spreadsheet lookup failed: {e}")))?
            .error_for_status()
            .map_err(|e| SheetsError::Api(format!("spreadsheet lookup rejected: {e}")))?
            .json()
            .await
            .map_err(|e| SheetsError::Api(format!("spreadsheet metadata decode failed: {e}")))?;

        Ok(meta.sheets.iter().any(|s| s.properties.title == tab))
    }

    async fn create_tab(
        &self,
        spreadsheet_id: &str,
        tab: &str,
        token: &str,
    ) -> Result<(), SheetsError> {
        let url = format!("{}/v4/spreadsheets/{spreadsheet_id}:batchUpdate", self.api_url);
        let body = json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": tab,
                        "gridProperties": { "rowCount": 1000, "columnCount": 20 }
                    }
                }
            }]
        });

        self.http
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| SheetsError::Api(format!("worksheet creation failed: {e}")))?
            .error_for_status()
            .map_err(|e| SheetsError::Api(format!("worksheet creation rejected: {e}")))?;

        Ok(())
    }

    async fn append_values(
        &self,
        spreadsheet_id: &str,
        tab: &str,
        token: &str,
        row: &[String],
    ) -> Result<(), SheetsError> {
        // The url parser percent-encodes the space in tab names.
        let url = format!(
            "{}/v4/spreadsheets/{spreadsheet_id}/values/{tab}!A1:append",
            self.api_url
        );
        let body = json!({ "values": [row] });

        self.http
            .post(&url)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| SheetsError::Api(format!("append failed: {e}")))?
            .error_for_status()
            .map_err(|e| SheetsError::Api(format!("append rejected: {e}")))?;

        Ok(())
    }

    pub async fn save_get_started(&self, form: &GetStartedForm) -> Result<(), SheetsError> {
        let id = self.spreadsheet_id()?;
        self.append_row(
            id,
            GET_STARTED_TAB,
            &[
                form.first_name.clone(),
                form.last_name.clone(),
                form.occupation.clone(),
            ],
        )
        .await
    }

    pub async fn save_contact(&self, form: &ContactForm) -> Result<(), SheetsError> {
        let id = self.spreadsheet_id()?;
        self.append_row(
            id,
            CONTACT_TAB,
            &[
                form.name.clone(),
                form.email.clone(),
                form.topic.clone(),
                form.message.clone(),
            ],
        )
        .await
    }

    pub async fn save_lender_partnership(
        &self,
        form: &LenderPartnershipForm,
    ) -> Result<(), SheetsError> {
        let id = self.spreadsheet_id()?;
        self.append_row(
            id,
            LENDER_PARTNERSHIP_TAB,
            &[
                form.name.clone(),
                form.company.clone(),
                form.email.clone(),
                form.phone.clone(),
                form.role.clone(),
                form.city.clone(),
                form.notes.clone().unwrap_or_default(),
            ],
        )
        .await
    }
}
