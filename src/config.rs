use std::net::IpAddr;

pub const RECAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";
pub const SHEETS_API_URL: &str = "https://sheets.googleapis.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub recaptcha_secret_key: Option<String>,
    pub recaptcha_verify_url: String,
    pub cors_origins: Vec<String>,
    pub google_credentials_json: Option<String>,
    pub google_spreadsheet_id: Option<String>,
    pub sheets_api_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let environment = env_or("ENVIRONMENT", "development");

        let recaptcha_secret_key = env_optional("RECAPTCHA_SECRET_KEY");
        let recaptcha_verify_url = env_or("PAYDAY_RECAPTCHA_URL", RECAPTCHA_VERIFY_URL);

        let cors_origins: Vec<String> = env_or(
            "CORS_ORIGINS",
            "http://localhost:3000,http://localhost:3001",
        )
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

        let google_credentials_json = env_optional("GOOGLE_CREDENTIALS_JSON");
        let google_spreadsheet_id = env_optional("GOOGLE_SPREADSHEET_ID");
        let sheets_api_url = env_or("PAYDAY_SHEETS_API_URL", SHEETS_API_URL);

        let host: IpAddr = env_or("PAYDAY_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid PAYDAY_HOST: {e}"))?;

        let port: u16 = env_or("PAYDAY_PORT", "8000")
            .parse()
            .map_err(|e| format!("Invalid PAYDAY_PORT: {e}"))?;

        let log_level = env_or("PAYDAY_LOG_LEVEL", "info");

        Ok(Config {
            environment,
            recaptcha_secret_key,
            recaptcha_verify_url,
            cors_origins,
            google_credentials_json,
            google_spreadsheet_id,
            sheets_api_url,
            host,
            port,
            log_level,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Unset and empty both mean "not configured".
fn env_optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}
