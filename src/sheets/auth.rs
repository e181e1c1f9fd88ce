use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::SheetsError;

const SCOPES: &str =
    "https://www.googleapis.com/auth/spreadsheets https://www.googleapis.com/auth/drive";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    pub token_uri: String,
}

/// Authenticated handle for the Sheets API: a parsed service-account
/// key plus a cached OAuth access token.
pub struct SheetsAuth {
    http: reqwest::Client,
    key: ServiceAccountKey,
    signer: EncodingKey,
    cached: Mutex<Option<CachedToken>>,
}

struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expiry")]
    expires_in: i64,
}

fn default_expiry() -> i64 {
    3600
}

impl SheetsAuth {
    pub fn new(http: reqwest::Client, raw_credentials: &str) -> Result<Self, SheetsError> {
        let key: ServiceAccountKey = serde_json::from_str(raw_credentials)
            .map_err(|e| SheetsError::Credentials(format!("invalid service account JSON: {e}")))?;
        let signer = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| SheetsError::Credentials(format!("invalid private key: {e}")))?;

        Ok(Self {
            http,
            key,
            signer,
            cached: Mutex::new(None),
        })
    }

    /// Return a valid access token, minting a new one via the
    /// signed-JWT grant when the cached token is missing or expiring.
    pub async fn access_token(&self) -> Result<String, SheetsError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.expires_at > Utc::now() {
                return Ok(token.value.clone());
            }
        }

        let now = Utc::now();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: SCOPES,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };

        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &self.signer)
            .map_err(|e| SheetsError::Token(format!("assertion signing failed: {e}")))?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SheetsError::Token(format!("token request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SheetsError::Token(format!("token request rejected: {e}")))?;

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SheetsError::Token(format!("token response decode failed: {e}")))?;

        // Refresh one minute early so in-flight calls never carry a
        // token that expires mid-request.
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: now + Duration::seconds((token.expires_in - 60).max(0)),
        });

        Ok(token.access_token)
    }
}
