use serde_json::Value;

use crate::config::Config;

/// Verifies reCAPTCHA v2 tokens against Google's siteverify endpoint.
///
/// Fail-closed: every indeterminate outcome (transport error, bad JSON,
/// missing `success` field) counts as unverified. The one exception is
/// local development without a configured secret, which verifies
/// unconditionally.
pub struct RecaptchaVerifier {
    client: reqwest::Client,
    verify_url: String,
    secret_key: Option<String>,
    dev_bypass: bool,
}

impl RecaptchaVerifier {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build reqwest client"),
            verify_url: config.recaptcha_verify_url.clone(),
            secret_key: config.recaptcha_secret_key.clone(),
            dev_bypass: config.is_development(),
        }
    }

    /// Single best-effort verification attempt. No retries.
    pub async fn verify(&self, token: &str) -> bool {
        let Some(secret) = self.secret_key.as_deref() else {
            if self.dev_bypass {
                return true;
            }
            tracing::warn!("RECAPTCHA_SECRET_KEY not set outside development, failing closed");
            return false;
        };

        let response = match self
            .client
            .post(&self.verify_url)
            .form(&[("secret", secret), ("response", token)])
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!("reCAPTCHA request failed: {e}");
                return false;
            }
        };

        match response.json::<Value>().await {
            Ok(body) => body["success"].as_bool().unwrap_or(false),
            Err(e) => {
                tracing::warn!("reCAPTCHA response decode failed: {e}");
                false
            }
        }
    }
}
