use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10,15}$").expect("phone regex is valid"));

/// Get Started modal form submission.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GetStartedForm {
    #[serde(rename = "recaptchaToken", alias = "recaptcha_token")]
    pub recaptcha_token: String,
    #[serde(rename = "firstName", alias = "first_name")]
    #[validate(length(min = 1, max = 50, message = "first name must be 1-50 characters"))]
    pub first_name: String,
    #[serde(rename = "lastName", alias = "last_name")]
    #[validate(length(min = 1, max = 50, message = "last name must be 1-50 characters"))]
    pub last_name: String,
    #[validate(length(min = 1, max = 50, message = "occupation must be 1-50 characters"))]
    pub occupation: String,
}

/// Contact page form submission.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactForm {
    #[serde(rename = "recaptchaToken", alias = "recaptcha_token")]
    pub recaptcha_token: String,
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 50, message = "topic must be 1-50 characters"))]
    pub topic: String,
    #[validate(length(min = 10, max = 2000, message = "message must be 10-2000 characters"))]
    pub message: String,
}

/// Lender partnership form submission.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LenderPartnershipForm {
    #[serde(rename = "recaptchaToken", alias = "recaptcha_token")]
    pub recaptcha_token: String,
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 2, max = 100, message = "company must be 2-100 characters"))]
    pub company: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(regex(path = *PHONE_RE, message = "phone must be 10-15 digits"))]
    pub phone: String,
    #[validate(length(min = 1, max = 100, message = "role must be 1-100 characters"))]
    pub role: String,
    #[validate(length(min = 1, max = 100, message = "city must be 1-100 characters"))]
    pub city: String,
    #[validate(length(max = 1000, message = "notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

/// Uniform response body for all three form endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormResponse {
    pub success: bool,
    pub message: String,
}

impl FormResponse {
    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}
