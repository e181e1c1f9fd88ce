use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    Validation(ValidationErrors),
    BadRequest(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(errors) => write!(f, "Validation Error: {errors}"),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, field_details(errors))
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!(msg)),
        };

        let body = json!({ "detail": detail });
        (status, axum::Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

/// Flatten validator output into one entry per offending field.
fn field_details(errors: &ValidationErrors) -> serde_json::Value {
    let mut details = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for err in field_errors.iter() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("invalid value for {field}"));
            details.push(json!({ "field": field.to_string(), "message": message }));
        }
    }
    json!(details)
}
