use axum::Json;
use axum::extract::State;
use validator::Validate;

use crate::error::AppError;
use crate::forms::{ContactForm, FormResponse, GetStartedForm, LenderPartnershipForm};
use crate::state::SharedState;

const GET_STARTED_MESSAGE: &str = "Thank you! We'll be in touch soon on WhatsApp.";
const CONTACT_MESSAGE: &str =
    "Thank you for your message! We'll respond within 1 business day.";
const LENDER_PARTNERSHIP_MESSAGE: &str =
    "Thank you for your interest! Our partnerships team will be in touch soon.";

/// Each handler runs the same straight-line pipeline: validate,
/// verify the token, persist best-effort, respond. A lost row must
/// never fail the request; verification failure always does.
pub async fn get_started(
    State(state): State<SharedState>,
    Json(form): Json<GetStartedForm>,
) -> Result<Json<FormResponse>, AppError> {
    form.validate()?;
    verify_token(&state, &form.recaptcha_token).await?;

    if let Err(e) = state.sheets.save_get_started(&form).await {
        tracing::warn!("Failed to record get-started submission: {e}");
    }

    tracing::info!(
        "Get Started form submitted: {} {}, {}",
        form.first_name,
        form.last_name,
        form.occupation
    );
    Ok(Json(FormResponse::ok(GET_STARTED_MESSAGE)))
}

pub async fn contact(
    State(state): State<SharedState>,
    Json(form): Json<ContactForm>,
) -> Result<Json<FormResponse>, AppError> {
    form.validate()?;
    verify_token(&state, &form.recaptcha_token).await?;

    if let Err(e) = state.sheets.save_contact(&form).await {
        tracing::warn!("Failed to record contact submission: {e}");
    }

    tracing::info!(
        "Contact form submitted: {}, {}, topic: {}",
        form.name,
        form.email,
        form.topic
    );
    Ok(Json(FormResponse::ok(CONTACT_MESSAGE)))
}

pub async fn lender_partnership(
    State(state): State<SharedState>,
    Json(form): Json<LenderPartnershipForm>,
) -> Result<Json<FormResponse>, AppError> {
    form.validate()?;
    verify_token(&state, &form.recaptcha_token).await?;

    if let Err(e) = state.sheets.save_lender_partnership(&form).await {
        tracing::warn!("Failed to record lender partnership submission: {e}");
    }

    tracing::info!(
        "Lender partnership form submitted: {} from {}",
        form.name,
        form.company
    );
    Ok(Json(FormResponse::ok(LENDER_PARTNERSHIP_MESSAGE)))
}

async fn verify_token(state: &SharedState, token: &str) -> Result<(), AppError> {
    if state.recaptcha.verify(token).await {
        Ok(())
    } else {
        Err(AppError::BadRequest(
            "reCAPTCHA verification failed".to_string(),
        ))
    }
}
