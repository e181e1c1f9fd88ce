use std::sync::Arc;

use crate::config::Config;
use crate::recaptcha::RecaptchaVerifier;
use crate::sheets::SheetsStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub recaptcha: RecaptchaVerifier,
    pub sheets: SheetsStore,
}
