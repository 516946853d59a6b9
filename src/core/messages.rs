//! User-facing text for gateway failures.
//!
//! Email/password sign-in failures are mapped through the provider
//! classification. Registration and popup failures show the provider's own
//! message verbatim.

use crate::core::identity::{AuthError, ErrorCode};

/// Message displayed when an email/password sign-in attempt fails.
pub fn sign_in_failure(error: &AuthError) -> String {
    match error.code {
        ErrorCode::UserNotFound => {
            "No user found with this email address. Would you like to register?".to_string()
        }
        ErrorCode::WrongPassword => "Incorrect password.".to_string(),
        ErrorCode::InvalidEmail => "The email address is not valid.".to_string(),
        ErrorCode::Other => "Failed to log in. Please check your credentials.".to_string(),
    }
}

/// Registration failures are not mapped; the provider's message is shown
/// as-is.
pub fn registration_failure(error: &AuthError) -> String {
    error.message.clone()
}

/// Popup sign-in failures surface the provider-supplied message.
pub fn popup_failure(error: &AuthError) -> String {
    error.message.clone()
}
