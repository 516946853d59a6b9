//! Session context for the sign-in screen
//!
//! This module provides the reactive session state and the async actions
//! that forward user intent to the identity gateway:
//! - sign in with email/password or the provider popup
//! - register a new account
//! - sign out
//!
//! The gateway owns all credential and token handling; the actions here
//! only reconcile its verdicts into local state.

use leptos::prelude::*;

use crate::core::identity::{AuthError, AuthStateSubscription, AuthUser};
use crate::core::messages;
use crate::core::session::{AuthMode, Session};
use crate::gateway::active_gateway;

/// Session context providing auth state for the component tree.
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// Current session state
    pub session: RwSignal<Session>,
    /// Which operation Submit invokes and which copy is shown
    pub mode: RwSignal<AuthMode>,
    /// Loading state for in-flight gateway calls
    pub loading: RwSignal<bool>,
    /// Error message from the last attempt
    pub error: RwSignal<Option<String>>,
}

impl SessionContext {
    fn new() -> Self {
        Self {
            session: RwSignal::new(Session::Unauthenticated),
            mode: RwSignal::new(AuthMode::Login),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    /// Check if a user is currently authenticated
    pub fn is_authenticated(&self) -> bool {
        self.session.with(Session::is_authenticated)
    }

    /// Flip between login and registration. Leaves session and error alone.
    pub fn toggle_mode(&self) {
        self.mode.update(|mode| *mode = mode.toggled());
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }
}

/// Provide the session context to the component tree
pub fn provide_session_context() -> SessionContext {
    // Start unauthenticated on both server and client to avoid a hydration
    // mismatch; the auth-state subscription catches the view up afterwards.
    let ctx = SessionContext::new();
    provide_context(ctx);
    ctx
}

/// Get the session context from the component tree
pub fn use_session_context() -> SessionContext {
    expect_context::<SessionContext>()
}

/// Subscribe the session to gateway auth-state notifications.
///
/// The returned handle must be dropped when the owning view unmounts; no
/// callbacks are delivered after release.
pub fn bind_auth_state(ctx: SessionContext) -> Option<AuthStateSubscription> {
    let gateway = active_gateway()?;
    let session = ctx.session;
    Some(gateway.subscribe_auth_state(Box::new(move |user| {
        session.set(Session::from_user(user));
    })))
}

fn gateway_unavailable() -> AuthError {
    AuthError::other("No identity gateway is configured")
}

/// Sign in with email and password
pub async fn sign_in(email: &str, password: &str) -> Result<AuthUser, AuthError> {
    let ctx = use_session_context();
    ctx.loading.set(true);
    ctx.error.set(None);

    let result = match active_gateway() {
        Some(gateway) => gateway.sign_in_with_password(email, password).await,
        None => Err(gateway_unavailable()),
    };

    match &result {
        Ok(user) => ctx.session.set(Session::Authenticated(user.clone())),
        Err(error) => ctx.error.set(Some(messages::sign_in_failure(error))),
    }
    ctx.loading.set(false);

    result
}

/// Register a new email/password account
pub async fn register(email: &str, password: &str) -> Result<AuthUser, AuthError> {
    let ctx = use_session_context();
    ctx.loading.set(true);
    ctx.error.set(None);

    let result = match active_gateway() {
        Some(gateway) => gateway.create_account(email, password).await,
        None => Err(gateway_unavailable()),
    };

    match &result {
        Ok(user) => ctx.session.set(Session::Authenticated(user.clone())),
        Err(error) => ctx.error.set(Some(messages::registration_failure(error))),
    }
    ctx.loading.set(false);

    result
}

/// Sign in through the provider's OAuth popup
pub async fn sign_in_with_provider() -> Result<AuthUser, AuthError> {
    let ctx = use_session_context();
    ctx.loading.set(true);
    ctx.error.set(None);

    let result = match active_gateway() {
        Some(gateway) => gateway.sign_in_with_popup().await,
        None => Err(gateway_unavailable()),
    };

    match &result {
        Ok(user) => ctx.session.set(Session::Authenticated(user.clone())),
        Err(error) => ctx.error.set(Some(messages::popup_failure(error))),
    }
    ctx.loading.set(false);

    result
}

/// Sign out the current user.
///
/// Failures are logged, never shown; the session stays as it was so the
/// next notification or attempt can resolve it.
pub async fn sign_out() {
    let ctx = use_session_context();

    let result = match active_gateway() {
        Some(gateway) => gateway.sign_out().await,
        None => Err(gateway_unavailable()),
    };

    match result {
        Ok(()) => ctx.session.set(Session::Unauthenticated),
        Err(error) => leptos::logging::error!("Error during sign-out: {}", error),
    }
}
