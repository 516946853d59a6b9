//! Identity gateway port.
//!
//! The external identity provider owns credential verification, token
//! issuance and account storage. This module defines the boundary the UI
//! talks to: the user record, the provider error classification, the
//! gateway trait, and the auth-state notification machinery shared by its
//! implementations.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// User record exposed by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub email: String,
    pub display_name: Option<String>,
}

impl AuthUser {
    /// Welcome line for the authenticated panel. Prefers the display name,
    /// falls back to the email address.
    pub fn greeting(&self) -> String {
        let name = self.display_name.as_deref().unwrap_or(&self.email);
        format!("Welcome, {}!", name)
    }
}

/// Provider error classification.
///
/// The provider reports failures as short code strings; everything the UI
/// does not map explicitly lands in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    UserNotFound,
    WrongPassword,
    InvalidEmail,
    Other,
}

impl ErrorCode {
    /// Classify a provider code string such as `EMAIL_NOT_FOUND`.
    pub fn classify(code: &str) -> Self {
        match code {
            "EMAIL_NOT_FOUND" => Self::UserNotFound,
            "INVALID_PASSWORD" => Self::WrongPassword,
            "INVALID_EMAIL" => Self::InvalidEmail,
            _ => Self::Other,
        }
    }
}

/// Error returned by gateway operations: the provider's classification
/// plus its human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AuthError {
    pub code: ErrorCode,
    pub message: String,
}

impl AuthError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Unclassified error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Other, message)
    }

    /// Build an error from the provider's error envelope message. The code
    /// is the leading token; the provider may append detail after a colon,
    /// e.g. `WEAK_PASSWORD : Password should be at least 6 characters`.
    pub fn from_provider_code(message: impl Into<String>) -> Self {
        let message = message.into();
        let code = message.split([' ', ':']).next().unwrap_or_default();
        Self {
            code: ErrorCode::classify(code),
            message,
        }
    }
}

/// Callback invoked with `Some(user)` or the absence-of-user signal.
pub type AuthStateListener = Box<dyn Fn(Option<AuthUser>) + Send + Sync>;

type SharedListener = Arc<dyn Fn(Option<AuthUser>) + Send + Sync>;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: HashMap<u64, SharedListener>,
    current: Option<AuthUser>,
}

/// Auth-state notification registry shared by gateway implementations.
///
/// Subscribing delivers the current snapshot immediately; publishing
/// replaces the snapshot and notifies every registered listener. Dropping
/// the returned subscription removes the listener, after which no further
/// callbacks are delivered.
#[derive(Clone, Default)]
pub struct AuthStateHub {
    inner: Arc<Mutex<HubInner>>,
}

fn lock(inner: &Mutex<HubInner>) -> MutexGuard<'_, HubInner> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl AuthStateHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener and hand it the current snapshot.
    pub fn subscribe(&self, listener: AuthStateListener) -> AuthStateSubscription {
        let listener: SharedListener = Arc::from(listener);
        let (id, snapshot) = {
            let mut inner = lock(&self.inner);
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.insert(id, Arc::clone(&listener));
            (id, inner.current.clone())
        };
        listener(snapshot);
        AuthStateSubscription {
            id,
            hub: Arc::downgrade(&self.inner),
        }
    }

    /// Replace the current auth state and notify all listeners.
    pub fn publish(&self, user: Option<AuthUser>) {
        let listeners: Vec<SharedListener> = {
            let mut inner = lock(&self.inner);
            inner.current = user.clone();
            inner.listeners.values().map(Arc::clone).collect()
        };
        for listener in listeners {
            listener(user.clone());
        }
    }

    pub fn current(&self) -> Option<AuthUser> {
        lock(&self.inner).current.clone()
    }
}

/// Handle owning an auth-state listener registration.
///
/// Dropping the handle releases the listener. Guaranteed quiet afterwards:
/// stale notifications are never delivered to a released listener.
pub struct AuthStateSubscription {
    id: u64,
    hub: Weak<Mutex<HubInner>>,
}

impl AuthStateSubscription {
    /// Explicit release; equivalent to dropping the handle.
    pub fn unsubscribe(self) {}
}

impl Drop for AuthStateSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.hub.upgrade() {
            lock(&inner).listeners.remove(&self.id);
        }
    }
}

/// Boundary to the external identity provider.
///
/// Implementations forward to the provider and surface its verdicts; none
/// of them verify credentials or mint tokens themselves.
#[async_trait(?Send)]
pub trait IdentityGateway {
    /// Interactive OAuth sign-in through a provider popup.
    async fn sign_in_with_popup(&self) -> Result<AuthUser, AuthError>;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError>;

    async fn create_account(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Register for auth-state notifications. The listener is called with
    /// the current state immediately and on every change until the
    /// returned subscription is dropped.
    fn subscribe_auth_state(&self, listener: AuthStateListener) -> AuthStateSubscription;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, display_name: Option<&str>) -> AuthUser {
        AuthUser {
            email: email.to_string(),
            display_name: display_name.map(str::to_string),
        }
    }

    fn recorder() -> (Arc<Mutex<Vec<Option<AuthUser>>>>, AuthStateListener) {
        let seen: Arc<Mutex<Vec<Option<AuthUser>>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let listener: AuthStateListener = Box::new(move |state| {
            sink.lock().unwrap().push(state);
        });
        (seen, listener)
    }

    #[test]
    fn greeting_prefers_display_name() {
        let user = user("x@y.com", Some("X"));
        assert_eq!(user.greeting(), "Welcome, X!");
    }

    #[test]
    fn greeting_falls_back_to_email() {
        let user = user("x@y.com", None);
        assert_eq!(user.greeting(), "Welcome, x@y.com!");
    }

    #[test]
    fn classify_known_provider_codes() {
        assert_eq!(ErrorCode::classify("EMAIL_NOT_FOUND"), ErrorCode::UserNotFound);
        assert_eq!(ErrorCode::classify("INVALID_PASSWORD"), ErrorCode::WrongPassword);
        assert_eq!(ErrorCode::classify("INVALID_EMAIL"), ErrorCode::InvalidEmail);
        assert_eq!(ErrorCode::classify("USER_DISABLED"), ErrorCode::Other);
        assert_eq!(ErrorCode::classify(""), ErrorCode::Other);
    }

    #[test]
    fn provider_code_with_detail_suffix() {
        let error =
            AuthError::from_provider_code("WEAK_PASSWORD : Password should be at least 6 characters");
        assert_eq!(error.code, ErrorCode::Other);
        assert_eq!(
            error.message,
            "WEAK_PASSWORD : Password should be at least 6 characters"
        );

        let error = AuthError::from_provider_code("INVALID_PASSWORD");
        assert_eq!(error.code, ErrorCode::WrongPassword);
    }

    #[test]
    fn subscribe_delivers_current_snapshot() {
        let hub = AuthStateHub::new();
        hub.publish(Some(user("a@b.com", None)));

        let (seen, listener) = recorder();
        let _subscription = hub.subscribe(listener);

        assert_eq!(seen.lock().unwrap().as_slice(), &[Some(user("a@b.com", None))]);
    }

    #[test]
    fn publish_notifies_and_replaces() {
        let hub = AuthStateHub::new();
        let (seen, listener) = recorder();
        let _subscription = hub.subscribe(listener);

        hub.publish(Some(user("a@b.com", Some("A"))));
        hub.publish(None);

        assert_eq!(
            seen.lock().unwrap().as_slice(),
            &[None, Some(user("a@b.com", Some("A"))), None]
        );
        assert_eq!(hub.current(), None);
    }

    #[test]
    fn dropped_subscription_receives_nothing() {
        let hub = AuthStateHub::new();
        let (seen, listener) = recorder();
        let subscription = hub.subscribe(listener);

        hub.publish(Some(user("a@b.com", None)));
        drop(subscription);
        hub.publish(None);
        hub.publish(Some(user("stale@b.com", None)));

        // The initial snapshot and the first publish only.
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn unsubscribe_is_idempotent_across_listeners() {
        let hub = AuthStateHub::new();
        let (seen_a, listener_a) = recorder();
        let (seen_b, listener_b) = recorder();
        let subscription_a = hub.subscribe(listener_a);
        let _subscription_b = hub.subscribe(listener_b);

        subscription_a.unsubscribe();
        hub.publish(Some(user("a@b.com", None)));

        assert_eq!(seen_a.lock().unwrap().len(), 1);
        assert_eq!(seen_b.lock().unwrap().len(), 2);
    }
}
