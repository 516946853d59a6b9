//! Inert gateway used during server rendering.
//!
//! Auth actions only run in the browser; server rendering still needs a
//! gateway behind the session wiring, so every action reports itself
//! unavailable.

use async_trait::async_trait;

use crate::core::identity::{
    AuthError, AuthStateHub, AuthStateListener, AuthStateSubscription, AuthUser, IdentityGateway,
};

#[derive(Default)]
pub struct ServerGateway {
    hub: AuthStateHub,
}

impl ServerGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl IdentityGateway for ServerGateway {
    async fn sign_in_with_popup(&self) -> Result<AuthUser, AuthError> {
        Err(AuthError::other("Sign-in is not available on the server"))
    }

    async fn sign_in_with_password(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<AuthUser, AuthError> {
        Err(AuthError::other("Sign-in is not available on the server"))
    }

    async fn create_account(&self, _email: &str, _password: &str) -> Result<AuthUser, AuthError> {
        Err(AuthError::other("Registration is not available on the server"))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }

    fn subscribe_auth_state(&self, listener: AuthStateListener) -> AuthStateSubscription {
        self.hub.subscribe(listener)
    }
}
