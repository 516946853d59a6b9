//! Local session state for the sign-in screen.

use crate::core::identity::AuthUser;

/// The view's representation of whether a user is authenticated.
///
/// The full lifecycle is `Unauthenticated <-> Authenticated`, driven either
/// by local action results or by provider push notifications.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated(AuthUser),
}

impl Session {
    /// Build the session from an auth-state notification payload.
    pub fn from_user(user: Option<AuthUser>) -> Self {
        match user {
            Some(user) => Self::Authenticated(user),
            None => Self::Unauthenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Unauthenticated => None,
        }
    }
}

/// UI-only toggle between login and registration intents. Controls which
/// gateway operation Submit invokes and which copy is shown; never affects
/// [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }

    /// Form heading, also the submit button label.
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
        }
    }

    /// Submit button label while the gateway call is in flight.
    pub fn pending_label(self) -> &'static str {
        match self {
            Self::Login => "Signing in...",
            Self::Register => "Creating account...",
        }
    }

    /// Prompt shown next to the mode switch link.
    pub fn switch_prompt(self) -> &'static str {
        match self {
            Self::Login => "Don't have an account? ",
            Self::Register => "Already have an account? ",
        }
    }

    /// Label of the mode switch link: the opposite mode's name.
    pub fn switch_label(self) -> &'static str {
        self.toggled().title()
    }
}
