//! Authentication UI module
//!
//! Session state context, the credential form, and the authenticated
//! welcome panel for the sign-in screen.

mod context;
mod credentials_form;
mod session_view;
mod welcome_panel;

pub use context::{
    SessionContext, provide_session_context, register, sign_in, sign_in_with_provider, sign_out,
    use_session_context,
};
pub use credentials_form::CredentialsForm;
pub use session_view::SessionView;
pub use welcome_panel::WelcomePanel;
