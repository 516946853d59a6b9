//! Session view
//!
//! The single control unit of the screen: owns the auth-state subscription
//! for its mounted lifetime and switches between the credential form and
//! the welcome panel.

use std::sync::{Arc, Mutex};

use leptos::prelude::*;

use super::context::{bind_auth_state, use_session_context};
use super::{CredentialsForm, WelcomePanel};
use crate::core::identity::AuthStateSubscription;
use crate::core::session::Session;

/// Renders the credential form or the welcome panel for the current
/// session, mirroring provider-pushed auth-state changes while mounted.
#[component]
pub fn SessionView() -> impl IntoView {
    let ctx = use_session_context();

    // Acquire the subscription after hydration; release it unconditionally
    // on unmount, even if no notification ever arrived.
    let subscription: Arc<Mutex<Option<AuthStateSubscription>>> = Arc::new(Mutex::new(None));
    {
        let subscription = Arc::clone(&subscription);
        Effect::new(move |_| {
            if let Ok(mut slot) = subscription.lock() {
                if slot.is_none() {
                    *slot = bind_auth_state(ctx);
                }
            }
        });
    }
    on_cleanup(move || {
        if let Ok(mut slot) = subscription.lock() {
            drop(slot.take());
        }
    });

    view! {
        {move || match ctx.session.get() {
            Session::Unauthenticated => view! { <CredentialsForm/> }.into_any(),
            Session::Authenticated(user) => view! { <WelcomePanel user=user/> }.into_any(),
        }}
    }
}
