//! Welcome panel component
//!
//! Shown while a user is authenticated: greeting, email, and a sign-out
//! control.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::context::sign_out;
use crate::core::identity::AuthUser;
use crate::ui::icon::{Icon, icons};

/// Welcome panel component
#[component]
pub fn WelcomePanel(
    /// The authenticated user
    user: AuthUser,
) -> impl IntoView {
    // Handle sign-out; failures are logged inside the action.
    let handle_sign_out = move |_| {
        spawn_local(async move {
            sign_out().await;
        });
    };

    view! {
        <div class="welcome-screen w-full max-w-md mx-auto bg-theme-primary rounded-xl shadow-lg p-6 border border-theme text-center">
            <h2 class="text-2xl font-bold text-theme-primary">{user.greeting()}</h2>
            <p class="mt-2 text-sm text-theme-secondary">"Email: " {user.email.clone()}</p>
            <button
                class="mt-6 w-full py-2.5 px-4 flex items-center justify-center gap-2
                       bg-accent-primary hover:bg-accent-primary-hover
                       text-white font-medium rounded-lg transition-colors"
                on:click=handle_sign_out
            >
                <Icon name=icons::LOGOUT class="h-4 w-4" />
                "Log Out"
            </button>
        </div>
    }
}
