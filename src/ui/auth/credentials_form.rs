//! Credential form component
//!
//! One form for both sign-in and registration; the mode flag decides which
//! gateway operation Submit invokes. Also hosts the provider popup button
//! and the inline error line.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::context::{register, sign_in, sign_in_with_provider, use_session_context};
use crate::core::session::AuthMode;
use crate::ui::icon::{Icon, icons};

/// Credential form component
#[component]
pub fn CredentialsForm() -> impl IntoView {
    let ctx = use_session_context();

    // Form state
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);

    // Handle form submission: route to sign-in or registration by mode.
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        ctx.clear_error();

        let email_val = email.get();
        let password_val = password.get();
        // The `required` attributes keep the browser from submitting empty
        // fields; this guard covers programmatic submission.
        if email_val.is_empty() || password_val.is_empty() {
            return;
        }

        spawn_local(async move {
            let result = match ctx.mode.get_untracked() {
                AuthMode::Login => sign_in(&email_val, &password_val).await,
                AuthMode::Register => register(&email_val, &password_val).await,
            };
            if result.is_ok() {
                email.set(String::new());
                password.set(String::new());
            }
        });
    };

    // Handle provider popup sign-in
    let on_provider_click = move |_| {
        spawn_local(async move {
            let _ = sign_in_with_provider().await;
        });
    };

    view! {
        <div class="login-form w-full max-w-md mx-auto bg-theme-primary rounded-xl shadow-lg p-6 border border-theme">
            <form on:submit=on_submit class="space-y-6">
                // Header
                <div class="text-center">
                    <h2 class="text-2xl font-bold text-theme-primary">
                        {move || ctx.mode.get().title()}
                    </h2>
                </div>

                // Email field
                <div>
                    <label for="email" class="block text-sm font-medium text-theme-primary mb-1">
                        "Email"
                    </label>
                    <input
                        type="email"
                        id="email"
                        name="email"
                        autocomplete="email"
                        placeholder="Email"
                        required
                        class="w-full px-3 py-2 bg-theme-secondary border border-theme rounded-lg
                               text-theme-primary placeholder-theme-tertiary
                               focus:outline-none focus:ring-2 focus:ring-accent-primary focus:border-transparent
                               transition-colors"
                        prop:value=move || email.get()
                        on:input=move |ev| {
                            email.set(event_target_value(&ev));
                        }
                    />
                </div>

                // Password field
                <div>
                    <label for="password" class="block text-sm font-medium text-theme-primary mb-1">
                        "Password"
                    </label>
                    <div class="relative">
                        <input
                            type=move || if show_password.get() { "text" } else { "password" }
                            id="password"
                            name="password"
                            autocomplete="current-password"
                            placeholder="Password"
                            required
                            class="w-full px-3 py-2 pr-10 bg-theme-secondary border border-theme rounded-lg
                                   text-theme-primary placeholder-theme-tertiary
                                   focus:outline-none focus:ring-2 focus:ring-accent-primary focus:border-transparent
                                   transition-colors"
                            prop:value=move || password.get()
                            on:input=move |ev| {
                                password.set(event_target_value(&ev));
                            }
                        />
                        <button
                            type="button"
                            class="absolute inset-y-0 right-0 pr-3 flex items-center text-theme-tertiary hover:text-theme-secondary"
                            on:click=move |_| show_password.update(|v| *v = !*v)
                        >
                            {move || {
                                if show_password.get() {
                                    view! {
                                        <Icon name=icons::EYE_CLOSED class="h-5 w-5" />
                                    }.into_any()
                                } else {
                                    view! {
                                        <Icon name=icons::EYE class="h-5 w-5" />
                                    }.into_any()
                                }
                            }}
                        </button>
                    </div>
                </div>

                // Submit button
                <button
                    type="submit"
                    class="w-full py-2.5 px-4 bg-accent-primary hover:bg-accent-primary-hover
                           text-white font-medium rounded-lg
                           focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-accent-primary
                           disabled:opacity-50 disabled:cursor-not-allowed
                           transition-colors"
                    disabled=move || ctx.loading.get()
                >
                    {move || {
                        if ctx.loading.get() {
                            view! {
                                <span class="flex items-center justify-center">
                                    <Icon name=icons::LOADER class="animate-spin -ml-1 mr-2 h-4 w-4 text-white" />
                                    {ctx.mode.get().pending_label()}
                                </span>
                            }.into_any()
                        } else {
                            view! { <span class="block">{ctx.mode.get().title()}</span> }.into_any()
                        }
                    }}
                </button>
            </form>

            // Error message, replaced on each attempt
            {move || {
                ctx.error.get().map(|error| {
                    view! {
                        <div class="mt-4 p-3 bg-red-100 dark:bg-red-900/30 border border-red-300 dark:border-red-700 rounded-lg">
                            <p class="error text-sm text-red-700 dark:text-red-300">{error}</p>
                        </div>
                    }
                })
            }}

            // Provider popup sign-in
            <div class="google-login mt-6">
                <button
                    type="button"
                    class="w-full py-2.5 px-4 flex items-center justify-center gap-2
                           bg-theme-secondary hover:bg-theme-tertiary border border-theme
                           text-theme-primary font-medium rounded-lg transition-colors"
                    on:click=on_provider_click
                >
                    <Icon name=icons::GOOGLE class="h-5 w-5" />
                    "Login with Google"
                </button>
            </div>

            // Mode switch
            <p class="mt-6 text-center text-sm text-theme-secondary">
                {move || ctx.mode.get().switch_prompt()}
                <button
                    type="button"
                    class="clickable text-accent-primary hover:text-accent-primary-hover font-medium"
                    on:click=move |_| ctx.toggle_mode()
                >
                    {move || ctx.mode.get().switch_label()}
                </button>
            </p>
        </div>
    }
}
