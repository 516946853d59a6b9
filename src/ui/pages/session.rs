//! Session page
//!
//! The application's single screen: page chrome around the session view.

use leptos::prelude::*;

use crate::ui::auth::SessionView;

/// Session page component
#[component]
pub fn SessionPage() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-theme-primary flex flex-col">
            // Header
            <header class="border-b border-theme">
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                    <div class="flex items-center h-16">
                        <span class="text-xl font-bold text-theme-primary">"Vestibule"</span>
                    </div>
                </div>
            </header>

            // Main content
            <main class="flex-1 flex items-center justify-center p-4">
                <div class="w-full max-w-md">
                    <SessionView/>
                </div>
            </main>

            // Footer
            <footer class="py-4 border-t border-theme">
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                    <p class="text-center text-sm text-theme-tertiary">
                        "© 2025 Vestibule. All rights reserved."
                    </p>
                </div>
            </footer>
        </div>
    }
}
