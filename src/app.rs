use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::gateway::{ProviderConfig, default_gateway, install_gateway};
use crate::ui::auth::provide_session_context;
use crate::ui::pages::{NotFoundPage, SessionPage};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    // Install the identity gateway all auth operations are forwarded to,
    // then provide the session state it feeds.
    install_gateway(default_gateway(ProviderConfig::default()));
    let _session_ctx = provide_session_context();

    view! {
        // injects a stylesheet into the document <head>
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/vestibule.css"/>

        // sets the document title
        <Title text="Vestibule - Sign In"/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=path!("") view=SessionPage/>
            </Routes>
        </Router>
    }
}
