//! Hosted identity provider client
//!
//! Browser-side gateway implementation over the provider's REST surface,
//! reached through the server's same-origin relay:
//! - password sign-in, registration, session verification
//! - OAuth popup sign-in completed over a window message
//! - localStorage persistence of the provider session
//! - expiry watch that pushes a signed-out notification
//!
//! All credential verification and token issuance happen upstream; this
//! client forwards requests and mirrors the provider's verdicts.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use gloo_net::http::{Request, Response};
use gloo_timers::callback::Interval;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use super::ProviderConfig;
use crate::core::identity::{
    AuthError, AuthStateHub, AuthStateListener, AuthStateSubscription, AuthUser, IdentityGateway,
};

const STORAGE_KEY_SESSION: &str = "vestibule_session";

/// Marker the popup completion page puts in its window message.
const POPUP_MESSAGE_SOURCE: &str = "vestibule-identity";

/// How often the stored token expiry is checked.
const EXPIRY_CHECK_MS: u32 = 30_000;

/// Provider session persisted in localStorage. Owned by the gateway; the
/// session view never sees tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    id_token: String,
    refresh_token: Option<String>,
    /// Expiry in milliseconds since the epoch.
    expires_at: f64,
    user: AuthUser,
}

impl StoredSession {
    fn is_expired(&self, now_ms: f64) -> bool {
        now_ms >= self.expires_at
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordCredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    id_token: String,
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Lifetime of the id token in seconds, as a decimal string.
    expires_in: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    email: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Message posted back by the OAuth popup completion page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PopupMessage {
    source: String,
    #[serde(default)]
    id_token: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    expires_in: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Gateway over the hosted identity provider.
pub struct HostedGateway {
    config: ProviderConfig,
    hub: AuthStateHub,
    _expiry_watch: Interval,
}

impl HostedGateway {
    pub fn new(config: ProviderConfig) -> Self {
        let hub = AuthStateHub::new();

        // Restore the persisted provider session, then verify the token is
        // still honored upstream.
        if let Some(stored) = load_stored_session() {
            if stored.is_expired(js_sys::Date::now()) {
                clear_stored_session();
            } else {
                hub.publish(Some(stored.user.clone()));

                let hub = hub.clone();
                let api_base = config.api_base.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match lookup_user(&api_base, &stored.id_token).await {
                        Ok(user) => {
                            // Token verified; refresh the cached profile.
                            if let Some(mut stored) = load_stored_session() {
                                stored.user = user.clone();
                                save_stored_session(&stored);
                            }
                            hub.publish(Some(user));
                        }
                        Err(_) => {
                            // Token no longer honored upstream; drop the session.
                            clear_stored_session();
                            hub.publish(None);
                        }
                    }
                });
            }
        }

        // Token expiry detected here surfaces as a provider-pushed
        // signed-out notification.
        let expiry_watch = {
            let hub = hub.clone();
            Interval::new(EXPIRY_CHECK_MS, move || {
                if let Some(stored) = load_stored_session() {
                    if stored.is_expired(js_sys::Date::now()) {
                        clear_stored_session();
                        hub.publish(None);
                    }
                }
            })
        };

        Self {
            config,
            hub,
            _expiry_watch: expiry_watch,
        }
    }

    fn accounts_url(&self, action: &str) -> String {
        format!("{}/v1/accounts:{}", self.config.api_base, action)
    }

    /// Persist and announce a fresh provider session.
    fn adopt_session(&self, token: TokenResponse) -> AuthUser {
        let user = AuthUser {
            email: token.email,
            display_name: token.display_name,
        };
        let lifetime_ms = token.expires_in.parse::<f64>().unwrap_or(3600.0) * 1000.0;
        save_stored_session(&StoredSession {
            id_token: token.id_token,
            refresh_token: token.refresh_token,
            expires_at: js_sys::Date::now() + lifetime_ms,
            user: user.clone(),
        });
        self.hub.publish(Some(user.clone()));
        user
    }
}

#[async_trait(?Send)]
impl IdentityGateway for HostedGateway {
    async fn sign_in_with_popup(&self) -> Result<AuthUser, AuthError> {
        let token = await_popup_token(&self.config).await?;
        Ok(self.adopt_session(token))
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError> {
        let url = self.accounts_url("signInWithPassword");
        let token = post_credentials(&url, email, password).await?;
        Ok(self.adopt_session(token))
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let url = self.accounts_url("signUp");
        let token = post_credentials(&url, email, password).await?;
        Ok(self.adopt_session(token))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        // Provider tokens are stateless; signing out is local.
        clear_stored_session();
        self.hub.publish(None);
        Ok(())
    }

    fn subscribe_auth_state(&self, listener: AuthStateListener) -> AuthStateSubscription {
        self.hub.subscribe(listener)
    }
}

async fn post_credentials(url: &str, email: &str, password: &str) -> Result<TokenResponse, AuthError> {
    let request = PasswordCredentialsRequest {
        email,
        password,
        return_secure_token: true,
    };

    let response = Request::post(url)
        .json(&request)
        .map_err(|error| AuthError::other(format!("Failed to encode request: {error}")))?
        .send()
        .await
        .map_err(|error| AuthError::other(format!("Network error: {error}")))?;

    if response.ok() {
        response
            .json::<TokenResponse>()
            .await
            .map_err(|error| AuthError::other(format!("Malformed provider response: {error}")))
    } else {
        Err(decode_provider_error(response).await)
    }
}

async fn decode_provider_error(response: Response) -> AuthError {
    match response.json::<ErrorEnvelope>().await {
        Ok(envelope) => AuthError::from_provider_code(envelope.error.message),
        Err(_) => AuthError::other(format!(
            "Provider request failed with status {}",
            response.status()
        )),
    }
}

async fn lookup_user(api_base: &str, id_token: &str) -> Result<AuthUser, AuthError> {
    let url = format!("{}/v1/accounts:lookup", api_base);
    let response = Request::post(&url)
        .json(&LookupRequest { id_token })
        .map_err(|error| AuthError::other(format!("Failed to encode request: {error}")))?
        .send()
        .await
        .map_err(|error| AuthError::other(format!("Network error: {error}")))?;

    if !response.ok() {
        return Err(decode_provider_error(response).await);
    }

    let lookup = response
        .json::<LookupResponse>()
        .await
        .map_err(|error| AuthError::other(format!("Malformed provider response: {error}")))?;
    let user = lookup
        .users
        .into_iter()
        .next()
        .ok_or_else(|| AuthError::other("Provider returned no user for the session token"))?;

    Ok(AuthUser {
        email: user.email,
        display_name: user.display_name,
    })
}

/// Open the provider OAuth popup and wait for its completion message.
///
/// There is no timeout: an unresponsive provider leaves the attempt
/// pending. Closing the popup fails the attempt.
async fn await_popup_token(config: &ProviderConfig) -> Result<TokenResponse, AuthError> {
    let window = web_sys::window().ok_or_else(|| AuthError::other("No window"))?;

    let url = format!(
        "{}/oauth/popup?provider={}",
        config.api_base, config.oauth_provider
    );
    let popup = window
        .open_with_url_and_target_and_features(&url, "vestibule-oauth", "popup,width=480,height=640")
        .map_err(|_| AuthError::other("Failed to open the sign-in popup"))?
        .ok_or_else(|| AuthError::other("The sign-in popup was blocked by the browser"))?;

    let own_origin = window.location().origin().unwrap_or_default();

    let (sender, receiver) = oneshot::channel::<Result<TokenResponse, AuthError>>();
    let sender = Rc::new(RefCell::new(Some(sender)));

    let on_message = {
        let sender = Rc::clone(&sender);
        Closure::wrap(Box::new(move |event: web_sys::MessageEvent| {
            if event.origin() != own_origin {
                return;
            }
            let Some(payload) = event.data().as_string() else {
                return;
            };
            let Ok(message) = serde_json::from_str::<PopupMessage>(&payload) else {
                return;
            };
            if message.source != POPUP_MESSAGE_SOURCE {
                return;
            }
            if let Some(sender) = sender.borrow_mut().take() {
                let _ = sender.send(popup_outcome(message));
            }
        }) as Box<dyn FnMut(web_sys::MessageEvent)>)
    };

    window
        .add_event_listener_with_callback("message", on_message.as_ref().unchecked_ref())
        .map_err(|_| AuthError::other("Failed to listen for the popup result"))?;

    // Fail the attempt when the user closes the popup without completing.
    let close_watch = {
        let sender = Rc::clone(&sender);
        let popup = popup.clone();
        Interval::new(500, move || {
            if popup.closed().unwrap_or(true) {
                if let Some(sender) = sender.borrow_mut().take() {
                    let _ = sender.send(Err(AuthError::other(
                        "The sign-in popup was closed before completing",
                    )));
                }
            }
        })
    };

    let outcome = receiver
        .await
        .unwrap_or_else(|_| Err(AuthError::other("The sign-in attempt was interrupted")));

    drop(close_watch);
    let _ = window
        .remove_event_listener_with_callback("message", on_message.as_ref().unchecked_ref());
    drop(on_message);

    outcome
}

/// Translate the popup completion message into a token or error.
fn popup_outcome(message: PopupMessage) -> Result<TokenResponse, AuthError> {
    if let Some(error) = message.error {
        return Err(AuthError::from_provider_code(error));
    }
    match (message.id_token, message.email) {
        (Some(id_token), Some(email)) => Ok(TokenResponse {
            id_token,
            email,
            display_name: message.display_name,
            refresh_token: None,
            expires_in: message.expires_in.unwrap_or_else(|| "3600".to_string()),
        }),
        _ => Err(AuthError::other(
            "The provider returned an incomplete sign-in result",
        )),
    }
}

fn load_stored_session() -> Option<StoredSession> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    let json = storage.get_item(STORAGE_KEY_SESSION).ok()??;
    serde_json::from_str(&json).ok()
}

fn save_stored_session(session: &StoredSession) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(
                STORAGE_KEY_SESSION,
                &serde_json::to_string(session).unwrap_or_default(),
            );
        }
    }
}

fn clear_stored_session() {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.remove_item(STORAGE_KEY_SESSION);
        }
    }
}
