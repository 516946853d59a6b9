//! Identity gateway implementations.
//!
//! The active gateway is installed once at application startup and looked
//! up by the auth action functions. Browser builds install the hosted
//! provider client; server rendering installs an inert stub.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::identity::IdentityGateway;

#[cfg(not(feature = "ssr"))]
pub mod hosted;
#[cfg(test)]
pub mod mock;
#[cfg(feature = "ssr")]
pub mod server;

/// Client-side coordinates of the identity provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the provider REST surface. Relative by default so
    /// requests go through the server's same-origin relay.
    pub api_base: String,
    /// OAuth provider id used by the popup flow.
    pub oauth_provider: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: "/identity".to_string(),
            oauth_provider: "google.com".to_string(),
        }
    }
}

// Gateway handle storage using thread_local; the browser client is not Send
thread_local! {
    static ACTIVE_GATEWAY: RefCell<Option<Rc<dyn IdentityGateway>>> =
        const { RefCell::new(None) };
}

/// Install the gateway used by subsequent auth actions.
pub fn install_gateway(gateway: Rc<dyn IdentityGateway>) {
    ACTIVE_GATEWAY.with(|slot| *slot.borrow_mut() = Some(gateway));
}

/// The installed gateway, if any.
pub fn active_gateway() -> Option<Rc<dyn IdentityGateway>> {
    ACTIVE_GATEWAY.with(|slot| slot.borrow().clone())
}

/// Gateway for the current build: the hosted provider client in the
/// browser, an inert stub during server rendering.
#[cfg(not(feature = "ssr"))]
pub fn default_gateway(config: ProviderConfig) -> Rc<dyn IdentityGateway> {
    Rc::new(hosted::HostedGateway::new(config))
}

#[cfg(feature = "ssr")]
pub fn default_gateway(_config: ProviderConfig) -> Rc<dyn IdentityGateway> {
    Rc::new(server::ServerGateway::new())
}
