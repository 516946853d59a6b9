//! Core domain types for the sign-in screen: the identity gateway port,
//! session state, and user-facing failure text.

#[cfg(feature = "ssr")]
pub mod config;
pub mod identity;
pub mod messages;
#[cfg(feature = "ssr")]
pub mod relay;
pub mod session;
