//! Application pages module
//!
//! The session screen is the only page; a not-found fallback covers the
//! rest.

mod not_found;
mod session;

pub use not_found::NotFoundPage;
pub use session::SessionPage;
