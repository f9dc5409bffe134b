//! Authentication module
//!
//! Carries the externally issued bearer credential and the signed-in user's
//! session context. Token issuance and refresh belong to the OAuth provider.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{Credential, SessionContext};

#[cfg(test)]
mod tests;
