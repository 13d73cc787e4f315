//! Authentication module
//!
//! Holds the OAuth credential state (`Auth`) and the bodies sent to the
//! token endpoints (`TokenGrant`). Nothing here performs I/O; the client
//! drives the token lifecycle and writes the results back through
//! `Auth::update`.

mod grant;
mod types;

pub use grant::TokenGrant;
pub use types::{Auth, AuthUpdate};

#[cfg(test)]
mod tests;
