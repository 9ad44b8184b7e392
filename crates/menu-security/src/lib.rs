//! # Menu Security
//!
//! Caller authentication for the admin actions: session tokens, per-session
//! request nonces and the capability model.

pub mod jwt;
pub mod nonce;
pub mod session;

pub use jwt::{Claims, JwtError, JwtService};
pub use nonce::{NonceError, NonceService};
pub use session::Caller;
