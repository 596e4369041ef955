//! Auth domain - sign-in flows over the hosted identity platform
//!
//! Responsibilities:
//! - Email/password, Google, phone OTP and second-factor flows
//! - Session bookkeeping (platform credentials + our own JWT)
//! - Profile document writes on every successful sign-in

pub mod actions;
pub mod data;
pub mod edges;
pub mod jwt;
pub mod models;
pub mod session;

pub use jwt::{Claims, JwtService, TokenSubject};
pub use session::{CredentialStore, PlatformCredential};
