// Common types and utilities shared across domains

pub mod auth;
pub mod validation;

pub use auth::*;
pub use validation::*;
