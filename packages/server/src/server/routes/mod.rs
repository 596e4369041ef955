// HTTP routes
pub mod google_auth;
pub mod graphql;
pub mod health;

pub use google_auth::*;
pub use graphql::*;
pub use health::*;
