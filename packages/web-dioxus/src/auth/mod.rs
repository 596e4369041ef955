//! Session-backed authentication

mod context;
mod server_fns;

pub use context::*;
pub use server_fns::*;
