// TechMatch site API core
//
// Serves the public site content, the college directory, contact and booking
// inquiries, and the authentication flows backed by the hosted identity
// platform. Domains live under domains/*, infrastructure seams under kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
