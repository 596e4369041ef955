//! Content domain - services, testimonials, clients and contact details

pub mod data;
pub mod edges;
pub mod models;

pub use models::ContentCatalog;
