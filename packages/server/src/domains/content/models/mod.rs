pub mod catalog;
pub mod embedded;

pub use catalog::*;
pub use embedded::{embedded_text, SiteContent};
