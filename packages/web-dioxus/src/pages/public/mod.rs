//! Site pages open to everyone

mod about;
mod admissions;
mod booking;
mod clients;
mod contact;
mod home;
mod services;
mod testimonials;

pub use about::*;
pub use admissions::*;
pub use booking::*;
pub use clients::*;
pub use contact::*;
pub use home::*;
pub use services::*;
pub use testimonials::*;
