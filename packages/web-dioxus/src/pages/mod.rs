//! Page components

pub mod account;
pub mod public;
