//! Admissions domain - the college directory

pub mod data;
pub mod edges;
pub mod models;

pub use models::{College, CollegeDirectory, CollegeSection};
