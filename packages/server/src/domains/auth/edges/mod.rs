//! Auth domain edges - GraphQL entry points

pub mod mutation;
pub mod query;
