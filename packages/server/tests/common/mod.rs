// Shared fixtures for the schema-level integration tests

pub mod graphql;
pub mod harness;

pub use graphql::*;
pub use harness::*;

/// String variables for a GraphQL document: `vars!("code" => "123456")`
#[macro_export]
macro_rules! vars {
    ($($name:expr => $value:expr),* $(,)?) => {
        [$(($name, juniper::InputValue::scalar($value))),*]
            .into_iter()
            .map(|(name, value): (&str, juniper::InputValue)| (name.to_string(), value))
            .collect::<juniper::Variables>()
    };
}
