//! Runs documents straight against the schema, no HTTP in between.

use juniper::Variables;
use serde_json::Value;
use server_core::server::graphql::{create_schema, GraphQLContext, Schema};

pub struct GraphQLClient {
    schema: Schema,
    context: GraphQLContext,
}

/// Data plus the message of every error juniper reported
#[derive(Debug)]
pub struct GraphQLResult {
    pub data: Value,
    pub errors: Vec<String>,
}

impl GraphQLResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Data of a response that must not carry errors
    pub fn unwrap(self) -> Value {
        assert!(self.errors.is_empty(), "GraphQL errors: {:?}", self.errors);
        self.data
    }

    /// First error message of a response that must have failed
    pub fn error(&self) -> &str {
        match self.errors.first() {
            Some(message) => message,
            None => panic!("expected a GraphQL error, got {}", self.data),
        }
    }

    /// Dotted lookup into the data, e.g. `signInWithEmail.user.uid`
    pub fn get(&self, path: &str) -> Value {
        path.split('.')
            .fold(&self.data, |node, key| &node[key])
            .clone()
    }
}

impl GraphQLClient {
    pub fn with_context(context: GraphQLContext) -> Self {
        Self {
            schema: create_schema(),
            context,
        }
    }

    pub async fn execute(&self, document: &str) -> GraphQLResult {
        self.execute_with_vars(document, Variables::new()).await
    }

    pub async fn execute_with_vars(&self, document: &str, variables: Variables) -> GraphQLResult {
        let (value, errors) = match juniper::execute(
            document,
            None,
            &self.schema,
            &variables,
            &self.context,
        )
        .await
        {
            Ok(executed) => executed,
            Err(e) => panic!("document rejected before execution: {e:?}"),
        };

        GraphQLResult {
            data: serde_json::to_value(&value).unwrap(),
            errors: errors
                .iter()
                .map(|e| e.error().message().to_string())
                .collect(),
        }
    }

    pub async fn query(&self, document: &str) -> Value {
        self.execute(document).await.unwrap()
    }

    pub async fn query_with_vars(&self, document: &str, variables: Variables) -> Value {
        self.execute_with_vars(document, variables).await.unwrap()
    }
}
