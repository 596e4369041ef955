//! GraphQL over HTTP to the API server

use serde::{de::DeserializeOwned, Deserialize, Serialize};

const DEFAULT_API_URL: &str = "http://localhost:8080/graphql";

#[derive(Debug, Serialize)]
struct Operation<'a, V: Serialize> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<V>,
}

/// `{ data, errors }` envelope of every API reply
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQLError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// First error the API reported; its text is meant for the user
    #[error("{0}")]
    GraphQL(String),

    #[error("No data returned")]
    NoData,
}

impl<T> GraphQLResponse<T> {
    fn into_result(self) -> Result<T, ClientError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ClientError::GraphQL(error.message)),
            None => self.data.ok_or(ClientError::NoData),
        }
    }
}

/// Thin POST-JSON client for the TechMatch API
#[derive(Clone)]
pub struct GraphQLClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl GraphQLClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: None,
        }
    }

    /// Send the session's API token as a bearer credential
    pub fn with_token(self, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..self
        }
    }

    async fn send<V, R>(&self, document: &str, variables: Option<V>) -> Result<R, ClientError>
    where
        V: Serialize,
        R: DeserializeOwned,
    {
        let mut request = self.http.post(&self.endpoint).json(&Operation {
            query: document,
            variables,
        });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        // Validation failures come back as 400 with a GraphQL error body
        let reply: GraphQLResponse<R> = request.send().await?.json().await?;
        reply.into_result()
    }

    pub async fn query<V, R>(&self, document: &'static str, variables: Option<V>) -> Result<R, ClientError>
    where
        V: Serialize,
        R: DeserializeOwned,
    {
        self.send(document, variables).await
    }

    pub async fn mutate<V, R>(&self, document: &'static str, variables: Option<V>) -> Result<R, ClientError>
    where
        V: Serialize,
        R: DeserializeOwned,
    {
        self.send(document, variables).await
    }
}

/// API endpoint from `API_URL`
pub fn api_url() -> String {
    std::env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Public base of the API for browser redirects (Google sign-in)
///
/// `API_PUBLIC_URL` wins; otherwise `API_URL` without its `/graphql` suffix.
pub fn api_public_base() -> String {
    std::env::var("API_PUBLIC_URL")
        .unwrap_or_else(|_| api_url().trim_end_matches("/graphql").to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Client for server functions, straight to the API
#[cfg(feature = "server")]
pub fn server_client() -> GraphQLClient {
    GraphQLClient::new(api_url())
}
