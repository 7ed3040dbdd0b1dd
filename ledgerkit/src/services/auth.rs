//! Authentication endpoints.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::instrument;

use crate::client::{Client, Method};
use crate::error::Error;

/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "/auth/login";

/// Authentication calls against the account API.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: Arc<dyn Client>,
}

impl AuthService {
    /// Creates a service issuing its requests through `client`.
    pub fn new(client: Arc<dyn Client>) -> Self {
        Self { client }
    }

    /// `POST /auth/login`, resolving with whatever the client returns.
    ///
    /// The request body is an empty JSON object: credentials are accepted
    /// but not transmitted yet.
    ///
    /// # Errors
    ///
    /// Propagates the client's error unchanged.
    #[instrument(skip(self, _password))]
    pub async fn login(&self, username: &str, _password: &str) -> Result<Value, Error> {
        self.client
            .request(LOGIN_PATH, Method::POST, Some(json!({})))
            .await
    }
}
