//! User profile endpoints.

use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use crate::client::{Client, Method};
use crate::error::Error;

/// User calls against the account API.
#[derive(Debug, Clone)]
pub struct UserService {
    client: Arc<dyn Client>,
}

impl UserService {
    /// Creates a service issuing its requests through `client`.
    pub fn new(client: Arc<dyn Client>) -> Self {
        Self { client }
    }

    /// `GET /users/{user_id}`, resolving with whatever the client returns.
    ///
    /// # Errors
    ///
    /// Propagates the client's error unchanged.
    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: &str) -> Result<Value, Error> {
        let path = format!("/users/{user_id}");
        self.client.request(&path, Method::GET, None).await
    }
}
