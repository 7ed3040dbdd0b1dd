//! HTTP request seam used by every service.
//!
//! [`Client`] is the collaborator services delegate to; [`HttpClient`] is the
//! reqwest-backed implementation rooted at a base URL. Tests and embedders can
//! supply their own [`Client`].

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub use reqwest::Method;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use crate::config::Config;
use crate::error::Error;

/// Boxed, `Send` future returned by [`Client::request`].
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Performs one request against the API and resolves with its JSON body.
pub trait Client: Send + Sync + fmt::Debug {
    /// Send `method` to `path`, with `body` serialised as JSON when present.
    ///
    /// Fails on transport errors and on responses the implementation
    /// considers unsuccessful.
    fn request<'a>(
        &'a self,
        path: &'a str,
        method: Method,
        body: Option<Value>,
    ) -> BoxFuture<'a, Result<Value, Error>>;
}

/// [`Client`] backed by a shared `reqwest` connection pool.
#[derive(Clone)]
pub struct HttpClient {
    base_url: Url,
    token: Option<String>,
    http: reqwest::Client,
}

impl HttpClient {
    /// Creates a client rooted at `base_url` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::transport_with("failed to build HTTP client", e))?;
        Ok(Self {
            base_url: with_trailing_slash(base_url),
            token: None,
            http,
        })
    }

    /// Attach `token` as a bearer credential to every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Build a client from [`Config::api_url`], [`Config::timeout_secs`] and
    /// [`Config::api_token`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `api_url` is not an absolute URL.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let base_url = Url::parse(&config.api_url).map_err(|e| {
            Error::config_with(format!("invalid api_url '{}'", config.api_url), e)
        })?;
        let client = Self::new(base_url, Duration::from_secs(config.timeout_secs))?;
        Ok(match &config.api_token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        })
    }

    /// Base URL paths are joined onto.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for `path`, kept under the base URL's own path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if `path` cannot be joined, or if it
    /// resolves outside the base URL (another origin, or above its path).
    pub fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::transport_with(format!("invalid request path '{path}'"), e))?;
        if url.origin() != self.base_url.origin() || !url.path().starts_with(self.base_url.path())
        {
            return Err(Error::Transport(format!(
                "request path '{path}' escapes base URL {}",
                self.base_url
            )));
        }
        Ok(url)
    }

    #[instrument(skip(self, body), fields(base = %self.base_url), err)]
    async fn send(&self, path: &str, method: Method, body: Option<Value>) -> Result<Value, Error> {
        let url = self.endpoint(path)?;
        let mut request = self.http.request(method.clone(), url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::transport_with(format!("{method} {path}"), e))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::transport_with(format!("{method} {path}: reading body"), e))?;
        tracing::debug!(status = status.as_u16(), len = bytes.len(), "response received");

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| Error::Decode(e.to_string()))
    }
}

impl Client for HttpClient {
    fn request<'a>(
        &'a self,
        path: &'a str,
        method: Method,
        body: Option<Value>,
    ) -> BoxFuture<'a, Result<Value, Error>> {
        Box::pin(self.send(path, method, body))
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use axum::Json;
    use axum::Router;
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use serde_json::json;

    use super::*;

    async fn spawn_server() -> SocketAddr {
        async fn get_user(Path(id): Path<String>) -> Json<Value> {
            Json(json!({ "id": id, "name": "Ada" }))
        }

        async fn echo(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            Json(json!({ "received": body, "authorization": auth }))
        }

        async fn missing() -> (StatusCode, &'static str) {
            (StatusCode::NOT_FOUND, "no such thing")
        }

        async fn empty() -> StatusCode {
            StatusCode::NO_CONTENT
        }

        async fn garbage() -> &'static str {
            "not json"
        }

        let app = Router::new()
            .route("/api/users/{id}", get(get_user))
            .route("/api/echo", post(echo))
            .route("/api/missing", get(missing))
            .route("/api/empty", get(empty))
            .route("/api/garbage", get(garbage));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn client_for(addr: SocketAddr) -> HttpClient {
        let base = Url::parse(&format!("http://{addr}/api")).unwrap();
        HttpClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn endpoint_stays_under_base_path() {
        let client = HttpClient::new(
            Url::parse("https://api.example.com/v1").unwrap(),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            client.endpoint("/users/42").unwrap().as_str(),
            "https://api.example.com/v1/users/42"
        );
        assert_eq!(
            client.endpoint("auth/login").unwrap().as_str(),
            "https://api.example.com/v1/auth/login"
        );
    }

    #[test]
    fn endpoint_rejects_paths_leaving_base() {
        let client = HttpClient::new(
            Url::parse("https://api.example.com/v1").unwrap(),
            Duration::from_secs(1),
        )
        .unwrap()
        .with_token("secret");
        for path in [
            "https://evil.example/steal",
            "//evil.example/x",
            "http://api.example.com/v1/users",
            "../admin",
            "/../../admin",
        ] {
            let err = client.endpoint(path).unwrap_err();
            assert!(matches!(err, Error::Transport(_)), "{path}: {err}");
        }
    }

    #[tokio::test]
    async fn path_outside_base_is_never_requested() {
        let addr = spawn_server().await;
        let err = client_for(addr)
            .with_token("secret")
            .request(&format!("http://{addr}/elsewhere"), Method::GET, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(ref m) if m.contains("escapes base URL")));
    }

    #[test]
    fn debug_hides_bearer_token() {
        let client = HttpClient::new(
            Url::parse("https://api.example.com").unwrap(),
            Duration::from_secs(1),
        )
        .unwrap()
        .with_token("secret");
        let debug = format!("{client:?}");
        assert!(debug.contains("https://api.example.com/"));
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn from_config_rejects_relative_url() {
        let config = Config {
            api_url: "not a url".to_owned(),
            ..Config::default()
        };
        let err = HttpClient::from_config(&config).unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("not a url")));
    }

    #[tokio::test]
    async fn get_returns_json_body() {
        let addr = spawn_server().await;
        let value = client_for(addr)
            .request("/users/42", Method::GET, None)
            .await
            .unwrap();
        assert_eq!(value, json!({ "id": "42", "name": "Ada" }));
    }

    #[tokio::test]
    async fn post_sends_json_body_and_bearer_token() {
        let addr = spawn_server().await;
        let client = client_for(addr).with_token("secret");
        let value = client
            .request("/echo", Method::POST, Some(json!({ "a": 1 })))
            .await
            .unwrap();
        assert_eq!(value["received"], json!({ "a": 1 }));
        assert_eq!(value["authorization"], json!("Bearer secret"));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let addr = spawn_server().await;
        let err = client_for(addr)
            .request("/missing", Method::GET, None)
            .await
            .unwrap_err();
        match err {
            Error::Status { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "no such thing");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn empty_body_is_null_and_invalid_json_is_decode_error() {
        let addr = spawn_server().await;
        let client = client_for(addr);
        assert_eq!(
            client.request("/empty", Method::GET, None).await.unwrap(),
            Value::Null
        );
        assert!(matches!(
            client.request("/garbage", Method::GET, None).await,
            Err(Error::Decode(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = client_for(addr)
            .request("/users/1", Method::GET, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
