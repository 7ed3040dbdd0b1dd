//! Thin service wrappers over [`Client`](crate::client::Client).
//!
//! Services hold a shared client and forward one request per call. They do
//! not validate input, retry, or cache; client results and errors are
//! returned unchanged.

mod auth;
mod user;

pub use self::auth::{AuthService, LOGIN_PATH};
pub use self::user::UserService;
