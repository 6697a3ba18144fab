//! Request Gate - composable middleware for a web request pipeline
//!
//! Four order-composable wrappers around a request handler:
//!
//! - **Authenticator**: resolves a session-bound identity or rejects with 401
//! - **MethodGuard**: rejects verbs outside an allow-set with 404
//! - **ParameterValidator**: normalizes JSON-body, form-POST or query-GET
//!   input into one canonical mapping, validates it against a JSON Schema
//!   and injects declared defaults
//! - **Paginator**: extracts and clamps `page`/`size` parameters on GET
//!   requests
//!
//! Wrappers compose by nesting: each inspects the request, then either
//! short-circuits with an error response or mutates the request context and
//! delegates to the next wrapper inward, down to the innermost handler.
//!
//! ## Quick Start
//!
//! ```rust
//! use request_gate::prelude::*;
//! use http::{Method, StatusCode};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let users = Arc::new(InMemoryIdentityStore::new());
//! let user = User::new(uuid::Uuid::new_v4(), "alice");
//! users.insert(user.clone());
//!
//! let schema = json!({"properties": {"q": {"default": ""}}});
//! let handler = MiddlewareChain::new()
//!     .layer(Arc::new(Authenticator::new(users)))
//!     .layer(Arc::new(MethodGuard::new([Method::GET])))
//!     .layer(Arc::new(ParameterValidator::new(schema).expect("schema compiles")))
//!     .layer(Arc::new(Paginator::default()))
//!     .build(Arc::new(HandlerFn(|_request: Request| async {
//!         Response::ok()
//!     })));
//!
//! let request = Request::builder(Method::GET)
//!     .session_value("user_id", user.id.simple().to_string())
//!     .build();
//! assert_eq!(handler.call(request).await.status(), StatusCode::OK);
//! # }
//! ```

pub mod chain;
pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod store;

pub use config::Config;
pub use error::{GateError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::chain::{Handler, HandlerFn, Middleware, MiddlewareChain};
    pub use crate::config::Config;
    pub use crate::error::{GateError, Result};
    pub use crate::http::{Params, Request, Response, SessionData};
    pub use crate::middleware::{Authenticator, MethodGuard, Paginator, ParameterValidator};
    pub use crate::store::{IdentityStore, InMemoryIdentityStore, User};
}
