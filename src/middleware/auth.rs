//! Session authentication middleware

use crate::chain::{Handler, Middleware};
use crate::http::{Request, Response};
use crate::store::{parse_user_id, IdentityStore, User};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Session key the user identifier is stored under.
pub const DEFAULT_SESSION_KEY: &str = "user_id";

/// Resolves the session-bound identity or rejects with 401.
///
/// On success the identity is attached as `request.user`; on any failure
/// the inner handler is never invoked. Stateless across calls.
pub struct Authenticator {
    users: Arc<dyn IdentityStore>,
    session_key: String,
}

impl Authenticator {
    pub fn new(users: Arc<dyn IdentityStore>) -> Self {
        Self {
            users,
            session_key: DEFAULT_SESSION_KEY.to_string(),
        }
    }

    /// Override the session key the identifier is read from.
    pub fn with_session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = key.into();
        self
    }

    async fn resolve(&self, request: &Request) -> Result<User, AuthError> {
        let raw = request
            .session()
            .get(&self.session_key)
            .ok_or(AuthError::MissingSession)?;
        let id = parse_user_id(raw).ok_or_else(|| AuthError::InvalidUserId(raw.to_string()))?;
        self.users
            .find_by_id(id)
            .await
            .ok_or(AuthError::UnknownUser(id))
    }
}

#[async_trait]
impl Middleware for Authenticator {
    async fn handle(&self, mut request: Request, next: Arc<dyn Handler>) -> Response {
        match self.resolve(&request).await {
            Ok(user) => {
                debug!(user_id = %user.id, "authentication successful");
                request.user = Some(user);
                next.call(request).await
            }
            Err(err) => {
                warn!("authentication failed: {}", err);
                Response::unauthorized()
            }
        }
    }
}

/// Authentication failures; every variant maps to an empty 401.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    #[error("no user identifier in session")]
    MissingSession,

    #[error("session user identifier is not a valid id: {0:?}")]
    InvalidUserId(String),

    #[error("no identity record for user {0}")]
    UnknownUser(Uuid),
}
