//! Response produced by the chain

use bytes::Bytes;
use http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::warn;

/// Body shape for error responses carrying a description.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Status code plus optional content body.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    body: Bytes,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            body: Bytes::new(),
        }
    }

    /// 200 with an empty body.
    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    /// 401 with an empty body, for authentication failures.
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED)
    }

    /// 404 with an empty body, for disallowed methods.
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND)
    }

    /// 400 carrying a human-readable error description.
    ///
    /// Shared by JSON parse failures, schema violations and pagination parse
    /// failures; the payload content is what distinguishes them.
    pub fn incorrect_parameter(description: impl fmt::Display) -> Self {
        Self::json(
            StatusCode::BAD_REQUEST,
            &ErrorBody {
                error: description.to_string(),
            },
        )
    }

    /// Response with a serialized JSON body.
    pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(bytes) => Self {
                status,
                body: Bytes::from(bytes),
            },
            Err(err) => {
                warn!("failed to serialize response body: {}", err);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Parse the body as JSON, for assertions and adapters.
    pub fn body_json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}
