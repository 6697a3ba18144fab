//! Pagination extraction middleware

use crate::chain::{Handler, Middleware};
use crate::config::PaginationConfig;
use crate::http::{Request, Response};
use async_trait::async_trait;
use http::Method;
use std::sync::Arc;
use tracing::{debug, warn};

/// Extracts `page` and `size` for GET requests, clamping `size` into the
/// configured bounds. Other verbs pass through untouched.
///
/// `page` is parsed but never clamped; callers validate `page >= 1`
/// themselves if they need it.
#[derive(Debug, Clone)]
pub struct Paginator {
    default_size: i64,
    min_size: i64,
    max_size: i64,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(10, 1, 20)
    }
}

impl Paginator {
    /// Bounds must be ordered, `min_size <= default_size <= max_size`;
    /// [`crate::config::loader::validate_config`] enforces this for
    /// config-driven construction.
    pub fn new(default_size: i64, min_size: i64, max_size: i64) -> Self {
        Self {
            default_size,
            min_size,
            max_size,
        }
    }

    fn parse_field(field: &'static str, raw: &str) -> Result<i64, PaginationError> {
        raw.parse()
            .map_err(|err: std::num::ParseIntError| PaginationError::InvalidInteger {
                field,
                value: raw.to_string(),
                reason: err.to_string(),
            })
    }
}

impl From<&PaginationConfig> for Paginator {
    fn from(config: &PaginationConfig) -> Self {
        Self::new(config.default_size, config.min_size, config.max_size)
    }
}

#[async_trait]
impl Middleware for Paginator {
    async fn handle(&self, mut request: Request, next: Arc<dyn Handler>) -> Response {
        if request.method() != Method::GET {
            return next.call(request).await;
        }

        let default_size = self.default_size.to_string();
        let page_raw = request.query().get("page").unwrap_or("1");
        let size_raw = request.query().get("size").unwrap_or(&default_size);
        let parsed = Self::parse_field("page", page_raw)
            .and_then(|page| Self::parse_field("size", size_raw).map(|size| (page, size)));

        match parsed {
            Ok((page, size)) => {
                let clamped = size.clamp(self.min_size, self.max_size);
                if clamped != size {
                    debug!(requested = size, clamped, "page size clamped");
                }
                request.page = Some(page);
                request.size = Some(clamped);
                next.call(request).await
            }
            Err(err) => {
                warn!("pagination parsing failed: {}", err);
                Response::incorrect_parameter(&err)
            }
        }
    }
}

/// Pagination failures; map to a 400 carrying the description.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PaginationError {
    #[error("{field} is not an integer: {value:?} ({reason})")]
    InvalidInteger {
        field: &'static str,
        value: String,
        reason: String,
    },
}
