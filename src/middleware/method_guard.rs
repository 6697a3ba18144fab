//! HTTP method allow-listing middleware

use crate::chain::{Handler, Middleware};
use crate::http::{Request, Response};
use async_trait::async_trait;
use http::Method;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

/// Rejects verbs outside a fixed allow-set.
///
/// Disallowed verbs get 404 rather than 405, so a rejected verb is
/// indistinguishable from an unknown path.
pub struct MethodGuard {
    allowed: HashSet<Method>,
}

impl MethodGuard {
    pub fn new(methods: impl IntoIterator<Item = Method>) -> Self {
        Self {
            allowed: methods.into_iter().collect(),
        }
    }

    pub fn allows(&self, method: &Method) -> bool {
        self.allowed.contains(method)
    }
}

#[async_trait]
impl Middleware for MethodGuard {
    async fn handle(&self, request: Request, next: Arc<dyn Handler>) -> Response {
        if !self.allows(request.method()) {
            warn!(method = %request.method(), "method not in allow-set");
            return Response::not_found();
        }
        next.call(request).await
    }
}
