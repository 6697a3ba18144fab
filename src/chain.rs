//! Middleware composition
//!
//! A chain is an explicit ordered list of middlewares built at route
//! registration time. [`MiddlewareChain::build`] composes them around a
//! terminal handler by wrapping in reverse, so the first middleware layered
//! runs outermost. Each middleware either short-circuits with a response or
//! delegates to the next handler inward.

use crate::http::{Request, Response};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// Terminal request handler at the center of a chain.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn call(&self, request: Request) -> Response;
}

/// A single wrapper around a handler.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Inspect the request, then either return a response directly or
    /// delegate to `next`.
    async fn handle(&self, request: Request, next: Arc<dyn Handler>) -> Response;
}

/// Adapter turning an async closure into a [`Handler`].
pub struct HandlerFn<F>(pub F);

#[async_trait]
impl<F, Fut> Handler for HandlerFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Response> + Send + 'static,
{
    async fn call(&self, request: Request) -> Response {
        (self.0)(request).await
    }
}

/// Ordered middleware list composed around a terminal handler.
#[derive(Default)]
pub struct MiddlewareChain {
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a middleware; the first one appended runs outermost.
    pub fn layer(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middlewares.push(middleware);
        self
    }

    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Compose the chain around `handler`.
    pub fn build(self, handler: Arc<dyn Handler>) -> Arc<dyn Handler> {
        let mut next = handler;
        for middleware in self.middlewares.into_iter().rev() {
            next = Arc::new(Link { middleware, next });
        }
        next
    }
}

/// One composed layer: a middleware plus everything inward of it.
struct Link {
    middleware: Arc<dyn Middleware>,
    next: Arc<dyn Handler>,
}

#[async_trait]
impl Handler for Link {
    async fn call(&self, request: Request) -> Response {
        self.middleware.handle(request, self.next.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use std::sync::Mutex;

    /// Middleware that records its name on entry and delegates.
    struct Marker {
        name: &'static str,
        trace: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl Middleware for Marker {
        async fn handle(&self, request: Request, next: Arc<dyn Handler>) -> Response {
            self.trace.lock().unwrap().push(self.name);
            next.call(request).await
        }
    }

    /// Middleware that never delegates.
    struct Blocker;

    #[async_trait]
    impl Middleware for Blocker {
        async fn handle(&self, _request: Request, _next: Arc<dyn Handler>) -> Response {
            Response::not_found()
        }
    }

    fn trace_handler(trace: Arc<Mutex<Vec<&'static str>>>) -> Arc<dyn Handler> {
        Arc::new(HandlerFn(move |_request: Request| {
            let trace = trace.clone();
            async move {
                trace.lock().unwrap().push("handler");
                Response::ok()
            }
        }))
    }

    fn get_request() -> Request {
        Request::builder(http::Method::GET).build()
    }

    #[tokio::test]
    async fn test_layers_run_in_registration_order() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let chain = MiddlewareChain::new()
            .layer(Arc::new(Marker {
                name: "outer",
                trace: trace.clone(),
            }))
            .layer(Arc::new(Marker {
                name: "inner",
                trace: trace.clone(),
            }))
            .build(trace_handler(trace.clone()));

        let response = chain.call(get_request()).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(*trace.lock().unwrap(), vec!["outer", "inner", "handler"]);
    }

    #[tokio::test]
    async fn test_short_circuit_skips_inner_layers() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let chain = MiddlewareChain::new()
            .layer(Arc::new(Marker {
                name: "outer",
                trace: trace.clone(),
            }))
            .layer(Arc::new(Blocker))
            .layer(Arc::new(Marker {
                name: "inner",
                trace: trace.clone(),
            }))
            .build(trace_handler(trace.clone()));

        let response = chain.call(get_request()).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(*trace.lock().unwrap(), vec!["outer"]);
    }

    #[tokio::test]
    async fn test_empty_chain_is_just_the_handler() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let chain = MiddlewareChain::new().build(trace_handler(trace.clone()));

        let response = chain.call(get_request()).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(*trace.lock().unwrap(), vec!["handler"]);
    }
}
