//! Request and response value types at the middleware boundary
//!
//! These are the minimal internal structs the chain operates on; adapters
//! mapping them to a concrete web framework live outside this crate.

pub mod request;
pub mod response;

pub use request::{Params, Request, RequestBuilder, SessionData};
pub use response::Response;
