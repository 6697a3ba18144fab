//! Mutable request context passed through the middleware chain

use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, Method};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::store::User;

/// Multi-valued parameter map with insertion order preserved.
///
/// Repeated keys accumulate their values; [`Params::get`] returns the last
/// value for a key, the rule query strings and form bodies resolve repeats
/// with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: IndexMap<String, Vec<String>>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value for a key, keeping any earlier values.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(key.into()).or_default().push(value.into());
    }

    /// Last value recorded for a key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    /// All values recorded for a key.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Collapse into a JSON object with one string value per key (last wins).
    pub fn to_json_object(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .filter_map(|(key, values)| {
                values
                    .last()
                    .map(|value| (key.clone(), Value::String(value.clone())))
            })
            .collect()
    }
}

/// Request-scoped session state.
///
/// Populated by the session storage collaborator before the chain runs; the
/// chain only reads it.
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    values: HashMap<String, String>,
}

impl SessionData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Mutable request context handed through the middleware chain.
///
/// The wire-facing fields are fixed at build time; `user`, `data`, `page`
/// and `size` are attached by the middlewares as the request moves inward.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    headers: HeaderMap,
    body: Bytes,
    query: Params,
    form: Params,
    session: SessionData,
    /// Identity attached by the authenticator.
    pub user: Option<User>,
    /// Normalized parameter mapping attached by the parameter validator.
    pub data: Option<Map<String, Value>>,
    /// Page number attached by the paginator on GET requests.
    pub page: Option<i64>,
    /// Clamped page size attached by the paginator on GET requests.
    pub size: Option<i64>,
}

impl Request {
    pub fn builder(method: Method) -> RequestBuilder {
        RequestBuilder::new(method)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn query(&self) -> &Params {
        &self.query
    }

    pub fn form(&self) -> &Params {
        &self.form
    }

    pub fn session(&self) -> &SessionData {
        &self.session
    }

    /// Media type of the request, with parameters (charset etc.) stripped
    /// and lowercased.
    pub fn content_type(&self) -> Option<String> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| {
                value
                    .split(';')
                    .next()
                    .unwrap_or("")
                    .trim()
                    .to_ascii_lowercase()
            })
    }
}

/// Builder for [`Request`].
#[derive(Debug)]
pub struct RequestBuilder {
    method: Method,
    headers: HeaderMap,
    body: Bytes,
    query: Params,
    form: Params,
    session: SessionData,
}

impl RequestBuilder {
    fn new(method: Method) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            query: Params::new(),
            form: Params::new(),
            session: SessionData::new(),
        }
    }

    pub fn header(mut self, name: header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Set a JSON body along with the matching content type.
    pub fn json_body(mut self, value: &Value) -> Self {
        self.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        self.body = Bytes::from(value.to_string());
        self
    }

    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.append(key, value);
        self
    }

    pub fn form_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.append(key, value);
        self
    }

    pub fn session_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.session.insert(key, value);
        self
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method,
            headers: self.headers,
            body: self.body,
            query: self.query,
            form: self.form,
            session: self.session,
            user: None,
            data: None,
            page: None,
            size: None,
        }
    }
}
