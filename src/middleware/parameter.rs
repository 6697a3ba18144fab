//! Parameter normalization and validation middleware

use crate::chain::{Handler, Middleware};
use crate::http::{Request, Response};
use async_trait::async_trait;
use http::Method;
use jsonschema::Validator;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Media type that selects the JSON body branch.
const JSON_MEDIA_TYPE: &str = "application/json";

/// Normalizes request input against a JSON Schema and injects declared
/// defaults.
///
/// Input is drawn from exactly one source, in priority order: a JSON body
/// when the content type is `application/json`, form parameters for POST,
/// query parameters for GET, and an empty mapping for any other verb. On
/// success the normalized mapping is attached as `request.data`; its keys
/// are exactly the schema properties that were present in the input or
/// carry a declared default.
pub struct ParameterValidator {
    schema: Value,
    validator: Validator,
}

impl ParameterValidator {
    /// Compile the schema; a schema that does not compile is a construction
    /// error, not a per-request one.
    pub fn new(schema: Value) -> Result<Self, ParameterError> {
        let validator = jsonschema::validator_for(&schema).map_err(|err| {
            ParameterError::InvalidSchema {
                reason: err.to_string(),
            }
        })?;
        Ok(Self { schema, validator })
    }

    /// Select and decode the input mapping for this request.
    fn extract(&self, request: &Request) -> Result<Value, ParameterError> {
        if request.content_type().as_deref() == Some(JSON_MEDIA_TYPE) {
            serde_json::from_slice(request.body()).map_err(|err| {
                ParameterError::MalformedJson {
                    reason: err.to_string(),
                }
            })
        } else if request.method() == Method::POST {
            Ok(Value::Object(request.form().to_json_object()))
        } else if request.method() == Method::GET {
            Ok(Value::Object(request.query().to_json_object()))
        } else {
            Ok(Value::Object(Map::new()))
        }
    }

    /// Run the black-box validator, collecting every violation.
    fn validate(&self, input: &Value) -> Result<(), ParameterError> {
        let violations: Vec<String> = self
            .validator
            .iter_errors(input)
            .map(|err| {
                let path = err.instance_path.to_string();
                if path.is_empty() {
                    err.to_string()
                } else {
                    format!("{path}: {err}")
                }
            })
            .collect();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ParameterError::SchemaViolation {
                description: violations.join("; "),
            })
        }
    }

    /// Build the canonical mapping over the declared properties: the input
    /// value if the key is present (presence, not truthiness), the declared
    /// default if not, omitted entirely otherwise.
    fn normalize(&self, input: &Value) -> Map<String, Value> {
        let mut data = Map::new();
        let Some(properties) = self.schema.get("properties").and_then(Value::as_object) else {
            return data;
        };
        let input_object = input.as_object();
        for (name, property) in properties {
            if let Some(value) = input_object.and_then(|object| object.get(name)) {
                data.insert(name.clone(), value.clone());
            } else if let Some(default) = property.get("default") {
                data.insert(name.clone(), default.clone());
            }
        }
        data
    }
}

#[async_trait]
impl Middleware for ParameterValidator {
    async fn handle(&self, mut request: Request, next: Arc<dyn Handler>) -> Response {
        let input = match self.extract(&request) {
            Ok(input) => input,
            Err(err) => {
                warn!("input decoding failed: {}", err);
                return Response::incorrect_parameter(&err);
            }
        };
        if let Err(err) = self.validate(&input) {
            warn!("schema validation failed: {}", err);
            return Response::incorrect_parameter(&err);
        }
        let data = self.normalize(&input);
        debug!(keys = data.len(), "parameters validated");
        request.data = Some(data);
        next.call(request).await
    }
}

/// Parameter handling failures; the per-request variants map to a 400
/// carrying the description.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParameterError {
    #[error("schema does not compile: {reason}")]
    InvalidSchema { reason: String },

    #[error("request body is not valid JSON: {reason}")]
    MalformedJson { reason: String },

    #[error("input does not match schema: {description}")]
    SchemaViolation { description: String },
}
