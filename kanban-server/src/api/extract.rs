//! Request extractors with kanban error semantics

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde_json::{Map, Value};
use shared::error::{AppError, AppResult, ErrorCode};

pub const BODY_NOT_OBJECT: &str = "Request body must be a JSON object";

/// JSON request body that must be an object
///
/// Any rejection (missing content type, malformed JSON, non-object) becomes a
/// 400 with the `errors` array body.
#[derive(Debug, Clone)]
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(Value::Object(map))) => Ok(JsonObject(map)),
            Ok(Json(other)) => {
                tracing::debug!(kind = json_kind(&other), "Rejected non-object body");
                Err(AppError::rule(ErrorCode::InvalidRequest, BODY_NOT_OBJECT))
            }
            Err(rejection) => {
                tracing::debug!(%rejection, "Rejected request body");
                Err(AppError::rule(ErrorCode::InvalidRequest, BODY_NOT_OBJECT))
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse a path identifier; anything but a plain integer is a routing miss
pub fn parse_path_id(raw: &str) -> AppResult<i64> {
    raw.parse().map_err(|_| AppError::not_found())
}
