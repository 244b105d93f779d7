//! Lenient JSON body extractor
//!
//! Malformed or missing JSON never rejects the request; handlers see an
//! empty body and apply their own required-field checks.

use std::convert::Infallible;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde_json::{Map, Value};

static NULL: Value = Value::Null;

/// Parsed request body, `None` when it was not valid JSON
#[derive(Debug, Clone, Default)]
pub struct JsonBody(pub Option<Value>);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(bytes) = Bytes::from_request(req, state).await else {
            return Ok(Self(None));
        };
        Ok(Self(serde_json::from_slice(&bytes).ok()))
    }
}

impl JsonBody {
    /// Top-level field, `null` when absent
    pub fn get(&self, key: &str) -> &Value {
        self.0
            .as_ref()
            .and_then(|v| v.as_object())
            .and_then(|m| m.get(key))
            .unwrap_or(&NULL)
    }

    /// Top-level field that is present and not `null`
    pub fn present(&self, key: &str) -> Option<&Value> {
        Some(self.get(key)).filter(|v| !v.is_null())
    }

    /// Whether the key exists at all (even as `null`)
    pub fn has(&self, key: &str) -> bool {
        self.0
            .as_ref()
            .and_then(|v| v.as_object())
            .is_some_and(|m| m.contains_key(key))
    }

    /// The whole body, `null` when absent
    pub fn value(&self) -> &Value {
        self.0.as_ref().unwrap_or(&NULL)
    }

    /// The body as an object, if it is one
    pub fn into_object(self) -> Option<Map<String, Value>> {
        match self.0 {
            Some(Value::Object(map)) => Some(map),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accessors() {
        let body = JsonBody(Some(json!({"a": 1, "b": null})));
        assert_eq!(body.get("a"), &json!(1));
        assert!(body.get("missing").is_null());
        assert!(body.has("b"));
        assert!(body.present("b").is_none());
        assert!(!body.has("c"));
        assert!(body.into_object().is_some());
    }

    #[test]
    fn test_non_object_body() {
        let body = JsonBody(Some(json!([1, 2])));
        assert!(body.get("a").is_null());
        assert!(!body.has("a"));
        assert!(body.into_object().is_none());
        assert!(JsonBody(None).value().is_null());
    }

    #[tokio::test]
    async fn test_malformed_json_is_empty() {
        let req = Request::builder()
            .body(axum::body::Body::from("{not json"))
            .unwrap();
        let JsonBody(value) = JsonBody::from_request(req, &()).await.unwrap();
        assert!(value.is_none());
    }
}
