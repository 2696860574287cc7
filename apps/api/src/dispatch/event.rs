//! The inbound invocation payload, as sent by an HTTP API gateway.
//!
//! Every field is optional so that both the v1 (REST) and v2 (HTTP) payload shapes
//! deserialize, as do hand-written test events.

use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;

/// Method reported when the event carries none.
pub const UNKNOWN_METHOD: &str = "UNKNOWN";

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundEvent {
    #[serde(default)]
    pub raw_path: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub request_context: Option<EventContext>,
    #[serde(default)]
    pub headers: Option<HashMap<String, Value>>,
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, Value>>,
    /// A JSON string, or an already-parsed structure.
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub is_base64_encoded: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct EventContext {
    #[serde(default)]
    pub http: Option<HttpContext>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct HttpContext {
    #[serde(default)]
    pub method: Option<String>,
}

impl InboundEvent {
    /// `rawPath`, then `path`, else empty.
    pub fn path(&self) -> &str {
        self.raw_path
            .as_deref()
            .or(self.path.as_deref())
            .unwrap_or_default()
    }

    /// `requestContext.http.method`, then `httpMethod`, else `UNKNOWN`.
    pub fn method(&self) -> &str {
        self.request_context
            .as_ref()
            .and_then(|ctx| ctx.http.as_ref())
            .and_then(|http| http.method.as_deref())
            .or(self.http_method.as_deref())
            .unwrap_or(UNKNOWN_METHOD)
    }

    /// Header map with lower-cased names. Null values are dropped.
    pub fn normalized_headers(&self) -> HashMap<String, String> {
        self.headers
            .iter()
            .flatten()
            .filter_map(|(name, value)| {
                scalar_text(value).map(|text| (name.to_lowercase(), text))
            })
            .collect()
    }

    pub fn path_parameter(&self, name: &str) -> Option<String> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .and_then(scalar_text)
    }

    /// The request body as text, base64-decoded when the event says so.
    /// `None` when the event has no body.
    pub fn body_text(&self) -> Result<Option<String>, AppError> {
        let text = match &self.body {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::String(text)) => text.clone(),
            Some(structured) => structured.to_string(),
        };

        if !self.is_base64_encoded.unwrap_or(false) {
            return Ok(Some(text));
        }

        let bytes = STANDARD.decode(text.trim()).map_err(|e| {
            tracing::error!("Failed to decode Base64 body: {e}");
            AppError::Internal(anyhow::anyhow!("Invalid Base64 body"))
        })?;
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid Base64 body")))
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
