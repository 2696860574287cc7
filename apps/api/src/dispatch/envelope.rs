use std::collections::BTreeMap;

use serde::Serialize;

/// Body sent when the response itself cannot be serialized.
pub const SERIALIZATION_ERROR_BODY: &str = r#"{"error": "JSON Serialization Error"}"#;

/// The uniform response shape returned for every invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// Serialized JSON.
    pub body: String,
}

impl ResponseEnvelope {
    /// Serializes `body` under `status`. A body that cannot be serialized degrades to a
    /// fixed 500.
    pub fn json<T: Serialize + ?Sized>(status: u16, body: &T) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => Self {
                status_code: status,
                headers: default_headers(),
                body,
            },
            Err(e) => {
                tracing::error!("Failed to serialize response body: {e}");
                Self {
                    status_code: 500,
                    headers: default_headers(),
                    body: SERIALIZATION_ERROR_BODY.to_string(),
                }
            }
        }
    }

    pub fn ok<T: Serialize + ?Sized>(body: &T) -> Self {
        Self::json(200, body)
    }
}

fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
    ])
}
