//! Entity <-> table item conversion.
//!
//! Entities are plain serde types. They are routed through `serde_json::Value` and
//! mapped one-to-one onto DynamoDB attribute types. Null object members are dropped on
//! the way in, so an unset optional field leaves no attribute behind.
//!
//! Entities name their keys `pk`/`sk`; the table stores them as `PK`/`SK`.

use aws_sdk_dynamodb::types::AttributeValue;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Number, Value};

use super::{Item, StoreError, PARTITION_KEY_ATTR, SORT_KEY_ATTR};

/// Entity field holding the partition key.
pub const PK_FIELD: &str = "pk";
/// Entity field holding the sort key.
pub const SK_FIELD: &str = "sk";

/// Encodes an entity as a table item. The entity must serialize to a JSON object.
pub fn to_item<T: Serialize>(entity: &T) -> Result<Item, StoreError> {
    let value = serde_json::to_value(entity).map_err(|e| StoreError::Codec(e.to_string()))?;
    match value {
        Value::Object(map) => Ok(encode_map(map)
            .into_iter()
            .map(|(name, v)| (to_physical(name), v))
            .collect()),
        other => Err(StoreError::Codec(format!(
            "entity must encode to an object, got {other}"
        ))),
    }
}

/// Decodes a table item into an entity.
pub fn from_item<T: DeserializeOwned>(item: Item) -> Result<T, StoreError> {
    let map = item
        .into_iter()
        .map(|(name, value)| Ok((to_field(name), decode(value)?)))
        .collect::<Result<Map<String, Value>, StoreError>>()?;
    serde_json::from_value(Value::Object(map)).map_err(|e| StoreError::Codec(e.to_string()))
}

fn to_physical(name: String) -> String {
    match name.as_str() {
        PK_FIELD => PARTITION_KEY_ATTR.to_string(),
        SK_FIELD => SORT_KEY_ATTR.to_string(),
        _ => name,
    }
}

fn to_field(name: String) -> String {
    if name == PARTITION_KEY_ATTR {
        PK_FIELD.to_string()
    } else if name == SORT_KEY_ATTR {
        SK_FIELD.to_string()
    } else {
        name
    }
}

fn encode_map(map: Map<String, Value>) -> Item {
    map.into_iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(name, v)| (name, encode(v)))
        .collect()
}

fn encode(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(values) => AttributeValue::L(values.into_iter().map(encode).collect()),
        Value::Object(map) => AttributeValue::M(encode_map(map)),
    }
}

fn decode(value: AttributeValue) -> Result<Value, StoreError> {
    Ok(match value {
        AttributeValue::S(s) => Value::String(s),
        AttributeValue::N(n) => Value::Number(parse_number(&n)?),
        AttributeValue::Bool(b) => Value::Bool(b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(values) => Value::Array(
            values
                .into_iter()
                .map(decode)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(
            map.into_iter()
                .map(|(name, v)| Ok((name, decode(v)?)))
                .collect::<Result<Map<String, Value>, StoreError>>()?,
        ),
        AttributeValue::Ss(values) => Value::Array(values.into_iter().map(Value::String).collect()),
        AttributeValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        other => {
            return Err(StoreError::Codec(format!(
                "unsupported attribute type: {other:?}"
            )))
        }
    })
}

/// DynamoDB numbers are decimal strings; prefer integers so they decode into integer fields.
fn parse_number(raw: &str) -> Result<Number, StoreError> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Number::from(i));
    }
    if let Ok(u) = raw.parse::<u64>() {
        return Ok(Number::from(u));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| StoreError::Codec(format!("invalid number attribute '{raw}'")))
}
