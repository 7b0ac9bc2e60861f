//! Forgiving deserializers for profile fields.
//!
//! Profiles come straight from browser clients. A field with the wrong JSON
//! type is read as absent instead of failing the whole request.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::domain::{Industry, IndustryId, Skill};

pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value))
}

/// Non-negative whole count; fractional values are truncated
pub fn count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value)
        .filter(|n| *n >= 0.0)
        .map(|n| n.min(u32::MAX as f64) as u32))
}

pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// List of strings; non-string entries are skipped
pub fn strings<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        )),
        _ => Ok(None),
    }
}

/// List of skills; entries that are neither a name nor a `{name}` object are skipped
pub fn skills<'de, D>(deserializer: D) -> Result<Option<Vec<Skill>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

pub fn industry<'de, D>(deserializer: D) -> Result<Option<Industry>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}

pub fn industry_id<'de, D>(deserializer: D) -> Result<Option<IndustryId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => Ok(n.as_i64().map(IndustryId::Number)),
        Value::String(s) => Ok(Some(IndustryId::Text(s))),
        _ => Ok(None),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}
