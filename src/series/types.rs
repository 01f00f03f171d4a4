// src/series/types.rs

use serde::Deserialize;
use serde_json::Value;

/// Top-level input document. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
pub struct Document {
    #[serde(rename = "Dependence")]
    pub dependence: Vec<Entry>,
}

/// One `{"Date": ..., "Value": ...}` pair as written in the file.
#[derive(Debug, Deserialize)]
pub struct Entry {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Value")]
    pub value: RawValue,
}

/// Values are normally numeric strings, but plain JSON integers are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Int(i64),
    Text(String),
    Other(Value),
}

impl RawValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RawValue::Int(n) => Some(*n),
            RawValue::Text(s) => s.trim().parse().ok(),
            RawValue::Other(_) => None,
        }
    }

    pub fn raw(&self) -> String {
        match self {
            RawValue::Int(n) => n.to_string(),
            RawValue::Text(s) => s.clone(),
            RawValue::Other(v) => v.to_string(),
        }
    }
}
