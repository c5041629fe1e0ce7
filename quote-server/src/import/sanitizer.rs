//! Extraction response cleanup
//!
//! Model output tends to wrap JSON in markdown fences, add prose around it
//! and leave trailing commas. This module recovers the JSON object.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::utils::{AppError, AppResult, ErrorCode};

/// One line of an extracted vendor bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedItem {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub qty: f64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rate: f64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub hsn: Option<String>,
}

/// Structured content of a vendor bill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorExtraction {
    #[serde(default, deserialize_with = "lenient_string")]
    pub vendor: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default)]
    pub items: Vec<ExtractedItem>,
}

/// Recover the JSON object from a raw model response
///
/// Returns `None` when the text holds no `{ ... }` span.
pub fn sanitize_json(text: &str) -> Option<String> {
    let unfenced = text.replace("```json", "").replace("```JSON", "").replace("```", "");
    let start = unfenced.find('{')?;
    let end = unfenced.rfind('}')?;
    if end < start {
        return None;
    }
    Some(strip_trailing_commas(&unfenced[start..=end]))
}

/// Remove commas directly followed (modulo whitespace) by `}` or `]`,
/// leaving string literals untouched.
fn strip_trailing_commas(json: &str) -> String {
    let chars: Vec<char> = json.chars().collect();
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Sanitize and parse a raw extraction response
pub fn parse_extraction(text: &str) -> AppResult<VendorExtraction> {
    let json = sanitize_json(text).ok_or_else(|| {
        AppError::with_message(ErrorCode::ExtractionUnreadable, "No JSON object found in extraction")
    })?;
    serde_json::from_str(&json).map_err(|e| {
        AppError::with_message(
            ErrorCode::ExtractionUnreadable,
            format!("Extraction is not valid JSON: {e}"),
        )
    })
}

/// Number, numeric string (thousand separators allowed) or null
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0.0),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("number out of range")),
        Value::String(s) if s.trim().is_empty() => Ok(0.0),
        Value::String(s) => s
            .trim()
            .replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| serde::de::Error::custom(format!("not a number: {s}"))),
        other => Err(serde::de::Error::custom(format!("not a number: {other}"))),
    }
}

/// String or number (HSN codes come back as either), null as `None`
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
