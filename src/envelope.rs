//! Response-envelope normalization.
//!
//! The backend wraps payloads in `{success, message, data, errors}`, but not
//! consistently: some endpoints emit PascalCase keys (`Success`, `Data`),
//! some omit the `success` flag entirely, and a few return an empty body on
//! success. Normalization smooths all of that into one shape so the call
//! path never branches on backend casing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized response envelope.
///
/// `data` keeps the raw JSON payload; typed extraction happens at the call
/// site where the expected shape is known.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<Value>,
    pub errors: Option<Vec<String>>,
}

impl Envelope {
    /// Parse a raw response body into a normalized envelope.
    ///
    /// A body that is not valid JSON (including an empty body) is treated as
    /// a successful-but-empty response rather than a failure: several backend
    /// endpoints legitimately return nothing on success, and crashing the
    /// call path on them would turn every check-out into an error dialog.
    pub fn normalize(raw: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(raw) {
            Ok(v) => v,
            Err(_) => {
                return Envelope {
                    success: true,
                    ..Envelope::default()
                }
            }
        };
        Self::from_value(value)
    }

    /// Normalize an already-parsed JSON value.
    ///
    /// Key precedence is lowercase-first (`success` over `Success`); an
    /// absent `success` flag means success, because some endpoints send bare
    /// payloads without the wrapper.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(ref map) = value else {
            // Bare non-object payload (array, scalar). Treat the whole value
            // as data.
            return Envelope {
                success: true,
                message: None,
                data: Some(value),
                errors: None,
            };
        };

        let success = field(map, "success", "Success")
            .and_then(Value::as_bool)
            .unwrap_or(true);
        let message = field(map, "message", "Message")
            .and_then(Value::as_str)
            .map(str::to_string);
        let errors = field(map, "errors", "Errors").and_then(|v| {
            let items = v.as_array()?;
            Some(
                items
                    .iter()
                    .filter_map(|e| e.as_str().map(str::to_string))
                    .collect::<Vec<_>>(),
            )
        });

        // An explicit `data` key wins even when null; a wrapper-less object
        // is itself the data.
        let has_wrapper = map.contains_key("success")
            || map.contains_key("Success")
            || map.contains_key("data")
            || map.contains_key("Data");
        let data = if has_wrapper {
            field(map, "data", "Data")
                .filter(|v| !v.is_null())
                .cloned()
        } else {
            Some(value.clone())
        };

        Envelope {
            success,
            message,
            data,
            errors,
        }
    }

    /// Consume the envelope, yielding its payload (`Null` when absent).
    pub fn into_data(self) -> Value {
        self.data.unwrap_or(Value::Null)
    }
}

fn field<'a>(
    map: &'a serde_json::Map<String, Value>,
    lower: &str,
    pascal: &str,
) -> Option<&'a Value> {
    map.get(lower).or_else(|| map.get(pascal))
}
