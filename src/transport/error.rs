use serde_json::Value;

/// What could be recovered from a non-2xx response body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorEnvelope {
    pub code: Option<u16>,
    pub message: Option<String>,
    pub status: Option<String>,
    /// Parsed body (JSON, or the raw text as a JSON string).
    pub details: Option<Value>,
}

/// Probe a failure body for the shapes the Sinch endpoints produce.
///
/// In order: `{"error": {"code", "message", "status"}}` (Conversation API),
/// `{"error": "...", "error_description": "..."}` (OAuth2 endpoint), a top-level
/// `{"message": "..."}`, then the raw text.
pub fn decode_error_body(body: &str) -> ErrorEnvelope {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return ErrorEnvelope::default();
    }

    let json = match serde_json::from_str::<Value>(trimmed) {
        Ok(json) => json,
        Err(_) => {
            return ErrorEnvelope {
                message: Some(trimmed.to_owned()),
                details: Some(Value::String(trimmed.to_owned())),
                ..ErrorEnvelope::default()
            };
        }
    };

    let mut envelope = ErrorEnvelope::default();
    match json.get("error") {
        Some(Value::Object(error)) => {
            envelope.code = error.get("code").and_then(code_from_value);
            envelope.message = error.get("message").and_then(non_empty_str);
            envelope.status = error.get("status").and_then(non_empty_str);
        }
        Some(Value::String(error)) if !error.trim().is_empty() => {
            envelope.message = json
                .get("error_description")
                .and_then(non_empty_str)
                .or_else(|| Some(error.clone()));
        }
        _ => {}
    }
    if envelope.message.is_none() {
        envelope.message = json.get("message").and_then(non_empty_str);
    }
    envelope.details = Some(json);
    envelope
}

fn code_from_value(value: &Value) -> Option<u16> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|code| u16::try_from(code).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}
