//! Classification of response bodies into [`ApiResult`]. The backend is not
//! consistent about wrapping responses in a `{success, data|error}` envelope,
//! so this is the single place that absorbs the different shapes.

use super::types::{ApiError, ApiResult, ErrorCode, VALIDATION_FAILED_MESSAGE};
use serde_json::Value;

/// Normalizes a parsed response body.
///
/// Shapes are checked in order:
///
/// 1. an explicit boolean `success` member (the envelope);
/// 2. any object without `error` or `errors` keys, taken whole as the payload;
/// 3. everything else, reported as `UNEXPECTED_RESPONSE`.
///
/// Step 2 will accept an error body that names neither key (for example a
/// bare `{"message": "..."}`) as a success payload. Callers that know the HTTP
/// status should reclassify such bodies themselves.
pub fn normalize(raw: Value) -> ApiResult {
    if let Some(success) = raw.get("success").and_then(Value::as_bool) {
        return envelope(success, raw);
    }

    if let Value::Object(map) = &raw {
        if !map.contains_key("error") && !map.contains_key("errors") {
            return Ok(raw);
        }
    }

    Err(ApiError::unexpected(raw))
}

fn envelope(success: bool, mut raw: Value) -> ApiResult {
    if success {
        return Ok(raw.get_mut("data").map(Value::take).unwrap_or(Value::Null));
    }

    match raw.get_mut("errors").map(Value::take) {
        Some(errors) if !errors.is_null() => {
            let message = raw
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(VALIDATION_FAILED_MESSAGE);
            Err(ApiError::new(message)
                .with_code(ErrorCode::Validation)
                .with_details(errors))
        }
        _ => Err(ApiError::from_backend(raw.get("error"))),
    }
}
