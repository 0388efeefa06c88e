use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::Value;

use shared_models::ApiError;

/// Turns a raw response into a payload or a structured error.
///
/// JSON bodies are decoded and, on success, stripped of a `dados`/`data`
/// envelope when one is present. Anything else is read as plain text. A
/// non-2xx status always becomes [`ApiError::Api`] here, whatever shape the
/// body had.
pub(crate) async fn process_response(response: reqwest::Response) -> Result<Value, ApiError> {
    let status = response.status();
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.contains("application/json"))
        .unwrap_or(false);

    let text = response.text().await?;

    if is_json {
        let body: Option<Value> = serde_json::from_str(&text).ok();

        if !status.is_success() {
            return Err(error_from_body(status, body.as_ref()));
        }

        return match body {
            Some(value) => Ok(unwrap_envelope(value)),
            None => Err(ApiError::Decode(format!(
                "invalid JSON in {} response",
                status.as_u16()
            ))),
        };
    }

    if !status.is_success() {
        let message = if text.trim().is_empty() {
            http_status_message(status)
        } else {
            text
        };
        return Err(ApiError::api(message, status.as_u16()));
    }

    Ok(Value::String(text))
}

/// The one place that knows the server's error shapes.
///
/// The upstream API is not consistent about field names, so the message is
/// sniffed in the order `mensagem`, `message`, `error`, the code as `codigo`
/// then `code`, and the details as `detalhes` then `details`. A body that is
/// missing, unparseable, or oddly shaped falls back to the plain HTTP status
/// line and never raises a second error.
pub(crate) fn error_from_body(status: StatusCode, body: Option<&Value>) -> ApiError {
    let message = body
        .and_then(|body| first_string(body, &["mensagem", "message", "error"]))
        .unwrap_or_else(|| http_status_message(status));

    let code = body.and_then(|body| first_string(body, &["codigo", "code"]));

    let details = body.and_then(|body| {
        ["detalhes", "details"].iter().find_map(|field| {
            body.get(field)?.as_array().map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect::<Vec<_>>()
            })
        })
    });

    ApiError::Api {
        message,
        code,
        details,
        status: Some(status.as_u16()),
    }
}

fn first_string(body: &Value, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| {
        body.get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

fn http_status_message(status: StatusCode) -> String {
    format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown Status")
    )
}

/// Some endpoints wrap their payload in `{"dados": ...}` (or `{"data": ...}`)
/// and some return it bare; callers always get the inner value.
pub(crate) fn unwrap_envelope(value: Value) -> Value {
    if let Value::Object(ref map) = value {
        for field in ["dados", "data"] {
            if let Some(inner) = map.get(field) {
                if !inner.is_null() {
                    return inner.clone();
                }
            }
        }
    }
    value
}
