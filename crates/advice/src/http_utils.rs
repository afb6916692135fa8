use crate::error::AdviceError;

pub(crate) fn join_base_path(base: &str, path: &str) -> Result<String, AdviceError> {
    if base.trim().is_empty() {
        return Err(AdviceError::Configuration("base_url is empty".to_string()));
    }
    let normalized_base = base.trim().trim_end_matches('/');
    let normalized_path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    Ok(format!("{normalized_base}{normalized_path}"))
}

/// Error text from a provider body: `error.message` when the body is the usual
/// JSON error envelope, otherwise the first few hundred characters.
pub(crate) fn error_message_from_body(body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(|message| message.as_str())
                .map(str::to_string)
        });
    match from_json {
        Some(message) if !message.trim().is_empty() => message,
        _ => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "empty response body".to_string()
            } else {
                trimmed.chars().take(300).collect()
            }
        }
    }
}
