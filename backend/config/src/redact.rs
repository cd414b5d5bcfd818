//! Config redaction: safe-to-print snapshots with secrets masked.

use serde_json::Value;

/// Keys whose string values are secrets.
static SENSITIVE_KEYS: &[&str] = &["token", "botToken", "bot_token", "secret", "password"];

/// Redact a config JSON value, masking sensitive fields as `abcd***`.
pub fn redact(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    let v = match v {
                        Value::String(s) if is_sensitive_key(k) => Value::String(mask(s)),
                        other => redact(other),
                    };
                    (k.clone(), v)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact).collect()),
        other => other.clone(),
    }
}

fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn mask(secret: &str) -> String {
    if secret.chars().count() > 4 {
        format!("{}***", secret.chars().take(4).collect::<String>())
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn masks_token_keeps_rest() {
        let v = json!({"discord": {"token": "MTAxNjQ.secret"}, "commands": {"prefix": "!"}});
        let r = redact(&v);
        assert_eq!(r["discord"]["token"], "MTAx***");
        assert_eq!(r["commands"]["prefix"], "!");
    }

    #[test]
    fn short_secret_fully_masked() {
        let r = redact(&json!({"token": "abc"}));
        assert_eq!(r["token"], "***");
    }
}
