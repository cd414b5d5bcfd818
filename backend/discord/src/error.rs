use pinforge_core::RelayError;

/// Reduce a serenity error to the relay's error kinds.
///
/// HTTP 403 is a permission problem, 404 a missing entity, any other HTTP
/// failure (rate limits, 5xx, connection errors) is transport.
pub fn map_error(err: serenity::Error) -> RelayError {
    match &err {
        serenity::Error::Http(http_err) => match http_err.status_code().map(|s| s.as_u16()) {
            Some(403) => RelayError::Permission(err.to_string()),
            Some(404) => RelayError::NotFound(err.to_string()),
            _ => RelayError::Transport(err.to_string()),
        },
        _ => RelayError::Unexpected(err.to_string()),
    }
}
