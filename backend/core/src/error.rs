use thiserror::Error;

/// Failure categories every platform call is reduced to.
///
/// Relay steps match on [`ErrorKind`] to decide between aborting and
/// tolerating a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("missing permission: {0}")]
    Permission(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("platform transport error: {0}")]
    Transport(String),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Fieldless mirror of [`RelayError`] for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Permission,
    NotFound,
    Transport,
    Unexpected,
}

impl RelayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelayError::Permission(_) => ErrorKind::Permission,
            RelayError::NotFound(_) => ErrorKind::NotFound,
            RelayError::Transport(_) => ErrorKind::Transport,
            RelayError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

pub type RelayResult<T> = Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(RelayError::Permission("x".into()).kind(), ErrorKind::Permission);
        assert_eq!(RelayError::Transport("x".into()).kind(), ErrorKind::Transport);
        assert!(RelayError::NotFound("message 1".into()).is_not_found());
        assert!(!RelayError::Unexpected("boom".into()).is_not_found());
    }

    #[test]
    fn display_includes_detail() {
        let err = RelayError::NotFound("message 42".into());
        assert_eq!(err.to_string(), "not found: message 42");
    }
}
