use thiserror::Error;

/// Ошибка инициализации подсистемы логирования.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoggingError {
    #[error("invalid log filter directive '{directive}': {reason}")]
    InvalidDirective { directive: String, reason: String },

    #[error("global tracing subscriber is already set: {0}")]
    AlreadyInitialized(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_error_display() {
        let err = LoggingError::InvalidDirective {
            directive: "pusu=loud".into(),
            reason: "bad level".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid log filter directive 'pusu=loud': bad level"
        );

        let err = LoggingError::AlreadyInitialized("set".into());
        assert!(err.to_string().contains("already set"));
    }
}
