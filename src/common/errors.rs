use thiserror::Error;

/// The only way a submission can fail.
///
/// Transport errors, non-success statuses and unexpected bodies all collapse
/// into this one kind. The message is kept for diagnostics and never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("submission failed: {0}")]
pub struct SubmissionFailed(String);

impl SubmissionFailed {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    pub fn reason(&self) -> &str {
        &self.0
    }
}

/// A table language string outside of `ENG` / `RUS`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported table language '{0}' (expected ENG or RUS)")]
pub struct InvalidLanguage(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_failed_keeps_reason_for_logs() {
        let err = SubmissionFailed::new("service returned 502 Bad Gateway");
        assert_eq!(err.reason(), "service returned 502 Bad Gateway");
        assert_eq!(
            err.to_string(),
            "submission failed: service returned 502 Bad Gateway"
        );
    }

    #[test]
    fn invalid_language_names_offending_value() {
        let err = InvalidLanguage("FRA".into());
        assert!(err.to_string().contains("'FRA'"));
    }
}
