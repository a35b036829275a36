use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    InsufficientVocabulary { required: usize, available: usize },
    IndexOutOfRange { index: usize, limit: usize },
    DownstreamUnavailable { service: &'static str, reason: String },
    MalformedInbound { reason: String },
    Config { key: &'static str, reason: String },
}

impl QuizError {
    pub(crate) fn downstream(service: &'static str, reason: impl fmt::Display) -> Self {
        QuizError::DownstreamUnavailable {
            service,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn config(key: &'static str, reason: impl fmt::Display) -> Self {
        QuizError::Config {
            key,
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::InsufficientVocabulary {
                required,
                available,
            } => write!(
                f,
                "insufficient vocabulary: need at least {} tags, got {}",
                required, available
            ),
            QuizError::IndexOutOfRange { index, limit } => {
                write!(f, "index {} is outside of 0..{}", index, limit)
            }
            QuizError::DownstreamUnavailable { service, reason } => {
                write!(f, "{} unavailable: {}", service, reason)
            }
            QuizError::MalformedInbound { reason } => {
                write!(f, "malformed inbound event: {}", reason)
            }
            QuizError::Config { key, reason } => write!(f, "bad {}: {}", key, reason),
        }
    }
}

impl std::error::Error for QuizError {}
