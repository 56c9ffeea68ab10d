use thiserror::Error;

/// Failure classes of the transport to the verification service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connection refused, DNS failure and similar
    Unreachable,
    /// The request did not complete in time
    Timeout,
    /// The service answered with a non-success status
    Rejected { status: u16 },
    /// The body could not be parsed as an analysis result
    Malformed,
}

/// Error raised while talking to the verification service
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("service returned status {status}")]
    Rejected { status: u16 },
    #[error("service unreachable: {0}")]
    Unreachable(String),
    #[error("service timed out: {0}")]
    Timeout(String),
    #[error("malformed service response: {0}")]
    Malformed(String),
}

impl TransportError {
    pub fn kind(&self) -> TransportErrorKind {
        match self {
            TransportError::Rejected { status } => TransportErrorKind::Rejected { status: *status },
            TransportError::Unreachable(_) => TransportErrorKind::Unreachable,
            TransportError::Timeout(_) => TransportErrorKind::Timeout,
            TransportError::Malformed(_) => TransportErrorKind::Malformed,
        }
    }

    /// Whether the service could not be reached at all, as opposed to rejecting the request
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self.kind(),
            TransportErrorKind::Unreachable | TransportErrorKind::Timeout
        )
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(e.to_string())
        } else if e.is_connect() {
            TransportError::Unreachable(e.to_string())
        } else if e.is_decode() {
            TransportError::Malformed(e.to_string())
        } else if let Some(status) = e.status() {
            TransportError::Rejected {
                status: status.as_u16(),
            }
        } else {
            TransportError::Unreachable(e.to_string())
        }
    }
}

/// Errors surfaced by the verifier core
#[derive(Debug, Clone, Error)]
pub enum VerifierError {
    #[error("no active page")]
    NoActivePage,
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("protocol failure: {0}")]
    Protocol(String),
    #[error("unknown action: {0}")]
    UnknownAction(String),
    /// Failure reported by another agent, as it was worded there
    #[error("{0}")]
    Remote(String),
    #[error("analysis already in progress")]
    Busy,
    #[error("extraction failed: {0}")]
    Extraction(String),
    #[error("browser unavailable: {0}")]
    Browser(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl VerifierError {
    pub(crate) fn channel_closed() -> Self {
        VerifierError::Protocol("response channel closed before a reply was produced".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_message_carries_status() {
        let err = VerifierError::from(TransportError::Rejected { status: 500 });
        assert_eq!(err.to_string(), "service returned status 500");
    }

    #[test]
    fn unreachable_is_distinguished_from_rejected() {
        assert!(TransportError::Unreachable("connection refused".into()).is_unreachable());
        assert!(TransportError::Timeout("60s".into()).is_unreachable());
        assert!(!TransportError::Rejected { status: 403 }.is_unreachable());
        assert!(!TransportError::Malformed("eof".into()).is_unreachable());
    }

    #[test]
    fn browser_failure_keeps_its_cause() {
        let err = VerifierError::Browser("connection refused".into());
        assert_eq!(err.to_string(), "browser unavailable: connection refused");
    }

    #[test]
    fn no_active_page_wording() {
        assert_eq!(VerifierError::NoActivePage.to_string(), "no active page");
    }
}
