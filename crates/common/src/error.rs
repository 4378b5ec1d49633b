use thiserror::Error;

/// Every failure the relay can encounter, one variant per failure class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    CredentialsMissing(Vec<String>),

    #[error("Invalid configuration value for {var}: {reason}")]
    InvalidConfig { var: &'static str, reason: String },

    #[error("Review endpoint unreachable: {0}")]
    Endpoint(String),

    #[error("Review API returned status code {0}")]
    UpstreamStatus(u16),

    #[error("Review API response is not valid JSON: {0}")]
    MalformedResponse(String),

    #[error("Field \"{0}\" is missing from the API response")]
    MissingField(&'static str),

    #[error("Field \"{field}\" must be a list, got {found}")]
    WrongShape { field: &'static str, found: &'static str },

    #[error("Homework record has no \"{0}\" key")]
    MissingKey(&'static str),

    #[error("API returned an undocumented homework status: {0}")]
    UnknownStatus(String),

    #[error("Failed to deliver message: {0}")]
    Delivery(String),
}

/// What the poll loop does after a failed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Report the failure, sleep, and poll again.
    Continue,
    /// Stop the process.
    Terminate,
}

impl RelayError {
    pub fn disposition(&self) -> Disposition {
        match self {
            RelayError::CredentialsMissing(_) | RelayError::InvalidConfig { .. } => {
                Disposition::Terminate
            }
            RelayError::Endpoint(_)
            | RelayError::UpstreamStatus(_)
            | RelayError::MalformedResponse(_)
            | RelayError::MissingField(_)
            | RelayError::WrongShape { .. }
            | RelayError::MissingKey(_)
            | RelayError::UnknownStatus(_)
            | RelayError::Delivery(_) => Disposition::Continue,
        }
    }
}
