use thiserror::Error;

/// Why the advice service produced no text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdviceError {
    /// Missing credential or unusable client settings. Nothing was sent.
    #[error("advice service is not configured: {0}")]
    Configuration(String),
    /// The request never got a response.
    #[error("{}", describe_network(.timed_out, .message))]
    Network { timed_out: bool, message: String },
    /// The service answered, but with an error or without usable text.
    #[error("{}", describe_service(.status, .message))]
    Service { status: Option<u16>, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Network,
    Service,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Network => "network",
            ErrorKind::Service => "service",
        }
    }
}

impl AdviceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdviceError::Configuration(_) => ErrorKind::Configuration,
            AdviceError::Network { .. } => ErrorKind::Network,
            AdviceError::Service { .. } => ErrorKind::Service,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, AdviceError::Network { timed_out: true, .. })
    }

    pub(crate) fn service(status: Option<u16>, message: impl Into<String>) -> Self {
        AdviceError::Service {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for AdviceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return AdviceError::Configuration(err.to_string());
        }
        if err.is_decode() {
            let status = err.status().map(|status| status.as_u16());
            return AdviceError::service(status, err.to_string());
        }
        AdviceError::Network {
            timed_out: err.is_timeout(),
            message: err.to_string(),
        }
    }
}

fn describe_network(timed_out: &bool, message: &str) -> String {
    if *timed_out {
        format!("advice request timed out: {message}")
    } else {
        format!("advice service unreachable: {message}")
    }
}

fn describe_service(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("advice service error (status {status}): {message}"),
        None => format!("advice service error: {message}"),
    }
}
