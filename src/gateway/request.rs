use std::fmt;

use async_trait::async_trait;

use super::types::RemoteAnswer;

/// Errors that can occur while asking the answer service.
/// The controller shows the same apology for all of them; the variant and
/// detail only go to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Network-level failure (connection refused, DNS, timeout, broken body).
    Transport(String),
    /// The service answered with a non-2xx status.
    HttpStatus { status: u16, detail: String },
    /// A 2xx response whose body isn't the expected JSON.
    Parse(String),
}

impl GatewayError {
    /// Short machine-friendly label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Transport(_) => "transport",
            GatewayError::HttpStatus { .. } => "http_status",
            GatewayError::Parse(_) => "parse",
        }
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Transport(msg) => write!(f, "transport error: {msg}"),
            GatewayError::HttpStatus { status, detail } if detail.is_empty() => {
                write!(f, "HTTP error (status {status})")
            }
            GatewayError::HttpStatus { status, detail } => {
                write!(f, "HTTP error (status {status}): {detail}")
            }
            GatewayError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for GatewayError {}

/// The single outbound call the conversation depends on.
///
/// One call per invocation. Implementations hold no queue; the controller
/// guarantees at most one call is in flight.
#[async_trait]
pub trait RequestGateway: Send + Sync {
    /// Sends the user's message and returns the service's answer.
    async fn send(&self, message: &str) -> Result<RemoteAnswer, GatewayError>;
}
