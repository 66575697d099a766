//! Wire types for the answer service.

use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Successful `POST /chat` response. The service also echoes the question
/// back; only `answer` is read.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RemoteAnswer {
    pub answer: String,
}

/// Body the service sends alongside a 5xx.
#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

/// `GET /health` response.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}
