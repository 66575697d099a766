//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::state::Controller;
use crate::gateway::{GatewayError, RemoteAnswer, RequestGateway};

/// A gateway that returns a canned result and records every message sent.
pub struct StubGateway {
    reply: Result<RemoteAnswer, GatewayError>,
    calls: Mutex<Vec<String>>,
}

impl StubGateway {
    pub fn answering(answer: &str) -> Self {
        Self {
            reply: Ok(RemoteAnswer {
                answer: answer.to_string(),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: GatewayError) -> Self {
        Self {
            reply: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RequestGateway for StubGateway {
    async fn send(&self, message: &str) -> Result<RemoteAnswer, GatewayError> {
        self.calls.lock().unwrap().push(message.to_string());
        self.reply.clone()
    }
}

/// Creates a fresh, idle controller.
pub fn test_controller() -> Controller {
    Controller::new()
}
