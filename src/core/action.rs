//! # Actions
//!
//! Everything that can happen to the conversation becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! The service answers (or fails)? That's `Action::ResponseReceived(result)`.
//!
//! `update()` applies an action to the controller and returns the `Effect`
//! the driver must carry out. No I/O happens here; the one asynchronous call
//! is made by whoever receives `Effect::Dispatch`, usually via [`dispatch`].
//!
//! ```text
//!             Submit (text ok)                  ResponseReceived
//!   Idle  ──────────────────────▶  Awaiting  ──────────────────────▶  Idle
//!    ▲  append user record             │       append bot record
//!    │  Effect::Dispatch               │       Effect::FocusInput
//!    └── Submit while Awaiting: no-op ─┘
//! ```

use std::time::Instant;

use log::{debug, info, warn};

use crate::core::formatter;
use crate::core::state::{Controller, Phase};
use crate::core::transcript::{MessageRecord, Role};
use crate::gateway::{GatewayError, RemoteAnswer, RequestGateway};

/// Shown in place of an answer whenever the request fails, whatever the cause.
pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

#[derive(Debug)]
pub enum Action {
    /// The input text changed (every keystroke, paste, or deletion).
    InputChanged(String),
    /// Explicit submit, or Enter without a modifier.
    Submit,
    /// The in-flight request resolved.
    ResponseReceived(Result<RemoteAnswer, GatewayError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Send this message through the gateway and feed the result back.
    Dispatch(String),
    /// Give keyboard focus back to the input.
    FocusInput,
}

pub fn update(controller: &mut Controller, action: Action) -> Effect {
    match action {
        Action::InputChanged(text) => {
            if controller.is_pending() {
                debug!("Input change ignored: awaiting response");
                return Effect::None;
            }
            controller.input.set(text);
            Effect::None
        }
        Action::Submit => {
            if controller.is_pending() {
                debug!("Submit ignored: a request is already in flight");
                return Effect::None;
            }
            if !controller.input.is_submittable() {
                return Effect::None;
            }

            let message = controller.input.raw_text().trim().to_string();
            controller
                .transcript
                .append(MessageRecord::new(Role::User, message.clone()));
            controller.input.clear();
            controller.phase = Phase::AwaitingResponse;

            info!("Submitted message ({} bytes), awaiting response", message.len());
            Effect::Dispatch(message)
        }
        Action::ResponseReceived(result) => {
            if !controller.is_pending() {
                warn!("Dropping response that arrived while idle");
                return Effect::None;
            }
            controller.phase = Phase::Idle;

            let content = match result {
                Ok(answer) => {
                    debug!("Answer received ({} bytes)", answer.answer.len());
                    formatter::format(&answer.answer)
                }
                Err(e) => {
                    warn!("Chat request failed [{}]: {}", e.kind(), e);
                    APOLOGY.to_string()
                }
            };
            controller
                .transcript
                .append(MessageRecord::new(Role::Bot, content));
            Effect::FocusInput
        }
    }
}

/// Run one gateway call and wrap its outcome as the action that resolves it.
pub async fn dispatch(gateway: &dyn RequestGateway, message: String) -> Action {
    let started = Instant::now();
    let result = gateway.send(&message).await;
    info!(
        "Gateway call finished in {}ms (ok={})",
        started.elapsed().as_millis(),
        result.is_ok()
    );
    Action::ResponseReceived(result)
}
