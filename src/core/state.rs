//! # Conversation State
//!
//! Everything the conversation controller owns, in one place:
//!
//! ```text
//! Controller
//! ├── input: InputState        // raw text + derived "can submit" flag
//! ├── phase: Phase             // Idle | AwaitingResponse
//! └── transcript: Transcript   // append-only message log
//! ```
//!
//! State changes only happen through `update(controller, action)` in
//! action.rs. Readers get accessors; nothing outside `core` mutates fields.

use std::time::Instant;

use crate::core::transcript::Transcript;

/// Text currently in the input box.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputState {
    raw_text: String,
    is_submittable: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the text and recompute submittability.
    pub(crate) fn set(&mut self, text: String) {
        self.is_submittable = !text.trim().is_empty();
        self.raw_text = text;
    }

    pub(crate) fn clear(&mut self) {
        self.set(String::new());
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// True iff the trimmed text is non-empty.
    pub fn is_submittable(&self) -> bool {
        self.is_submittable
    }
}

/// Whether a request is in flight. At most one ever is.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingResponse,
}

/// The message lifecycle controller.
///
/// Constructed once by the adapter that drives it and owned by that adapter's
/// event loop. There is no global instance.
#[derive(Debug, Default)]
pub struct Controller {
    pub(crate) input: InputState,
    pub(crate) phase: Phase,
    pub(crate) transcript: Transcript,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// A request has been dispatched and not yet resolved.
    pub fn is_pending(&self) -> bool {
        self.phase == Phase::AwaitingResponse
    }

    /// The loading indicator is shown exactly while a request is pending.
    pub fn shows_loading(&self) -> bool {
        self.is_pending()
    }

    /// Whether the submit control should look enabled.
    pub fn submit_enabled(&self) -> bool {
        self.input.is_submittable() && !self.is_pending()
    }

    /// Whether the input accepts edits right now.
    pub fn input_enabled(&self) -> bool {
        !self.is_pending()
    }

    /// Forward of [`Transcript::take_due_scroll`] for the presentation layer.
    pub fn take_due_scroll(&mut self, now: Instant) -> bool {
        self.transcript.take_due_scroll(now)
    }

    pub fn scroll_pending(&self) -> bool {
        self.transcript.scroll_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controller_starts_idle_and_empty() {
        let controller = Controller::new();
        assert_eq!(controller.phase(), Phase::Idle);
        assert!(!controller.is_pending());
        assert!(!controller.shows_loading());
        assert!(controller.transcript().is_empty());
        assert!(!controller.submit_enabled());
        assert!(controller.input_enabled());
    }

    #[test]
    fn submittable_iff_trimmed_text_non_empty() {
        let mut input = InputState::new();
        for (text, expected) in [
            ("", false),
            (" ", false),
            ("\t\n  ", false),
            ("a", true),
            ("  hi  ", true),
            ("\nx\n", true),
        ] {
            input.set(text.to_string());
            assert_eq!(input.is_submittable(), expected, "input {:?}", text);
            assert_eq!(input.raw_text(), text);
        }
    }

    #[test]
    fn clear_resets_text_and_flag() {
        let mut input = InputState::new();
        input.set("hello".to_string());
        input.clear();
        assert_eq!(input.raw_text(), "");
        assert!(!input.is_submittable());
    }
}
