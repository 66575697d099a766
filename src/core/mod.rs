//! # Core Application Logic
//!
//! The message lifecycle: what happens between the user pressing Enter and
//! the answer landing in the transcript. It knows nothing about terminals.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Controller (state)   │
//!                    │  • Action / Effect      │
//!                    │  • update() (reducer)   │
//!                    │  • Transcript, format   │
//!                    └───────────┬─────────────┘
//!                                │ Effect::Dispatch
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │ ◀── Action::Response ─── │  Gateway   │
//!     │  Adapter   │                          │  (HTTP)    │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `Controller` and its input/phase state
//! - [`action`]: `Action`, `Effect`, and the `update()` reducer
//! - [`transcript`]: Append-only message log
//! - [`formatter`]: Answer text → transcript markup
//! - [`config`]: Layered settings

pub mod action;
pub mod config;
pub mod formatter;
pub mod state;
pub mod transcript;
