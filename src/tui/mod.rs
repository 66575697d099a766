//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into `core::action::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (request in flight, or an auto-scroll waiting to settle):
//!   draws every ~80ms so the spinner moves and the scroll lands on time.
//! - **Idle**: sleeps up to 500ms and only redraws on events or resize.
//!
//! ## Request Flow
//!
//! `Effect::Dispatch` spawns [`dispatch`] on tokio. Its `Action` comes back
//! over an `mpsc` channel drained once per loop iteration, so the controller
//! is only ever touched from this thread.

mod component;
mod components;
mod event;
mod markup;
mod ui;

use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use log::{debug, info, warn};
use ratatui::DefaultTerminal;

use crate::core::action::{Action, Effect, dispatch, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::Controller;
use crate::gateway::RequestGateway;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// Where keystrokes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Typing edits the input box.
    Input,
    /// Browsing the transcript. Typing or Enter returns to Input.
    Transcript,
}

/// TUI-specific presentation state (not part of the conversation logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub focus: Focus,
    /// Server base URL shown in the title bar
    pub server: String,
    /// Startup health check outcome shown in the title bar
    pub status: String,
}

impl TuiState {
    pub fn new(server: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            focus: Focus::Input, // User expects to type immediately
            server: server.into(),
            status: status.into(),
        }
    }

    /// Copy controller-derived props onto the components.
    fn sync(&mut self, controller: &Controller) {
        self.input_box.sync(controller.input().raw_text());
        self.input_box.enabled = controller.input_enabled();
        self.input_box.submit_enabled = controller.submit_enabled();
        self.input_box.focused = self.focus == Focus::Input;
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter arrive as a distinct key.
        // Terminals without it ignore the request.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Run the chat screen until the user quits.
///
/// Must be called from within a multi-threaded tokio runtime: the loop
/// blocks this thread on terminal polling while requests run on workers.
pub fn run(
    config: &ResolvedConfig,
    gateway: Arc<dyn RequestGateway>,
    status: String,
) -> std::io::Result<()> {
    let mut terminal = ratatui::init();
    let result = {
        let _guard = TerminalModeGuard::new()
            .inspect_err(|e| warn!("Failed to enable terminal modes: {}", e))
            .ok();
        let mut tui = TuiState::new(config.base_url.as_str(), status);
        event_loop(&mut terminal, &mut tui, gateway)
    };
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    tui: &mut TuiState,
    gateway: Arc<dyn RequestGateway>,
) -> std::io::Result<()> {
    let mut controller = Controller::new();
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        tui.sync(&controller);

        let animating = controller.shows_loading() || controller.scroll_pending();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &controller, tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::ForceQuit => {
                    info!("Quit requested");
                    return Ok(());
                }
                TuiEvent::Resize => {}
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown
                | TuiEvent::ScrollToBottom => {
                    tui.message_list.handle_event(&event);
                }
                TuiEvent::Escape => tui.focus = Focus::Transcript,
                _ => {
                    if tui.focus == Focus::Transcript {
                        tui.focus = Focus::Input;
                        // Enter only returns focus; it must not also submit
                        if event == TuiEvent::Submit {
                            continue;
                        }
                    }
                    handle_input(&mut controller, tui, &event, &gateway, &tx);
                    // Keep later events in this batch consistent with the controller
                    tui.sync(&controller);
                }
            }
        }

        // Responses from background requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            apply(&mut controller, tui, action, &gateway, &tx);
        }

        if controller.take_due_scroll(Instant::now()) {
            tui.message_list.snap_to_latest();
            needs_redraw = true;
        }
    }
}

fn handle_input(
    controller: &mut Controller,
    tui: &mut TuiState,
    event: &TuiEvent,
    gateway: &Arc<dyn RequestGateway>,
    tx: &mpsc::Sender<Action>,
) {
    let action = match tui.input_box.handle_event(event) {
        Some(InputEvent::Changed(text)) => Action::InputChanged(text),
        Some(InputEvent::Submit) => Action::Submit,
        None => return,
    };
    apply(controller, tui, action, gateway, tx);
}

/// Feed an action to the controller and carry out the resulting effect.
fn apply(
    controller: &mut Controller,
    tui: &mut TuiState,
    action: Action,
    gateway: &Arc<dyn RequestGateway>,
    tx: &mpsc::Sender<Action>,
) {
    match update(controller, action) {
        Effect::None => {}
        Effect::Dispatch(message) => spawn_request(Arc::clone(gateway), message, tx.clone()),
        Effect::FocusInput => tui.focus = Focus::Input,
    }
}

fn spawn_request(gateway: Arc<dyn RequestGateway>, message: String, tx: mpsc::Sender<Action>) {
    debug!("Spawning chat request");
    tokio::spawn(async move {
        let action = dispatch(gateway.as_ref(), message).await;
        if tx.send(action).is_err() {
            warn!("Dropping chat response: event loop has exited");
        }
    });
}
