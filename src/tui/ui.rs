use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::Controller;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{LandingPage, LoadingIndicator, MessageList, TitleBar};

/// Draw one frame: title bar, transcript (or landing page), loading line,
/// input box.
pub fn draw_ui(frame: &mut Frame, controller: &Controller, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let area = frame.area();
    let input_height = tui.input_box.calculate_height(area.width);
    let loading_height = u16::from(controller.shows_loading());
    let [title_area, main_area, loading_area, input_area] = Layout::vertical([
        Length(1),
        Min(0),
        Length(loading_height),
        Length(input_height),
    ])
    .areas(area);

    let records = controller.transcript().records();
    if records.is_empty() {
        LandingPage.render(frame, main_area);
    } else {
        MessageList::new(&mut tui.message_list, records).render(frame, main_area);
    }

    // After the list so the unseen marker reflects this frame's layout
    TitleBar::new(
        tui.server.as_str(),
        tui.status.as_str(),
        tui.message_list.has_unseen_content(),
    )
    .render(frame, title_area);

    if controller.shows_loading() {
        LoadingIndicator::new(spinner_frame).render(frame, loading_area);
    }

    tui.input_box.render(frame, input_area);
}
