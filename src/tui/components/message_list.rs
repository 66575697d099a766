//! # MessageList Component
//!
//! The transcript, drawn as a vertical stack of [`Message`] blocks inside a
//! `tui-scrollview` canvas.
//!
//! While `pinned`, every frame lands on the newest record. Scrolling up
//! unpins; scrolling back to the end (or Ctrl+End) pins again.
//!
//! Transcript records are immutable and append-only, so a measured height is
//! good until the content width changes. [`LayoutCache`] measures each record
//! once and keeps running bottoms for fast viewport lookup.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::MessageRecord;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

/// Scroll position and measurements that outlive a single frame.
/// Owned by `TuiState`; [`MessageList`] borrows it while drawing.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// Follow the newest record on every frame
    pub pinned: bool,
    /// Rows available in the last frame
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            pinned: true,
            viewport_height: 0,
        }
    }

    /// Jump to the newest record and stay there.
    pub fn snap_to_latest(&mut self) {
        self.pinned = true;
        self.scroll_state.scroll_to_bottom();
    }

    /// Largest offset that still fills the viewport.
    fn bottom_offset(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    fn set_row(&mut self, y: u16) {
        let x = self.scroll_state.offset().x;
        self.scroll_state.set_offset(Position { x, y });
    }

    /// Pull an offset left over from a taller canvas back into range.
    pub fn clamp_offset(&mut self) {
        let bottom = self.bottom_offset();
        if self.scroll_state.offset().y > bottom {
            self.set_row(bottom);
        }
    }

    /// Pin again once a downward scroll reaches the end.
    pub fn repin_at_bottom(&mut self) {
        let bottom = self.bottom_offset();
        if self.scroll_state.offset().y >= bottom {
            self.pinned = true;
            self.set_row(bottom);
        }
    }

    /// Drives the title bar's "↓ New" marker.
    pub fn has_unseen_content(&self) -> bool {
        !self.pinned && self.scroll_state.offset().y < self.bottom_offset()
    }
}

/// Per-frame view over the transcript records.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub records: &'a [MessageRecord],
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, records: &'a [MessageRecord]) -> Self {
        Self { state, records }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // Rightmost column belongs to the scrollbar
        let content_width = area.width.saturating_sub(1);

        self.state.layout.update(self.records, content_width);
        self.state.viewport_height = area.height;

        let top_row = if self.state.pinned {
            self.state.bottom_offset()
        } else {
            self.state.clamp_offset();
            self.state.scroll_state.offset().y
        };
        let visible = self.state.layout.visible_range(top_row, area.height);

        let canvas = Size::new(content_width, self.state.layout.total_height());
        let mut scroll_view = ScrollView::new(canvas)
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        // Off-screen records are skipped; the canvas still has their rows
        for i in visible {
            let rect = Rect::new(
                0,
                self.state.layout.top_of(i),
                content_width,
                self.state.layout.heights[i],
            );
            scroll_view.render_widget(Message::new(&self.records[i]), rect);
        }

        if self.state.pinned {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Scroll keys act on the persistent state, not the per-frame view.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.pinned = false;
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.pinned = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_at_bottom();
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_at_bottom();
            }
            TuiEvent::ScrollToBottom => self.snap_to_latest(),
            _ => {}
        }
        None
    }
}

/// Heights of every record at one content width.
///
/// The scroll canvas is addressed in `u16` rows. When the transcript grows
/// past that, the oldest records drop off the top of the canvas (`first`
/// moves forward) so the newest ones always have room.
#[derive(Debug, Default)]
pub struct LayoutCache {
    pub heights: Vec<u16>,
    /// `prefix_heights[i]` is the absolute bottom row of record i.
    pub prefix_heights: Vec<u32>,
    first: usize,
    content_width: u16,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure records appended since the last call. A width change (or a
    /// shorter slice) starts over.
    pub fn update(&mut self, records: &[MessageRecord], content_width: u16) {
        if content_width != self.content_width || records.len() < self.heights.len() {
            self.heights.clear();
            self.prefix_heights.clear();
            self.first = 0;
            self.content_width = content_width;
        }

        for record in &records[self.heights.len()..] {
            let height = Message::calculate_height(record, content_width);
            let bottom = self.absolute_bottom().saturating_add(u32::from(height));
            self.heights.push(height);
            self.prefix_heights.push(bottom);
        }

        // A single record is at most u16::MAX rows, so this stops at the last one
        while self.absolute_bottom() - self.absolute_top(self.first) > u32::from(u16::MAX) {
            self.first += 1;
        }
    }

    /// Index of the oldest record still on the canvas.
    pub fn first(&self) -> usize {
        self.first
    }

    fn absolute_top(&self, index: usize) -> u32 {
        match index {
            0 => 0,
            i => self.prefix_heights.get(i - 1).copied().unwrap_or(0),
        }
    }

    fn absolute_bottom(&self) -> u32 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    fn to_canvas(&self, absolute: u32) -> u16 {
        let row = absolute.saturating_sub(self.absolute_top(self.first));
        u16::try_from(row).unwrap_or(u16::MAX)
    }

    /// Canvas height in rows.
    pub fn total_height(&self) -> u16 {
        self.to_canvas(self.absolute_bottom())
    }

    /// Canvas row where record `index` starts.
    pub fn top_of(&self, index: usize) -> u16 {
        self.to_canvas(self.absolute_top(index))
    }

    /// Records on the canvas that overlap the viewport, with half a viewport
    /// of slack above and below.
    pub fn visible_range(&self, top_row: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let base = self.absolute_top(self.first);
        let slack = u32::from(viewport_height / 2);
        let from = (base + u32::from(top_row)).saturating_sub(slack);
        let to = base + u32::from(top_row) + u32::from(viewport_height) + slack;

        let start = self
            .prefix_heights
            .partition_point(|&bottom| bottom <= from)
            .max(self.first);
        let end = (self.prefix_heights.partition_point(|&bottom| bottom < to) + 1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::Role;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn records(n: usize) -> Vec<MessageRecord> {
        (0..n)
            .map(|i| MessageRecord::new(Role::User, format!("message {i}")))
            .collect()
    }

    /// A bot record `lines` rows tall (plus borders).
    fn tall(lines: usize) -> MessageRecord {
        MessageRecord::new(Role::Bot, vec!["x"; lines].join("<br>"))
    }

    #[test]
    fn layout_cache_only_measures_new_records() {
        let mut cache = LayoutCache::new();
        let all = records(3);

        cache.update(&all[..2], 80);
        assert_eq!(cache.heights, vec![3, 3]);
        assert_eq!(cache.prefix_heights, vec![3, 6]);

        cache.update(&all, 80);
        assert_eq!(cache.heights.len(), 3);
        assert_eq!(cache.total_height(), 9);
        assert_eq!(cache.top_of(2), 6);
    }

    #[test]
    fn layout_cache_resets_on_width_change() {
        let mut cache = LayoutCache::new();
        let all = vec![MessageRecord::new(Role::User, "Hello world")];
        cache.update(&all, 80);
        assert_eq!(cache.total_height(), 3);

        // content width 5 → two wrapped lines
        cache.update(&all, 9);
        assert_eq!(cache.heights, vec![4]);
    }

    #[test]
    fn oldest_records_leave_the_canvas_when_it_overflows() {
        let mut cache = LayoutCache::new();
        let all = vec![tall(30_000), tall(30_000), tall(30_000)];
        cache.update(&all, 80);

        // 3 × 30_002 rows won't fit in u16; the first record drops off
        assert_eq!(cache.first(), 1);
        assert_eq!(cache.total_height(), 60_004);
        assert_eq!(cache.top_of(1), 0);
        assert_eq!(cache.top_of(2), 30_002);

        let bottom = cache.total_height() - 10;
        let range = cache.visible_range(bottom, 10);
        assert_eq!(range.end, 3);
        assert!(range.start >= 1);
    }

    #[test]
    fn newest_record_keeps_its_rows_after_a_huge_answer() {
        let mut cache = LayoutCache::new();
        let all = vec![tall(65_534), MessageRecord::new(Role::User, "after")];
        cache.update(&all, 80);

        assert_eq!(cache.heights, vec![u16::MAX, 3]);
        assert_eq!(cache.first(), 1);
        assert_eq!(cache.total_height(), 3);
        assert_eq!(cache.visible_range(0, 3), 1..2);
    }

    #[test]
    fn visible_range_covers_viewport() {
        let mut cache = LayoutCache::new();
        cache.update(&records(10), 80); // 10 records × 3 rows

        let range = cache.visible_range(0, 6);
        assert_eq!(range.start, 0);
        assert!(range.end >= 2);

        let range = cache.visible_range(27, 3);
        assert_eq!(range.end, 10);
        assert!(range.start <= 9);
    }

    #[test]
    fn visible_range_empty_cache() {
        let cache = LayoutCache::new();
        assert_eq!(cache.visible_range(0, 10), 0..0);
    }

    #[test]
    fn scroll_up_unpins_and_end_repins() {
        let mut state = MessageListState::new();
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.pinned);

        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(state.pinned);
    }

    #[test]
    fn render_shows_latest_record_when_pinned() {
        let backend = TestBackend::new(40, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = MessageListState::new();
        let all = records(5);

        terminal
            .draw(|f| {
                let area = f.area();
                MessageList::new(&mut state, &all).render(f, area);
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("message 4"));
        assert!(!text.contains("message 0"));
        assert!(!state.has_unseen_content());
    }
}
