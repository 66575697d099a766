//! # Transcript
//!
//! Append-only log of the conversation. Insertion order is display order,
//! oldest first. Records are never edited or removed for the lifetime of the
//! session.
//!
//! Every append arms a scroll-to-latest signal that only becomes due after
//! [`SCROLL_SETTLE_DELAY`], so the presentation layer can finish laying out
//! the new record before jumping to it.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

/// Delay between an append and the scroll-to-latest signal becoming due.
pub const SCROLL_SETTLE_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

impl Role {
    /// Label shown on the message border.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "you",
            Role::Bot => "unibot",
        }
    }
}

/// One entry in the transcript. Fields are read-only once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    role: Role,
    content: String,
    timestamp: String,
}

impl MessageRecord {
    /// Create a record stamped with the current local time.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self::at(role, content, Local::now())
    }

    /// Create a record stamped with the given time.
    pub fn at(role: Role, content: impl Into<String>, time: DateTime<Local>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: display_time(&time),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Raw text for user records, formatted markup for bot records.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// `hh:mm AM/PM` on a 12-hour clock, hour zero-padded.
pub fn display_time(time: &DateTime<Local>) -> String {
    time.format("%I:%M %p").to_string()
}

#[derive(Debug, Default)]
pub struct Transcript {
    records: Vec<MessageRecord>,
    scroll_due: Option<Instant>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: MessageRecord) {
        self.append_at(record, Instant::now());
    }

    fn append_at(&mut self, record: MessageRecord, now: Instant) {
        self.records.push(record);
        // A newer append pushes the deadline out again.
        self.scroll_due = Some(now + SCROLL_SETTLE_DELAY);
    }

    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&MessageRecord> {
        self.records.last()
    }

    /// True while a scroll signal is armed but not yet consumed.
    pub fn scroll_pending(&self) -> bool {
        self.scroll_due.is_some()
    }

    /// Consume the scroll signal if its deadline has passed.
    pub fn take_due_scroll(&mut self, now: Instant) -> bool {
        match self.scroll_due {
            Some(due) if now >= due => {
                self.scroll_due = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local(hour: u32, minute: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 1, 15, hour, minute, 0)
            .single()
            .unwrap()
    }

    #[test]
    fn display_time_uses_twelve_hour_clock() {
        assert_eq!(display_time(&local(15, 7)), "03:07 PM");
        assert_eq!(display_time(&local(9, 30)), "09:30 AM");
        assert_eq!(display_time(&local(0, 5)), "12:05 AM");
        assert_eq!(display_time(&local(12, 0)), "12:00 PM");
    }

    #[test]
    fn record_keeps_role_content_and_time() {
        let record = MessageRecord::at(Role::Bot, "<strong>Hi</strong>", local(14, 45));
        assert_eq!(record.role(), Role::Bot);
        assert_eq!(record.content(), "<strong>Hi</strong>");
        assert_eq!(record.timestamp(), "02:45 PM");
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut transcript = Transcript::new();
        transcript.append(MessageRecord::new(Role::User, "first"));
        transcript.append(MessageRecord::new(Role::Bot, "second"));
        transcript.append(MessageRecord::new(Role::User, "third"));

        let contents: Vec<&str> = transcript.records().iter().map(|r| r.content()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.last().map(|r| r.role()), Some(Role::User));
    }

    #[test]
    fn new_transcript_is_empty_with_no_scroll() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert!(!transcript.scroll_pending());
        assert!(!transcript.take_due_scroll(Instant::now()));
    }

    #[test]
    fn scroll_signal_waits_for_settle_delay() {
        let mut transcript = Transcript::new();
        let t0 = Instant::now();
        transcript.append_at(MessageRecord::new(Role::User, "hello"), t0);

        assert!(transcript.scroll_pending());
        assert!(!transcript.take_due_scroll(t0));
        assert!(!transcript.take_due_scroll(t0 + SCROLL_SETTLE_DELAY / 2));
        assert!(transcript.take_due_scroll(t0 + SCROLL_SETTLE_DELAY));
        // Consumed exactly once
        assert!(!transcript.take_due_scroll(t0 + SCROLL_SETTLE_DELAY * 2));
        assert!(!transcript.scroll_pending());
    }

    #[test]
    fn later_append_debounces_scroll_signal() {
        let mut transcript = Transcript::new();
        let t0 = Instant::now();
        transcript.append_at(MessageRecord::new(Role::User, "a"), t0);
        let t1 = t0 + Duration::from_millis(60);
        transcript.append_at(MessageRecord::new(Role::Bot, "b"), t1);

        assert!(!transcript.take_due_scroll(t0 + SCROLL_SETTLE_DELAY));
        assert!(transcript.take_due_scroll(t1 + SCROLL_SETTLE_DELAY));
    }
}
