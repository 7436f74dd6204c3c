//! Pure projection of the message replica into a list view.
//!
//! Front ends only translate a [`ListView`] into their own widgets.

use crate::models::{Message, MessageId};

pub const EMPTY_STATE_TEXT: &str = "No entries yet. Write your first one below.";
pub const DELETE_CONTROL_TITLE: &str = "Delete entry";
pub const CONFIRM_DELETE_PROMPT: &str = "Delete this entry?";

const TIMESTAMP_FORMAT: &str = "%b %d, %H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    /// Target of the row's delete control.
    pub id: MessageId,
    pub content: String,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListView {
    pub rows: Vec<EntryRow>,
    pub empty_state: bool,
    /// Keep the newest entry visible after the list is redrawn.
    pub scroll_to_bottom: bool,
}

impl ListView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds the list view for `messages`, keeping their order.
pub fn render(messages: &[Message]) -> ListView {
    if messages.is_empty() {
        return ListView {
            rows: Vec::new(),
            empty_state: true,
            scroll_to_bottom: false,
        };
    }

    let rows = messages
        .iter()
        .map(|m| EntryRow {
            id: m.id,
            content: m.content.clone(),
            timestamp: m.created_at.map(|t| t.format(TIMESTAMP_FORMAT).to_string()),
        })
        .collect();

    ListView { rows, empty_state: false, scroll_to_bottom: true }
}

pub fn total_entries_label(count: usize) -> String {
    format!("{count} total entries")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn message(id: MessageId, content: &str) -> Message {
        Message {
            id,
            sender: "me".to_string(),
            content: content.to_string(),
            room_id: Some(1),
            created_at: None,
        }
    }

    #[test]
    fn empty_replica_shows_only_empty_state() {
        let view = render(&[]);
        assert!(view.empty_state);
        assert!(view.is_empty());
        assert!(!view.scroll_to_bottom);
    }

    #[test]
    fn rows_follow_replica_order() {
        let messages = vec![message(4, "morning"), message(2, "noon"), message(9, "night")];
        let view = render(&messages);

        assert!(!view.empty_state);
        assert_eq!(view.len(), messages.len());
        for (row, msg) in view.rows.iter().zip(&messages) {
            assert_eq!(row.id, msg.id);
            assert_eq!(row.content, msg.content);
        }
        assert!(view.scroll_to_bottom);
    }

    #[test]
    fn content_is_kept_verbatim() {
        let view = render(&[message(1, "  <b>not markup</b>  ")]);
        assert_eq!(view.rows[0].content, "  <b>not markup</b>  ");
    }

    #[test]
    fn entry_with_null_content_renders_empty() {
        let msg: Message =
            serde_json::from_str(r#"{"id": 5, "sender": "me", "content": null}"#).unwrap();
        let view = render(&[msg]);
        assert_eq!(view.rows[0].id, 5);
        assert_eq!(view.rows[0].content, "");
    }

    #[test]
    fn timestamp_is_formatted_when_present() {
        let mut msg = message(1, "dated");
        msg.created_at = NaiveDate::from_ymd_opt(2025, 3, 14)
            .and_then(|d| d.and_hms_opt(8, 5, 0));

        let view = render(&[msg, message(2, "undated")]);
        assert_eq!(view.rows[0].timestamp.as_deref(), Some("Mar 14, 08:05"));
        assert_eq!(view.rows[1].timestamp, None);
    }

    #[test]
    fn label_counts_entries() {
        assert_eq!(total_entries_label(0), "0 total entries");
        assert_eq!(total_entries_label(12), "12 total entries");
    }
}
