use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

pub type RoomId = i64;
pub type MessageId = i64;

/// Name of the room created when the server has none.
pub const DEFAULT_ROOM_NAME: &str = "Daily Diary";
pub const DEFAULT_ROOM_THEME: &str = "default";
/// Every entry written from this client is attributed to the same sender.
pub const DEFAULT_SENDER: &str = "me";

/// A journal: a named container of messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub theme: Option<String>,
}

/// A single journal entry as stored by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    #[serde(deserialize_with = "null_as_empty")]
    pub sender: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<RoomId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

/// The server stores whatever it is sent, so text fields may come back null.
/// They are read as empty text; the field itself must still be present.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request body for `POST /rooms`.
#[derive(Debug, Clone, Serialize)]
pub struct NewRoom {
    pub name: String,
    pub theme: String,
}

impl Default for NewRoom {
    fn default() -> Self {
        Self {
            name: DEFAULT_ROOM_NAME.to_string(),
            theme: DEFAULT_ROOM_THEME.to_string(),
        }
    }
}

/// Request body for `POST /rooms/{id}/messages`.
#[derive(Debug, Clone, Serialize)]
pub struct NewMessage {
    pub sender: String,
    pub content: String,
}

impl NewMessage {
    pub fn from_me(content: impl Into<String>) -> Self {
        Self {
            sender: DEFAULT_SENDER.to_string(),
            content: content.into(),
        }
    }
}
