//! In-memory stand-in for the diary service, used by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use super::{ApiRequest, ApiResponse, HttpBackend, Method};
use crate::models::{Message, MessageId, Room, RoomId};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Deserialize)]
struct RoomBody {
    name: String,
    theme: Option<String>,
}

#[derive(Deserialize)]
struct MessageBody {
    sender: Option<String>,
    content: String,
}

#[derive(Default)]
pub struct FakeDiaryServer {
    rooms: RefCell<Vec<Room>>,
    messages: RefCell<Vec<Message>>,
    next_id: Cell<i64>,
    calls: RefCell<Vec<RecordedCall>>,
    offline: Cell<bool>,
    overrides: RefCell<HashMap<(Method, String), ApiResponse>>,
}

impl FakeDiaryServer {
    pub fn new() -> Self {
        Self { next_id: Cell::new(100), ..Default::default() }
    }

    pub fn seed_room(&self, id: RoomId, name: &str) {
        self.rooms.borrow_mut().push(Room {
            id,
            name: name.to_string(),
            theme: Some("default".to_string()),
        });
    }

    pub fn seed_message(&self, room_id: RoomId, content: &str) -> MessageId {
        let id = self.allocate_id();
        self.messages.borrow_mut().push(Message {
            id,
            sender: "me".to_string(),
            content: content.to_string(),
            room_id: Some(room_id),
            created_at: None,
        });
        id
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    /// Answers every `method path` request with a canned response.
    pub fn override_response(&self, method: Method, path: &str, status: u16, body: &str) {
        self.overrides.borrow_mut().insert(
            (method, path.to_string()),
            ApiResponse { status, body: body.to_string() },
        );
    }

    pub fn clear_overrides(&self) {
        self.overrides.borrow_mut().clear();
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn count_calls(&self, method: Method, path: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }

    pub fn rooms(&self) -> Vec<Room> {
        self.rooms.borrow().clone()
    }

    pub fn messages_in(&self, room_id: RoomId) -> Vec<Message> {
        self.messages
            .borrow()
            .iter()
            .filter(|m| m.room_id == Some(room_id))
            .cloned()
            .collect()
    }

    fn allocate_id(&self) -> i64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn route(&self, request: &ApiRequest) -> ApiResponse {
        let segments: Vec<&str> = request.path.trim_start_matches('/').split('/').collect();
        match (request.method, segments.as_slice()) {
            (Method::Get, ["ping"]) => text(200, "Pong! diary is alive."),
            (Method::Get, ["rooms"]) => json(200, &*self.rooms.borrow()),
            (Method::Post, ["rooms"]) => match parse::<RoomBody>(request) {
                Some(body) => {
                    let room = Room { id: self.allocate_id(), name: body.name, theme: body.theme };
                    self.rooms.borrow_mut().push(room.clone());
                    json(200, &room)
                }
                None => text(400, "bad room"),
            },
            (Method::Get, ["rooms", id, "messages"]) => match id.parse::<RoomId>() {
                Ok(room_id) => json(200, &self.messages_in(room_id)),
                Err(_) => text(400, "bad room id"),
            },
            (Method::Post, ["rooms", id, "messages"]) => {
                let Ok(room_id) = id.parse::<RoomId>() else {
                    return text(400, "bad room id");
                };
                if !self.rooms.borrow().iter().any(|r| r.id == room_id) {
                    return text(500, "Room not found");
                }
                let Some(body) = parse::<MessageBody>(request) else {
                    return text(400, "bad message");
                };
                let message = Message {
                    id: self.allocate_id(),
                    sender: body.sender.unwrap_or_else(|| "me".to_string()),
                    content: body.content,
                    room_id: Some(room_id),
                    created_at: None,
                };
                self.messages.borrow_mut().push(message.clone());
                json(200, &message)
            }
            (Method::Delete, ["messages", id]) => {
                let Ok(id) = id.parse::<MessageId>() else {
                    return text(400, "bad message id");
                };
                let mut messages = self.messages.borrow_mut();
                let before = messages.len();
                messages.retain(|m| m.id != id);
                if messages.len() == before {
                    text(404, "")
                } else {
                    text(204, "")
                }
            }
            _ => text(404, "no such route"),
        }
    }
}

impl HttpBackend for FakeDiaryServer {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, String> {
        self.calls.borrow_mut().push(RecordedCall {
            method: request.method,
            path: request.path.clone(),
            body: request
                .json_body
                .as_deref()
                .and_then(|b| serde_json::from_str(b).ok()),
        });

        if self.offline.get() {
            return Err("connection refused".to_string());
        }
        if let Some(canned) = self
            .overrides
            .borrow()
            .get(&(request.method, request.path.clone()))
        {
            return Ok(canned.clone());
        }
        Ok(self.route(&request))
    }
}

fn parse<T: for<'de> Deserialize<'de>>(request: &ApiRequest) -> Option<T> {
    request
        .json_body
        .as_deref()
        .and_then(|b| serde_json::from_str(b).ok())
}

fn json<T: serde::Serialize + ?Sized>(status: u16, value: &T) -> ApiResponse {
    ApiResponse {
        status,
        body: serde_json::to_string(value).unwrap_or_default(),
    }
}

fn text(status: u16, body: &str) -> ApiResponse {
    ApiResponse { status, body: body.to_string() }
}
