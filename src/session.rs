use std::cell::RefCell;

use tracing::{debug, info};

use crate::api::{DiaryApi, HttpBackend};
use crate::errors::ClientError;
use crate::models::{Message, MessageId, NewMessage, NewRoom, Room, RoomId};

/// Client-side state for one diary session: the active room and the local
/// replica of its messages.
///
/// The replica is only ever replaced wholesale by [`refresh`](Self::refresh);
/// nothing patches it in place. All methods take `&self` and never hold a
/// borrow across an `.await`, so a session can be shared by the event
/// handlers of a single-threaded UI.
pub struct DiarySession<B> {
    api: DiaryApi<B>,
    active_room: RefCell<Option<Room>>,
    replica: RefCell<Vec<Message>>,
}

impl<B: HttpBackend> DiarySession<B> {
    pub fn new(api: DiaryApi<B>) -> Self {
        Self {
            api,
            active_room: RefCell::new(None),
            replica: RefCell::new(Vec::new()),
        }
    }

    pub fn active_room(&self) -> Option<Room> {
        self.active_room.borrow().clone()
    }

    pub fn active_room_id(&self) -> Option<RoomId> {
        self.active_room.borrow().as_ref().map(|r| r.id)
    }

    /// Snapshot of the replica, oldest first.
    pub fn messages(&self) -> Vec<Message> {
        self.replica.borrow().clone()
    }

    pub fn total_entries(&self) -> usize {
        self.replica.borrow().len()
    }

    /// Makes sure a room is active, selecting the first room the server lists
    /// or creating the default one when there is none.
    ///
    /// Once a room is active it is returned as is; the server is not asked
    /// again.
    pub async fn ensure_active_room(&self) -> Result<Room, ClientError> {
        if let Some(room) = self.active_room() {
            return Ok(room);
        }

        let rooms = self.api.list_rooms().await?;
        let room = match rooms.into_iter().next() {
            Some(room) => {
                info!("Using existing room {} ({})", room.id, room.name);
                room
            }
            None => {
                let room = self.api.create_room(&NewRoom::default()).await?;
                info!("Created default room {} ({})", room.id, room.name);
                room
            }
        };

        *self.active_room.borrow_mut() = Some(room.clone());
        Ok(room)
    }

    /// Replaces the replica with the server's message list for the active
    /// room. Does nothing while no room is active.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let Some(room_id) = self.active_room_id() else {
            debug!("refresh skipped: no active room");
            return Ok(());
        };

        let messages = self.api.list_messages(room_id).await?;
        debug!("Room {room_id} holds {} entries", messages.len());
        *self.replica.borrow_mut() = messages;
        Ok(())
    }

    /// Posts a new entry to the active room. Returns `None` without touching
    /// the network when no room is active. The replica is left alone; call
    /// [`refresh`](Self::refresh) afterwards.
    pub async fn append(&self, content: &str) -> Result<Option<Message>, ClientError> {
        let Some(room_id) = self.active_room_id() else {
            return Ok(None);
        };
        let created = self
            .api
            .create_message(room_id, &NewMessage::from_me(content))
            .await?;
        Ok(Some(created))
    }

    /// Deletes an entry on the server. The replica is left alone; call
    /// [`refresh`](Self::refresh) afterwards.
    pub async fn remove(&self, id: MessageId) -> Result<(), ClientError> {
        self.api.delete_message(id).await
    }
}
