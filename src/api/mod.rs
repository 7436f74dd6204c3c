//! JSON-over-HTTP access to the diary service.
//!
//! [`DiaryApi`] holds the request wrappers and the typed endpoint helpers. The
//! actual I/O is delegated to an [`HttpBackend`], so the same client runs on
//! `reqwest` natively and on `fetch` in the browser.

#[cfg(test)]
pub(crate) mod fake;
#[cfg(feature = "native")]
pub mod reqwest_backend;

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::{ClientError, FailureReason};
use crate::models::{Message, MessageId, NewMessage, NewRoom, Room, RoomId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request as handed to the backend. `path` is relative to the API root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    /// Serialized JSON body. Backends must send `Content-Type: application/json`
    /// whenever this is present.
    pub json_body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a single HTTP exchange. An `Err` means the request never produced
/// a response (connection refused, DNS failure, aborted fetch, ...).
#[allow(async_fn_in_trait)]
pub trait HttpBackend {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, String>;
}

impl<B: HttpBackend> HttpBackend for Rc<B> {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, String> {
        (**self).execute(request).await
    }
}

/// Client for the diary REST API.
///
/// Each call is one attempt: no retries, no timeout, no backoff. Network
/// errors and non-2xx statuses both surface as [`ClientError::RequestFailed`].
pub struct DiaryApi<B> {
    backend: B,
}

impl<B: HttpBackend> DiaryApi<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    // ── Request wrappers ─────────────────────────────────────────────────────

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ClientError> {
        let response = self.send(Method::Get, path, None).await?;
        decode(Method::Get, path, &response.body)
    }

    pub async fn post<T, R>(&self, path: &str, body: &T) -> Result<R, ClientError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let json = serde_json::to_string(body).map_err(|source| ClientError::Encode {
            method: Method::Post,
            path: path.to_string(),
            source,
        })?;
        let response = self.send(Method::Post, path, Some(json)).await?;
        decode(Method::Post, path, &response.body)
    }

    /// Any response body is ignored.
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.send(Method::Delete, path, None).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        json_body: Option<String>,
    ) -> Result<ApiResponse, ClientError> {
        debug!("{method} {path}");
        let request = ApiRequest { method, path: path.to_string(), json_body };

        let response = self.backend.execute(request).await.map_err(|e| {
            warn!("{method} {path} did not complete: {e}");
            ClientError::request_failed(method, path, FailureReason::Network(e))
        })?;

        if !response.is_success() {
            warn!("{method} {path} answered {}", response.status);
            return Err(ClientError::request_failed(
                method,
                path,
                FailureReason::Status(response.status),
            ));
        }
        Ok(response)
    }

    // ── Endpoints ────────────────────────────────────────────────────────────

    pub async fn list_rooms(&self) -> Result<Vec<Room>, ClientError> {
        self.get("/rooms").await
    }

    pub async fn create_room(&self, room: &NewRoom) -> Result<Room, ClientError> {
        self.post("/rooms", room).await
    }

    pub async fn list_messages(&self, room_id: RoomId) -> Result<Vec<Message>, ClientError> {
        self.get(&format!("/rooms/{room_id}/messages")).await
    }

    pub async fn create_message(
        &self,
        room_id: RoomId,
        message: &NewMessage,
    ) -> Result<Message, ClientError> {
        self.post(&format!("/rooms/{room_id}/messages"), message).await
    }

    pub async fn delete_message(&self, id: MessageId) -> Result<(), ClientError> {
        self.delete(&format!("/messages/{id}")).await
    }

    /// Health check. The service answers with a plain-text greeting.
    pub async fn ping(&self) -> Result<String, ClientError> {
        let response = self.send(Method::Get, "/ping", None).await?;
        Ok(response.body)
    }
}

fn decode<R: DeserializeOwned>(method: Method, path: &str, body: &str) -> Result<R, ClientError> {
    serde_json::from_str(body).map_err(|source| ClientError::Decode {
        method,
        path: path.to_string(),
        source,
    })
}
