//! Client for the daily diary service: keeps one journal room selected, mirrors
//! its entries locally and turns UI actions into API calls.

pub mod api;
pub mod config;
pub mod controller;
pub mod errors;
pub mod models;
pub mod render;
pub mod session;

pub use api::{ApiRequest, ApiResponse, DiaryApi, HttpBackend, Method};
pub use config::ClientConfig;
pub use controller::{
    ActionOutcome, DiaryController, DisplayMode, LoadOutcome, Notice, NoticeKind, Phase,
    SkipReason, UiEffect,
};
pub use errors::{ClientError, FailureReason};
pub use models::{Message, MessageId, Room, RoomId};
pub use render::{render, EntryRow, ListView};
pub use session::DiarySession;

#[cfg(feature = "native")]
pub use api::reqwest_backend::ReqwestBackend;

/// Wires a controller on top of `backend`.
pub fn controller<B: HttpBackend>(backend: B) -> DiaryController<B> {
    DiaryController::new(DiarySession::new(DiaryApi::new(backend)))
}
