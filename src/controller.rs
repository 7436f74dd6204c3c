use std::cell::Cell;

use tracing::{error, info, warn};

use crate::api::HttpBackend;
use crate::errors::ClientError;
use crate::models::MessageId;
use crate::render::{render, total_entries_label, ListView};
use crate::session::DiarySession;

pub const CONNECTIVITY_NOTICE: &str = "Could not connect to diary API. Is the server running?";
pub const DATE_FILTER_NOTICE: &str = "Date filtering coming soon";
pub const NO_ROOM_NOTICE: &str = "The diary is not loaded yet, your entry was not saved.";

/// Whether a network-bound action is currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Dark,
    Light,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Dark => DisplayMode::Light,
            DisplayMode::Light => DisplayMode::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == DisplayMode::Dark
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Must be acknowledged before the user carries on (an alert).
    Blocking,
    /// Shown alongside the UI and dismissed on its own.
    Transient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn blocking(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Blocking, text: text.into() }
    }

    pub fn transient(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Transient, text: text.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    BlankInput,
    NoActiveRoom,
    Busy,
    NotConfirmed,
}

impl SkipReason {
    /// What to tell the user about the skip, if anything. Only a missing room
    /// drops something the user asked for.
    pub fn notice(self) -> Option<Notice> {
        match self {
            SkipReason::NoActiveRoom => Some(Notice::transient(NO_ROOM_NOTICE)),
            _ => None,
        }
    }
}

/// Result of a startup or reload that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// Another action was running; nothing was requested.
    SkippedBusy,
}

/// Result of a user-triggered send or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Mutation and follow-up refresh both succeeded.
    Completed,
    /// The server accepted the mutation but the refresh failed; the replica
    /// still shows the state from before the action.
    CompletedStale(Notice),
    /// Nothing was sent.
    Skipped(SkipReason),
    /// The mutation failed. Replica untouched; the caller keeps its input.
    Failed(Notice),
}

impl ActionOutcome {
    /// True when the server accepted the mutation.
    pub fn committed(&self) -> bool {
        matches!(self, ActionOutcome::Completed | ActionOutcome::CompletedStale(_))
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            ActionOutcome::CompletedStale(n) | ActionOutcome::Failed(n) => Some(n),
            _ => None,
        }
    }

    pub fn skip_notice(&self) -> Option<Notice> {
        match self {
            ActionOutcome::Skipped(reason) => reason.notice(),
            _ => None,
        }
    }
}

/// Side effects of controls that never touch the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    FocusInput,
    Notify(Notice),
}

/// Drives the diary UI: turns control activations into session calls and
/// decides what the user gets told.
///
/// Network-bound actions are serialized. While one is in flight any other is
/// skipped with [`SkipReason::Busy`], so a double click on send cannot post
/// twice and a delete cannot interleave with a running refresh.
pub struct DiaryController<B> {
    session: DiarySession<B>,
    phase: Cell<Phase>,
    display_mode: Cell<DisplayMode>,
}

/// Holds the controller in [`Phase::InFlight`] until dropped.
pub(crate) struct InFlight<'a> {
    phase: &'a Cell<Phase>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.phase.set(Phase::Idle);
    }
}

impl<B: HttpBackend> DiaryController<B> {
    pub fn new(session: DiarySession<B>) -> Self {
        Self {
            session,
            phase: Cell::new(Phase::Idle),
            display_mode: Cell::new(DisplayMode::default()),
        }
    }

    pub fn session(&self) -> &DiarySession<B> {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode.get()
    }

    pub fn view(&self) -> ListView {
        render(&self.session.messages())
    }

    pub fn total_entries_label(&self) -> String {
        total_entries_label(self.session.total_entries())
    }

    pub(crate) fn try_begin(&self) -> Option<InFlight<'_>> {
        if self.phase.get() == Phase::InFlight {
            return None;
        }
        self.phase.set(Phase::InFlight);
        Some(InFlight { phase: &self.phase })
    }

    /// Bootstraps the active room and loads its entries. Any failure becomes
    /// a blocking connectivity notice; the controller stays usable.
    pub async fn startup(&self) -> Result<LoadOutcome, Notice> {
        let Some(_guard) = self.try_begin() else {
            warn!("startup requested while another action is running");
            return Ok(LoadOutcome::SkippedBusy);
        };

        self.bootstrap().await.map_err(|e| {
            error!("Startup failed: {e}");
            Notice::blocking(CONNECTIVITY_NOTICE)
        })?;
        Ok(LoadOutcome::Loaded)
    }

    async fn bootstrap(&self) -> Result<(), ClientError> {
        self.session.ensure_active_room().await?;
        self.session.refresh().await
    }

    /// Sends the trimmed `input` as a new entry, then refreshes.
    ///
    /// Blank input or a missing active room is a no-op. On
    /// [`ActionOutcome::Failed`] the caller should keep the input text.
    pub async fn send(&self, input: &str) -> ActionOutcome {
        let text = input.trim();
        if text.is_empty() {
            return ActionOutcome::Skipped(SkipReason::BlankInput);
        }
        if self.session.active_room_id().is_none() {
            return ActionOutcome::Skipped(SkipReason::NoActiveRoom);
        }
        let Some(_guard) = self.try_begin() else {
            return ActionOutcome::Skipped(SkipReason::Busy);
        };

        match self.session.append(text).await {
            Ok(Some(created)) => info!("Saved entry {}", created.id),
            Ok(None) => return ActionOutcome::Skipped(SkipReason::NoActiveRoom),
            Err(e) => {
                error!("Failed to send entry: {e}");
                return ActionOutcome::Failed(Notice::transient(format!(
                    "Could not save your entry: {e}"
                )));
            }
        }
        self.refresh_after_mutation().await
    }

    /// Deletes entry `id` once `confirm` agrees, then refreshes. `confirm` runs
    /// before any network traffic.
    pub async fn delete(&self, id: MessageId, confirm: impl FnOnce() -> bool) -> ActionOutcome {
        if self.phase.get() == Phase::InFlight {
            return ActionOutcome::Skipped(SkipReason::Busy);
        }
        if !confirm() {
            return ActionOutcome::Skipped(SkipReason::NotConfirmed);
        }
        let Some(_guard) = self.try_begin() else {
            return ActionOutcome::Skipped(SkipReason::Busy);
        };

        if let Err(e) = self.session.remove(id).await {
            error!("Failed to delete entry {id}: {e}");
            return ActionOutcome::Failed(Notice::transient(format!(
                "Could not delete the entry: {e}"
            )));
        }
        info!("Deleted entry {id}");
        self.refresh_after_mutation().await
    }

    /// Re-runs the startup refresh on demand.
    pub async fn reload(&self) -> Result<LoadOutcome, Notice> {
        let Some(_guard) = self.try_begin() else {
            return Ok(LoadOutcome::SkippedBusy);
        };
        self.session.refresh().await.map_err(|e| {
            error!("Reload failed: {e}");
            Notice::transient(format!("Could not load entries: {e}"))
        })?;
        Ok(LoadOutcome::Loaded)
    }

    async fn refresh_after_mutation(&self) -> ActionOutcome {
        match self.session.refresh().await {
            Ok(()) => ActionOutcome::Completed,
            Err(e) => {
                warn!("Entries may be out of date: {e}");
                ActionOutcome::CompletedStale(Notice::transient(format!(
                    "The change was saved, but the list could not be reloaded: {e}"
                )))
            }
        }
    }

    pub fn quick_compose(&self) -> UiEffect {
        UiEffect::FocusInput
    }

    pub fn date_filter(&self) -> UiEffect {
        UiEffect::Notify(Notice::transient(DATE_FILTER_NOTICE))
    }

    pub fn toggle_display_mode(&self) -> DisplayMode {
        let mode = self.display_mode.get().toggled();
        self.display_mode.set(mode);
        mode
    }
}
