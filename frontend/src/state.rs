use std::rc::Rc;

use daily_diary::controller::{
    ActionOutcome, DiaryController, LoadOutcome, Notice, NoticeKind, Phase, SkipReason, UiEffect,
};
use daily_diary::render::{CONFIRM_DELETE_PROMPT, ListView};
use daily_diary::MessageId;
use gloo_timers::callback::Timeout;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::GlooBackend;

/// How long a transient notice stays on screen.
const NOTICE_MILLIS: u32 = 4_000;

type Controller = DiaryController<GlooBackend>;

/// Shared application state, provided via Leptos context.
///
/// The controller owns the session; the signals mirror what it last produced
/// so components can subscribe to them.
#[derive(Clone, Copy)]
pub struct AppState {
    // --- Read signals (for components to subscribe to) ---
    pub view: ReadSignal<ListView>,
    pub total_entries: ReadSignal<String>,
    pub room_name: ReadSignal<Option<String>>,
    pub input: ReadSignal<String>,
    pub in_flight: ReadSignal<bool>,
    pub dark_mode: ReadSignal<bool>,
    pub notice: ReadSignal<Option<String>>,

    // --- Write signals (for mutating state) ---
    pub set_input: WriteSignal<String>,
    set_view: WriteSignal<ListView>,
    set_total_entries: WriteSignal<String>,
    set_room_name: WriteSignal<Option<String>>,
    set_in_flight: WriteSignal<bool>,
    set_dark_mode: WriteSignal<bool>,
    set_notice: WriteSignal<Option<String>>,

    pub input_ref: NodeRef<html::Input>,
    controller: StoredValue<Rc<Controller>, LocalStorage>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let controller = Rc::new(daily_diary::controller(GlooBackend));

        let (view, set_view) = signal(controller.view());
        let (total_entries, set_total_entries) = signal(controller.total_entries_label());
        let (room_name, set_room_name) = signal(None::<String>);
        let (input, set_input) = signal(String::new());
        let (in_flight, set_in_flight) = signal(false);
        let (dark_mode, set_dark_mode) = signal(controller.display_mode().is_dark());
        let (notice, set_notice) = signal(None::<String>);

        let state = Self {
            view,
            total_entries,
            room_name,
            input,
            in_flight,
            dark_mode,
            notice,
            set_input,
            set_view,
            set_total_entries,
            set_room_name,
            set_in_flight,
            set_dark_mode,
            set_notice,
            input_ref: NodeRef::new(),
            controller: StoredValue::new_local(controller),
        };

        provide_context(state);
        state
    }

    /// Bootstrap the room and load its entries.
    pub fn start(&self) {
        let state = *self;
        let controller = self.controller.get_value();
        self.set_in_flight.set(true);

        spawn_local(async move {
            match controller.startup().await {
                Ok(LoadOutcome::Loaded) => {}
                Ok(LoadOutcome::SkippedBusy) => log::debug!("Startup skipped, already busy"),
                Err(notice) => state.show(notice),
            }
            state.sync(&controller);
        });
    }

    /// Send the current input as a new entry.
    pub fn send(&self) {
        let state = *self;
        let controller = self.controller.get_value();
        let text = self.input.get_untracked();
        self.set_in_flight.set(true);

        spawn_local(async move {
            let outcome = controller.send(&text).await;
            if outcome.committed() {
                state.set_input.set(String::new());
            }
            state.finish(&controller, outcome);
        });
    }

    /// Ask for confirmation, then delete entry `id`.
    pub fn delete(&self, id: MessageId) {
        let state = *self;
        let controller = self.controller.get_value();
        self.set_in_flight.set(true);

        spawn_local(async move {
            let outcome = controller
                .delete(id, || {
                    window()
                        .confirm_with_message(CONFIRM_DELETE_PROMPT)
                        .unwrap_or(false)
                })
                .await;
            state.finish(&controller, outcome);
        });
    }

    pub fn quick_compose(&self) {
        let effect = self.controller.with_value(|c| c.quick_compose());
        self.apply(effect);
    }

    pub fn date_filter(&self) {
        let effect = self.controller.with_value(|c| c.date_filter());
        self.apply(effect);
    }

    pub fn toggle_display_mode(&self) {
        let mode = self.controller.with_value(|c| c.toggle_display_mode());
        self.set_dark_mode.set(mode.is_dark());
    }

    fn apply(&self, effect: UiEffect) {
        match effect {
            UiEffect::FocusInput => {
                if let Some(input) = self.input_ref.get_untracked() {
                    let _ = input.focus();
                }
            }
            UiEffect::Notify(notice) => self.show(notice),
        }
    }

    fn finish(&self, controller: &Controller, outcome: ActionOutcome) {
        match &outcome {
            ActionOutcome::Skipped(SkipReason::Busy) => {
                log::debug!("Ignored action while another one is running");
            }
            ActionOutcome::Skipped(reason) => log::debug!("Nothing to do: {reason:?}"),
            _ => {}
        }
        if let Some(notice) = outcome.notice().cloned().or_else(|| outcome.skip_notice()) {
            self.show(notice);
        }
        self.sync(controller);
    }

    /// Copy the controller's derived state into the signals. `in_flight`
    /// mirrors the controller's phase, never the outcome of one action.
    fn sync(&self, controller: &Controller) {
        self.set_in_flight.set(controller.phase() == Phase::InFlight);
        self.set_view.set(controller.view());
        self.set_total_entries.set(controller.total_entries_label());
        self.set_room_name.set(
            controller
                .session()
                .active_room()
                .map(|r| r.name)
                .filter(|name| !name.is_empty()),
        );
    }

    fn show(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Blocking => {
                log::error!("{}", notice.text);
                let _ = window().alert_with_message(&notice.text);
            }
            NoticeKind::Transient => {
                log::warn!("{}", notice.text);
                self.set_notice.set(Some(notice.text));
                let set_notice = self.set_notice;
                Timeout::new(NOTICE_MILLIS, move || set_notice.set(None)).forget();
            }
        }
    }
}
