use leptos::prelude::*;

use crate::state::AppState;

/// Top bar: journal title, entry count, date filter and display-mode toggle.
#[component]
pub fn Header() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <header class="diary-header">
            <div class="diary-title">
                <h1>{move || state.room_name.get().unwrap_or_else(|| "Daily Diary".to_string())}</h1>
                <span id="totalEntries" class="total-entries">{move || state.total_entries.get()}</span>
            </div>
            <div class="header-actions">
                <button
                    id="calendarButton"
                    class="icon-btn"
                    title="Filter by date"
                    on:click=move |_| state.date_filter()
                >
                    "📅"
                </button>
                <label class="dark-toggle">
                    <input
                        id="darkModeToggle"
                        type="checkbox"
                        prop:checked=move || state.dark_mode.get()
                        on:change=move |_| state.toggle_display_mode()
                    />
                    "Dark"
                </label>
            </div>
        </header>
    }
}
