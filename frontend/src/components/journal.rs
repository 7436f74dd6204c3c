use daily_diary::render::{DELETE_CONTROL_TITLE, EMPTY_STATE_TEXT, EntryRow};
use leptos::ev;
use leptos::html;
use leptos::prelude::*;

use crate::state::AppState;

/// Entry list with its empty state, notice banner and the composer.
#[component]
pub fn Journal() -> impl IntoView {
    let state = expect_context::<AppState>();
    let list_ref = NodeRef::<html::Ul>::new();

    // Keep the newest entry in view after every redraw
    Effect::new(move |_| {
        let view = state.view.get();
        if !view.scroll_to_bottom {
            return;
        }
        if let Some(list) = list_ref.get() {
            list.set_scroll_top(list.scroll_height());
        }
    });

    view! {
        <main class="journal">
            // Notice banner
            {move || {
                state.notice.get().map(|text| {
                    view! {
                        <div class="notice-banner">{text}</div>
                    }
                })
            }}

            <div
                id="emptyState"
                class="empty-state"
                style:display=move || if state.view.get().empty_state { "flex" } else { "none" }
            >
                {EMPTY_STATE_TEXT}
            </div>

            <ul id="messageList" class="message-list" node_ref=list_ref>
                <For
                    each=move || state.view.get().rows
                    key=|row| row.id
                    let:row
                >
                    <EntryItem row=row />
                </For>
            </ul>

            <Composer />
        </main>
    }
}

/// One journal entry with its delete control.
#[component]
fn EntryItem(row: EntryRow) -> impl IntoView {
    let state = expect_context::<AppState>();
    let id = row.id;

    view! {
        <li class="message-item">
            <div class="message-bubble">
                {row.content}
                {row.timestamp.map(|ts| view! { <span class="message-time">{ts}</span> })}
            </div>
            <button
                class="message-delete"
                title=DELETE_CONTROL_TITLE
                disabled=move || state.in_flight.get()
                on:click=move |ev: ev::MouseEvent| {
                    ev.stop_propagation();
                    state.delete(id);
                }
            >
                "🗑"
            </button>
        </li>
    }
}

/// Input row: quick-compose button, text field and send button.
#[component]
fn Composer() -> impl IntoView {
    let state = expect_context::<AppState>();

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            state.send();
        }
    };

    view! {
        <div class="input-area">
            <button
                id="plusButton"
                class="icon-btn"
                title="New entry"
                on:click=move |_| state.quick_compose()
            >
                "+"
            </button>
            <input
                id="messageInput"
                type="text"
                placeholder="Write about your day… (Enter to save)"
                node_ref=state.input_ref
                prop:value=state.input
                on:input=move |ev| {
                    state.set_input.set(event_target_value(&ev));
                }
                on:keydown=on_keydown
            />
            <button
                id="sendButton"
                class="send-btn"
                on:click=move |_| state.send()
                disabled=move || state.in_flight.get() || state.input.get().trim().is_empty()
            >
                {move || if state.in_flight.get() { "Saving…" } else { "Save" }}
            </button>
        </div>
    }
}
