mod api;
mod components;
mod state;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::header::Header;
use components::journal::Journal;
use state::AppState;

/// Root application component.
#[component]
fn App() -> impl IntoView {
    let state = AppState::provide();

    // Pick the room and load its entries on mount
    state.start();

    view! {
        <div class="app-container" class=("light-mode", move || !state.dark_mode.get())>
            <Header />
            <Journal />
        </div>
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
