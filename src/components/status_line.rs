use leptos::prelude::*;

use crate::state::AppState;

#[component]
pub fn StatusLine() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <div class="status">{move || state.status.get()}</div>
    }
}
