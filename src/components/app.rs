use leptos::prelude::*;

use crate::components::results::ResultsPanel;
use crate::components::status_line::StatusLine;
use crate::components::upload_panel::UploadPanel;
use crate::components::waveform::WaveformPreview;
use crate::state::AppState;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    provide_context(state);

    view! {
        <div class="app">
            <div class="toolbar">
                <span class="toolbar-brand"><b>"song"</b><i>"scope"</i></span>
            </div>
            <UploadPanel />
            <WaveformPreview />
            <StatusLine />
            <ResultsPanel />
        </div>
    }
}
