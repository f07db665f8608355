use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, File, HtmlInputElement};

use crate::api::{self, PredictError};
use crate::audio::loader::{decode_audio, read_file_bytes};
use crate::state::AppState;
use crate::types::{PredictionResponse, SelectedAudio};

// Matches the formats the prediction service accepts.
const ACCEPTED_EXTENSIONS: &str = ".wav,.mp3,.flac,.ogg,.m4a";

#[component]
pub fn UploadPanel() -> impl IntoView {
    let state = expect_context::<AppState>();
    let drag_over = RwSignal::new(false);
    let file_input_ref = NodeRef::<leptos::html::Input>::new();

    let on_browse_click = move |_: web_sys::MouseEvent| {
        if let Some(input) = file_input_ref.get() {
            let el: &HtmlInputElement = input.as_ref();
            el.click();
        }
    };

    let on_file_input_change = move |ev: web_sys::Event| {
        let target = ev.target().unwrap();
        let input: HtmlInputElement = target.unchecked_into();
        let Some(file_list) = input.files() else { return };
        let Some(file) = file_list.get(0) else { return };

        spawn_local(async move {
            load_selected_file(file, state).await;
        });

        // Reset the input so the same file can be re-selected
        input.set_value("");
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        drag_over.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        drag_over.set(false);
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        drag_over.set(false);

        let Some(dt) = ev.data_transfer() else { return };
        let Some(file_list) = dt.files() else { return };
        let Some(file) = file_list.get(0) else { return };

        spawn_local(async move {
            load_selected_file(file, state).await;
        });
    };

    let on_identify_click = move |_: web_sys::MouseEvent| {
        if state.uploading.get_untracked() {
            return;
        }
        spawn_local(async move {
            upload_selected(state).await;
        });
    };

    // "robin.wav  2.1s  22kHz" once decoded, just the name before that.
    let file_label = move || {
        let sel = state.selected.get()?;
        let mut label = sel.name;
        if let Some(audio) = state.audio.get() {
            label.push_str(&format!(
                "  {:.1}s  {}kHz",
                audio.duration_secs,
                audio.sample_rate / 1000
            ));
        }
        Some(label)
    };

    view! {
        <div class="upload-panel">
            <div
                class=move || if drag_over.get() { "drop-zone drag-over" } else { "drop-zone" }
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:drop=on_drop
            >
                <input
                    node_ref=file_input_ref
                    type="file"
                    accept=ACCEPTED_EXTENSIONS
                    style="display:none"
                    on:change=on_file_input_change
                />
                <button class="upload-btn" on:click=on_browse_click>"Browse files"</button>
                {move || match file_label() {
                    Some(label) => view! { <span class="file-meta">{label}</span> }.into_any(),
                    None => view! { <span class="drop-hint">"or drop an audio file here"</span> }.into_any(),
                }}
                <button
                    class="upload-btn identify-btn"
                    disabled=move || state.uploading.get()
                    on:click=on_identify_click
                >"Identify"</button>
            </div>
            {move || state.progress_visible.get().then(|| view! {
                <div class="progress">
                    <div
                        class="bar"
                        style=move || format!("width: {}%", state.upload_progress.get())
                    ></div>
                </div>
            })}
        </div>
    }
}

/// Read the picked file, record it for upload, and decode it for the
/// waveform preview. A file whose decode fails can still be uploaded;
/// the server has its own decoder.
async fn load_selected_file(file: File, state: AppState) {
    let name = file.name();
    let mime_type = file.type_();

    let bytes = match read_file_bytes(&file).await {
        Ok(b) => b,
        Err(e) => {
            log::error!("failed to read {name}: {e}");
            state.status.set("Could not read the selected file.".to_string());
            return;
        }
    };

    let bytes = Arc::new(bytes);
    state.selected.set(Some(SelectedAudio {
        name: name.clone(),
        mime_type,
        bytes: bytes.clone(),
    }));
    state.status.set("Ready to upload.".to_string());

    match decode_audio(&bytes).await {
        Ok(audio) => {
            log::info!(
                "Loaded {}: {} samples, {} Hz, {:.2}s",
                name,
                audio.samples.len(),
                audio.sample_rate,
                audio.duration_secs
            );
            state.audio.set(Some(audio));
        }
        Err(e) => {
            log::warn!("decode failed for {name}: {e}");
            state
                .status
                .set("Could not decode audio for the preview.".to_string());
        }
    }
}

/// Run one upload: guard preconditions, stream progress into the UI,
/// then apply the outcome. Progress cleanup happens exactly once,
/// before the outcome branch.
async fn upload_selected(state: AppState) {
    let Some(sel) = state.selected.get_untracked() else {
        state
            .status
            .set("Please select an audio file first.".to_string());
        return;
    };

    state.uploading.set(true);
    state.progress_visible.set(true);

    let progress_state = state;
    let result = api::post_prediction(&sel.bytes, &sel.name, &sel.mime_type, move |pct| {
        progress_state.upload_progress.set(pct);
        progress_state
            .status
            .set(format!("Uploading... {}%", pct.round() as u32));
    })
    .await;

    state.progress_visible.set(false);
    state.upload_progress.set(0.0);
    state.uploading.set(false);

    match result {
        Ok(response) => apply_response(&state, response),
        Err(PredictError::Http(status)) => {
            log::warn!("prediction request returned HTTP {status}");
            state.status.set("Upload failed.".to_string());
        }
        Err(PredictError::Network(detail)) => {
            log::error!("prediction request failed: {detail}");
            state.status.set("Network error.".to_string());
        }
        Err(PredictError::MalformedResponse(detail)) => {
            log::error!("prediction response unreadable: {detail}");
            state
                .status
                .set("Server response could not be read.".to_string());
        }
    }
}

/// Push a parsed response into the UI. A server-reported error wins over
/// everything else in the body.
fn apply_response(state: &AppState, response: PredictionResponse) {
    if let Some(error) = response.error.filter(|e| !e.is_empty()) {
        state.status.set(error);
        return;
    }

    state.status.set("Prediction complete.".to_string());
    state.predictions.set(response.predictions);
    if let Some(url) = response.spectrogram_url {
        state.spectrogram_url.set(Some(url));
    }
    state.results_visible.set(true);
}
