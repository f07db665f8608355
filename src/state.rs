use leptos::prelude::*;

use crate::types::{AudioData, Prediction, SelectedAudio};

/// All UI state, shared through the Leptos context.
///
/// Every field is a signal, so the struct is Copy and handlers can move it
/// into closures freely. Nothing here outlives the page session.
#[derive(Clone, Copy)]
pub struct AppState {
    /// File picked by the user, kept until upload.
    pub selected: RwSignal<Option<SelectedAudio>>,
    /// Decoded preview audio for the current selection.
    pub audio: RwSignal<Option<AudioData>>,
    /// Single status line; every outcome, good or bad, lands here.
    pub status: RwSignal<String>,
    /// True while a prediction request is in flight. Guards re-entry.
    pub uploading: RwSignal<bool>,
    pub progress_visible: RwSignal<bool>,
    /// Upload progress, 0–100.
    pub upload_progress: RwSignal<f64>,
    pub predictions: RwSignal<Vec<Prediction>>,
    pub spectrogram_url: RwSignal<Option<String>>,
    /// Results container stays hidden until the first successful render.
    pub results_visible: RwSignal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            selected: RwSignal::new(None),
            audio: RwSignal::new(None),
            status: RwSignal::new("Select an audio file to begin.".to_string()),
            uploading: RwSignal::new(false),
            progress_visible: RwSignal::new(false),
            upload_progress: RwSignal::new(0.0),
            predictions: RwSignal::new(Vec::new()),
            spectrogram_url: RwSignal::new(None),
            results_visible: RwSignal::new(false),
        }
    }
}
