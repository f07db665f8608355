use leptos::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::canvas::{get_canvas_ctx, waveform_renderer};
use crate::state::AppState;

#[component]
pub fn WaveformPreview() -> impl IntoView {
    let state = expect_context::<AppState>();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    // Redraw whenever a new file finishes decoding.
    Effect::new(move || {
        let audio = state.audio.get();

        let Some(canvas_el) = canvas_ref.get() else { return };
        let canvas: &HtmlCanvasElement = canvas_el.as_ref();
        // Before the first selection the canvas stays untouched.
        let Some(audio) = audio else { return };

        // Sync canvas internal resolution with display size
        let rect = canvas.get_bounding_client_rect();
        let display_w = rect.width() as u32;
        let display_h = rect.height() as u32;
        if display_w == 0 || display_h == 0 {
            return;
        }
        if canvas.width() != display_w {
            canvas.set_width(display_w);
        }
        if canvas.height() != display_h {
            canvas.set_height(display_h);
        }

        let Some(ctx) = get_canvas_ctx(canvas) else { return };
        waveform_renderer::draw_waveform(
            &ctx,
            &audio.samples,
            display_w as f64,
            display_h as f64,
        );
    });

    view! {
        <div class="waveform-container">
            <canvas node_ref=canvas_ref />
        </div>
    }
}
