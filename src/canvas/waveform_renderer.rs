use web_sys::CanvasRenderingContext2d;

use crate::dsp::envelope::min_max_envelope;

const BACKGROUND: &str = "#0b1220";
const TRACE: &str = "#60a5fa";

/// Draw a min/max envelope waveform across the full canvas.
///
/// One vertical segment per pixel column, accumulated into a single path
/// and stroked once. A sample value of -1 maps to the bottom edge, +1 to
/// the top-adjacent edge via `y = (1 + v) * h / 2`.
pub fn draw_waveform(
    ctx: &CanvasRenderingContext2d,
    samples: &[f32],
    canvas_width: f64,
    canvas_height: f64,
) {
    ctx.clear_rect(0.0, 0.0, canvas_width, canvas_height);
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, canvas_width, canvas_height);

    if samples.is_empty() || canvas_width < 1.0 {
        return;
    }

    let amp = canvas_height / 2.0;

    ctx.set_line_width(1.0);
    ctx.set_stroke_style_str(TRACE);
    ctx.begin_path();

    let env = min_max_envelope(samples, canvas_width as usize);
    for (i, col) in env.iter().enumerate() {
        // Columns past the end of a short file stay blank.
        let Some(col) = col else { continue };
        let x = i as f64;
        ctx.move_to(x, (1.0 + col.min as f64) * amp);
        ctx.line_to(x, (1.0 + col.max as f64) * amp);
    }

    ctx.stroke();
}
