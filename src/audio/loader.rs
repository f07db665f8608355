use std::sync::Arc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioContext, File, FileReader};

use crate::types::AudioData;

/// Read a picked file fully into memory.
pub async fn read_file_bytes(file: &File) -> Result<Vec<u8>, String> {
    let reader = FileReader::new().map_err(|e| format!("FileReader: {e:?}"))?;
    let reader_cb = reader.clone();

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let resolve = resolve.clone();
        let reject = reject.clone();

        let onload = Closure::once(move |_: web_sys::Event| {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let onerror = Closure::once(move |_: web_sys::Event| {
            let _ = reject.call0(&JsValue::NULL);
        });

        reader_cb.set_onload(Some(onload.as_ref().unchecked_ref()));
        reader_cb.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        onload.forget();
        onerror.forget();
    });

    reader
        .read_as_array_buffer(file)
        .map_err(|e| format!("read_as_array_buffer: {e:?}"))?;

    JsFuture::from(promise)
        .await
        .map_err(|_| "file read failed".to_string())?;

    let result = reader.result().map_err(|e| format!("reader result: {e:?}"))?;
    let array_buffer = result
        .dyn_into::<js_sys::ArrayBuffer>()
        .map_err(|_| "expected ArrayBuffer".to_string())?;
    Ok(js_sys::Uint8Array::new(&array_buffer).to_vec())
}

/// Decode audio bytes with the browser's decoder and keep channel 0.
///
/// decodeAudioData detaches the buffer it is given, so the bytes are
/// copied into a fresh ArrayBuffer first.
pub async fn decode_audio(bytes: &[u8]) -> Result<AudioData, String> {
    let ctx = AudioContext::new().map_err(|e| format!("AudioContext: {e:?}"))?;

    let array = js_sys::Uint8Array::from(bytes);
    let promise = ctx
        .decode_audio_data(&array.buffer())
        .map_err(|e| format!("decodeAudioData: {e:?}"))?;

    let decoded = JsFuture::from(promise).await;
    // The context exists only for this one decode.
    let _ = ctx.close();

    let decoded = decoded.map_err(|e| format!("audio decode rejected: {e:?}"))?;
    let buffer: web_sys::AudioBuffer = decoded
        .dyn_into()
        .map_err(|_| "expected AudioBuffer".to_string())?;

    let samples = buffer
        .get_channel_data(0)
        .map_err(|e| format!("get_channel_data: {e:?}"))?;

    Ok(AudioData {
        sample_rate: buffer.sample_rate() as u32,
        channels: buffer.number_of_channels(),
        duration_secs: buffer.duration(),
        samples: Arc::new(samples),
    })
}
