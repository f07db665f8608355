use leptos::prelude::*;

use crate::state::AppState;

#[component]
pub fn ResultsPanel() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <div class="results" hidden=move || !state.results_visible.get()>
            <h2>"Top matches"</h2>
            <ul class="prediction-list">
                {move || {
                    state
                        .predictions
                        .get()
                        .into_iter()
                        .map(|p| {
                            let label = p.confidence_label();
                            view! {
                                <li class="prediction-row">
                                    <span class="prediction-species">{p.species}</span>
                                    <span class="prediction-confidence">{label}</span>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
            // The image only appears once a response has carried a URL;
            // a later response without one leaves the last image up.
            {move || state.spectrogram_url.get().map(|url| view! {
                <img class="spectrogram-image" src=url alt="Spectrogram" />
            })}
        </div>
    }
}
