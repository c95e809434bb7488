//! 参照規格（Grounding Database）パネル

use circuit_guard_common::ReferenceInfo;
use leptos::prelude::*;

#[component]
pub fn ReferencePanel(searching: RwSignal<bool>, reference: RwSignal<Option<ReferenceInfo>>) -> impl IntoView {
    let visible = move || searching.get() || reference.with(Option::is_some);

    view! {
        <Show when=visible>
            <div class="reference-panel">
                <h5 class="reference-title">
                    <span class:spinner=move || searching.get()>"⌕"</span>
                    "Grounding Database"
                </h5>
                <Show
                    when=move || !searching.get()
                    fallback=|| view! { <p class="reference-searching">"Querying industrial IPC benchmarks..."</p> }
                >
                    {move || reference.get().map(|info| view! { <ReferenceBody info=info /> })}
                </Show>
            </div>
        </Show>
    }
}

#[component]
fn ReferenceBody(info: ReferenceInfo) -> impl IntoView {
    let links = (!info.sources.is_empty()).then(|| {
        let items = info
            .sources
            .into_iter()
            .map(|source| {
                view! {
                    <a class="reference-link" href=source.uri target="_blank" rel="noreferrer">
                        <span class="reference-link-title">{source.title}</span>
                        <span class="reference-link-icon">"↗"</span>
                    </a>
                }
            })
            .collect_view();
        view! {
            <div class="reference-links">
                <p class="reference-links-label">"Verification Links:"</p>
                {items}
            </div>
        }
    });

    view! {
        <div class="reference-text">{info.text}</div>
        {links}
    }
}
