//! 検査パネル
//!
//! ファイル・カメラ・デモ画像のいずれかから画像を取得し、解析結果を履歴に記録する。
//! 表示する結果は常に履歴の先頭なので、他のビューから戻っても同じものが出る。

use std::future::Future;

use circuit_guard_common::{Error, Result, SessionState};
use gloo::timers::callback::Timeout;
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{HtmlInputElement, ScrollBehavior, ScrollIntoViewOptions};

use crate::api::{gateway, BrowserCredentials};
use crate::capture::{load_remote_image, read_file, DemoImage, DEMO_IMAGES};
use crate::components::{
    camera_modal::CameraModal,
    error_banner::ErrorBanner,
    result_view::{ResultView, RESULTS_ANCHOR_ID},
};

const SCROLL_DELAY_MS: u32 = 100;

/// 解析の実行に必要なシグナル一式
#[derive(Clone, Copy)]
struct Inspector {
    session: RwSignal<SessionState>,
    credentials: BrowserCredentials,
    loading: RwSignal<bool>,
    error: RwSignal<Option<Error>>,
}

impl Inspector {
    /// 画像の取得から解析・記録までを実行する
    ///
    /// パネルが破棄された後に完了しても、結果は履歴に記録する。
    fn inspect<F>(self, image: F)
    where
        F: Future<Output = Result<String>> + 'static,
    {
        self.loading.set(true);
        self.error.set(None);

        spawn_local(async move {
            let outcome = match image.await {
                Ok(data_url) => gateway(self.credentials).analyze(&data_url).await,
                Err(err) => Err(err),
            };

            match self.session.try_update(|s| s.record_outcome(outcome)) {
                Some(Ok(())) => scroll_to_results(),
                Some(Err(err)) => {
                    log::error!("inspection failed: {}", err);
                    self.error.try_set(Some(err));
                }
                None => log::warn!("session disposed before the inspection finished"),
            }
            self.loading.try_set(false);
        });
    }
}

fn scroll_to_results() {
    Timeout::new(SCROLL_DELAY_MS, || {
        if let Some(element) = gloo::utils::document().get_element_by_id(RESULTS_ANCHOR_ID) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            element.scroll_into_view_with_scroll_into_view_options(&options);
        }
    })
    .forget();
}

#[component]
pub fn InspectionPanel() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let inspector = Inspector {
        session,
        credentials: expect_context::<BrowserCredentials>(),
        loading: RwSignal::new(false),
        error: RwSignal::new(None),
    };
    let loading = inspector.loading;
    let error = inspector.error;
    let camera_open = RwSignal::new(false);
    let file_input = NodeRef::<Input>::new();

    let latest = Memo::new(move |_| session.with(|s| s.latest().cloned()));
    let busy = move || loading.get() || camera_open.get();

    let on_file_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let file = input.files().and_then(|files| files.get(0));
        // 同じファイルを再選択しても change が発火するように
        input.set_value("");
        if let Some(file) = file {
            inspector.inspect(async move { read_file(&file).await });
        }
    };

    let open_file_picker = move |_| {
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    let open_camera = move |_| {
        error.set(None);
        camera_open.set(true);
    };

    let on_capture = move |data_url: String| inspector.inspect(async move { Ok(data_url) });

    view! {
        <div class="inspection-panel">
            <header class="panel-header">
                <div>
                    <div class="panel-tags">
                        <span class="tag-primary">"AI-VISION READY"</span>
                        <span class="tag-mono">"NODE_01 // ACTIVE"</span>
                    </div>
                    <h2>"Visual Inspector"</h2>
                    <p class="panel-lead">"Identify component defects using OSHW manufacturer photo datasets."</p>
                </div>
                <div class="panel-actions">
                    <input
                        type="file"
                        accept="image/*"
                        class="hidden"
                        node_ref=file_input
                        on:change=on_file_change
                    />
                    <button class="btn btn-secondary" disabled=busy on:click=open_file_picker>
                        "Upload Batch"
                    </button>
                    <button class="btn btn-primary" disabled=busy on:click=open_camera>
                        "Live Analysis"
                    </button>
                </div>
            </header>

            <Show when=move || camera_open.get()>
                <CameraModal open=camera_open error=error on_capture=on_capture />
            </Show>

            <Show when=move || !busy()>
                <DemoSamples on_select=move |demo: DemoImage| {
                    inspector.inspect(async move { load_remote_image(demo.url).await })
                } />
            </Show>

            <Show when=move || loading.get()>
                <div class="loading-state">
                    <div class="spinner" />
                    <h3>"Synthesizing Geometry..."</h3>
                    <p class="loading-sub">"Running Inference Engine v4.2"</p>
                </div>
            </Show>

            <ErrorBanner error=error />

            <Show when=move || !loading.get()>
                {move || latest.get().map(|result| view! { <ResultView result=result /> })}
            </Show>
        </div>
    }
}

#[component]
fn DemoSamples<F>(on_select: F) -> impl IntoView
where
    F: Fn(DemoImage) + Copy + 'static,
{
    let cards = DEMO_IMAGES
        .iter()
        .copied()
        .map(|demo| {
            view! {
                <button class="demo-card" on:click=move |_| on_select(demo)>
                    <div class="demo-thumb">
                        <img src=demo.url alt=demo.name />
                    </div>
                    <span class="demo-caption">"Manufacturer Profile"</span>
                    <h4>{demo.name}</h4>
                    <p>{demo.description}</p>
                    <div class="demo-hover">"ANALYZE SAMPLE"</div>
                </button>
            }
        })
        .collect_view();

    view! {
        <section class="demo-section">
            <h3>"Load OSHW Samples"</h3>
            <div class="demo-grid">{cards}</div>
        </section>
    }
}
