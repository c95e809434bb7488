//! メインアプリケーションコンポーネント

use circuit_guard_common::{SessionState, ViewMode};
use leptos::prelude::*;

use crate::api::BrowserCredentials;
use crate::components::{
    dashboard::Dashboard,
    history_panel::HistoryPanel,
    inspection_panel::InspectionPanel,
    sidebar::Sidebar,
};

/// メインアプリケーションコンポーネント
///
/// セッション状態と認証情報をコンテキストとして配下に渡す。
#[component]
pub fn App() -> impl IntoView {
    let session = RwSignal::new(SessionState::default());
    provide_context(session);
    provide_context(BrowserCredentials::new(RwSignal::new(String::new())));

    // 履歴の更新ではパネルを作り直さない
    let view_mode = Memo::new(move |_| session.with(SessionState::view));

    view! {
        <div class="app-shell">
            <Sidebar />
            <main class="main-content">
                <div class="content">
                    {move || match view_mode.get() {
                        ViewMode::Inspection => view! { <InspectionPanel /> }.into_any(),
                        ViewMode::Dashboard => view! { <Dashboard /> }.into_any(),
                        ViewMode::History => view! { <HistoryPanel /> }.into_any(),
                    }}
                </div>
            </main>
        </div>
    }
}
