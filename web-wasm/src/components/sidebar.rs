//! サイドバー（デスクトップ）とモバイル用ヘッダー・メニュー

use circuit_guard_common::{SessionAction, SessionState, ViewMode};
use leptos::prelude::*;

use crate::api::BrowserCredentials;
use crate::components::settings_panel::SettingsPanel;

fn nav_icon(view: ViewMode) -> &'static str {
    match view {
        ViewMode::Inspection => "◉",
        ViewMode::Dashboard => "▦",
        ViewMode::History => "☰",
    }
}

#[component]
fn NavItem(target: ViewMode, set_menu_open: WriteSignal<bool>) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let is_active = move || session.with(|s| s.view() == target);

    view! {
        <button
            class="nav-item"
            class:active=is_active
            on:click=move |_| {
                session.update(|s| s.apply(SessionAction::Navigate(target)));
                set_menu_open.set(false);
            }
        >
            <span class="nav-icon">{nav_icon(target)}</span>
            <span class="nav-label">{target.label()}</span>
        </button>
    }
}

#[component]
fn NavList(set_menu_open: WriteSignal<bool>) -> impl IntoView {
    ViewMode::ALL
        .into_iter()
        .map(|target| view! { <NavItem target=target set_menu_open=set_menu_open /> })
        .collect_view()
}

/// 認証情報の有無を示すステータス表示
#[component]
fn SystemStatus() -> impl IntoView {
    let credentials = expect_context::<BrowserCredentials>();
    let ready = move || credentials.is_configured();

    view! {
        <div class="system-status">
            <div class="status-indicator">
                <span class="status-dot" class:ready=ready />
                <span class="status-label">
                    {move || if ready() { "System Ready" } else { "API Key Required" }}
                </span>
            </div>
            <span class="status-meta">"GPU Enc: ON"</span>
        </div>
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let (menu_open, set_menu_open) = signal(false);

    view! {
        <aside class="sidebar">
            <div class="brand">
                <div class="brand-mark">"⌁"</div>
                <div>
                    <h1>"CircuitGuard"</h1>
                    <p class="brand-sub">"VISION ANALYTICS v1.0"</p>
                </div>
            </div>
            <nav class="nav">
                <NavList set_menu_open=set_menu_open />
            </nav>
            <div class="sidebar-footer">
                <SettingsPanel />
                <SystemStatus />
            </div>
        </aside>

        <div class="mobile-header">
            <span class="brand-title">"CircuitGuard"</span>
            <button class="menu-button" on:click=move |_| set_menu_open.set(true)>"☰"</button>
        </div>

        <Show when=move || menu_open.get()>
            <div class="mobile-overlay">
                <div class="mobile-menu">
                    <div class="mobile-menu-header">
                        <span class="brand-title">"Menu"</span>
                        <button class="menu-button" on:click=move |_| set_menu_open.set(false)>"✕"</button>
                    </div>
                    <nav class="nav">
                        <NavList set_menu_open=set_menu_open />
                    </nav>
                    <SettingsPanel />
                    <SystemStatus />
                </div>
            </div>
        </Show>
    }
}
