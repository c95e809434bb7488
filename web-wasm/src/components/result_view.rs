//! 検査結果の表示
//!
//! 1件の `InspectionResult` を描画するだけで、結果そのものは変更しない。
//! 参照規格の検索状態はこのコンポーネント内だけの一時的な状態。

use circuit_guard_common::{Defect, InspectionResult, Location, ReferenceInfo, Severity, REFERENCE_STANDARD};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{gateway, BrowserCredentials};
use crate::components::reference_panel::ReferencePanel;

/// スクロール先の要素ID
pub const RESULTS_ANCHOR_ID: &str = "inspection-results";

/// オーバーレイ枠の配置（画像に対するパーセント指定）
pub fn overlay_style(location: &Location) -> String {
    format!(
        "left: {}%; top: {}%; width: {}%; height: {}%;",
        location.x, location.y, location.width, location.height
    )
}

/// Critical は赤、それ以外は黄
pub fn severity_class(severity: Severity) -> &'static str {
    if severity.is_critical() {
        "critical"
    } else {
        "warning"
    }
}

/// 検索中でなければ検索中にして `true` を返す
///
/// 検索中は新しい検索を始めない。
fn begin_lookup(searching: RwSignal<bool>) -> bool {
    if searching.get_untracked() {
        return false;
    }
    searching.set(true);
    true
}

#[component]
pub fn ResultView(result: InspectionResult) -> impl IntoView {
    let credentials = expect_context::<BrowserCredentials>();
    let searching = RwSignal::new(false);
    let reference = RwSignal::new(None::<ReferenceInfo>);

    let lookup = move |query: String| {
        if !begin_lookup(searching) {
            return;
        }
        spawn_local(async move {
            match gateway(credentials).lookup_reference(&query).await {
                Ok(info) => {
                    reference.try_set(Some(info));
                }
                Err(err) => log::error!("reference lookup failed for '{}': {}", query, err),
            }
            searching.try_set(false);
        });
    };

    let verdict_class = if result.is_pass() { "verdict-card pass" } else { "verdict-card fail" };
    let anomaly_count = result.defects.len();
    let batch_id = result.batch_id();
    let status_label = result.status.to_string();

    let overlays = result
        .defects
        .iter()
        .map(|defect| {
            let class = severity_class(defect.severity);
            view! {
                <div class=format!("defect-box {}", class) style=overlay_style(&defect.location)>
                    <span class=format!("defect-label {}", class)>{defect.overlay_label()}</span>
                </div>
            }
        })
        .collect_view();

    let catalog = if result.defects.is_empty() {
        view! { <div class="catalog-empty">"Unit conforms to quality standards."</div> }.into_any()
    } else {
        result
            .defects
            .iter()
            .map(|defect| view! { <CatalogEntry defect=defect.clone() searching=searching on_reference=lookup /> })
            .collect_view()
            .into_any()
    };

    view! {
        <div id=RESULTS_ANCHOR_ID class="results-grid">
            <div class="results-main">
                <div class="visualizer">
                    {result.image.clone().map(|src| view! { <img src=src alt="Inspection Source" /> })}
                    {overlays}
                </div>
                <div class="summary-card">
                    <h4>"AI Conclusion"</h4>
                    <p>{result.summary.clone()}</p>
                </div>
            </div>

            <div class="results-side">
                <div class=verdict_class>
                    <div class="verdict-header">
                        <span class="verdict-caption">"Quality Gate Status"</span>
                        <span class="verdict-badge">{status_label}</span>
                    </div>
                    <div class="verdict-count">
                        {anomaly_count} <span class="verdict-unit">"ANOMALIES"</span>
                    </div>
                    <p class="batch-id">"Batch ID: " {batch_id}</p>
                </div>

                <div class="catalog">
                    <div class="catalog-header">
                        <h4>"Defect Catalog"</h4>
                        <span class="catalog-standard">{format!("{}G STD", REFERENCE_STANDARD)}</span>
                    </div>
                    <div class="catalog-body">{catalog}</div>
                </div>

                <ReferencePanel searching=searching reference=reference />
            </div>
        </div>
    }
}

#[component]
fn CatalogEntry<F>(defect: Defect, searching: RwSignal<bool>, on_reference: F) -> impl IntoView
where
    F: Fn(String) + Copy + 'static,
{
    let query = defect.reference_query();

    view! {
        <div class="catalog-entry">
            <div class="catalog-entry-header">
                <span class="catalog-component">{defect.component.clone()}</span>
                <span class=format!("severity-badge {}", severity_class(defect.severity))>
                    {defect.severity.to_string()}
                </span>
            </div>
            <p class="catalog-description">{defect.description.clone()}</p>
            <button
                class="reference-button"
                disabled=move || searching.get()
                on:click=move |_| on_reference(query.clone())>
                "Reference Standards"
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_style_uses_percentages() {
        let location = Location { x: 12.5, y: 40.0, width: 10.0, height: 5.25 };
        assert_eq!(overlay_style(&location), "left: 12.5%; top: 40%; width: 10%; height: 5.25%;");
    }

    #[test]
    fn test_only_critical_is_red() {
        assert_eq!(severity_class(Severity::Critical), "critical");
        assert_eq!(severity_class(Severity::Major), "warning");
        assert_eq!(severity_class(Severity::Minor), "warning");
        assert_eq!(severity_class(Severity::Info), "warning");
    }

    #[test]
    fn test_lookup_not_restarted_while_searching() {
        let owner = Owner::new();
        owner.with(|| {
            let searching = RwSignal::new(false);
            assert!(begin_lookup(searching));
            assert!(searching.get_untracked());
            assert!(!begin_lookup(searching));

            searching.set(false);
            assert!(begin_lookup(searching));
        });
    }
}
