//! 検査履歴

use chrono::{DateTime, Local, TimeZone, Utc};
use circuit_guard_common::{InspectionResult, SessionState};
use leptos::prelude::*;

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// 指定タイムゾーンでの表示用タイムスタンプ
pub fn format_timestamp<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string()
}

/// 各行に記録順の通し番号を付ける
///
/// 履歴は先頭に追加されるだけなので、古い順に数えた番号は追加後も同じ結果を指す。
/// 同じ時刻の結果が並んでも番号は重複しない。
pub fn numbered_rows(history: &[InspectionResult]) -> Vec<(usize, InspectionResult)> {
    let len = history.len();
    history
        .iter()
        .enumerate()
        .map(|(index, result)| (len - 1 - index, result.clone()))
        .collect()
}

#[component]
fn HistoryRow(result: InspectionResult) -> impl IntoView {
    let dot_class = if result.is_pass() { "status-dot pass" } else { "status-dot fail" };

    view! {
        <div class="history-row">
            <div class="history-thumb">
                {result.image.clone().map(|src| view! { <img src=src alt="Thumbnail" /> })}
            </div>
            <div class="history-fields">
                <div>
                    <span class="field-caption">"Timestamp"</span>
                    <p class="history-timestamp">{format_timestamp(&result.timestamp, &Local)}</p>
                </div>
                <div>
                    <span class="field-caption">"Status"</span>
                    <div class="history-status">
                        <span class=dot_class />
                        <span>{result.status.to_string()}</span>
                    </div>
                </div>
                <div class="history-summary">
                    <span class="field-caption">"Summary"</span>
                    <p>{result.summary.clone()}</p>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn HistoryPanel() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let is_empty = move || session.with(|s| s.history().is_empty());

    view! {
        <div class="history-panel">
            <header class="panel-header">
                <div>
                    <h2>"Inspection History"</h2>
                    <p class="panel-lead">"Historical audit log for all visual inspection sessions."</p>
                </div>
            </header>

            <Show
                when=move || !is_empty()
                fallback=|| view! {
                    <div class="empty-state">
                        <h3>"No Records Found"</h3>
                        <p>"Start a new inspection to populate the audit trail."</p>
                    </div>
                }
            >
                <div class="history-list">
                    <For
                        each=move || session.with(|s| numbered_rows(s.history()))
                        key=|(sequence, _)| *sequence
                        children=|(_, result)| view! { <HistoryRow result=result /> }
                    />
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn sample(summary: &str, timestamp: DateTime<Utc>) -> InspectionResult {
        InspectionResult {
            status: circuit_guard_common::InspectionStatus::Pass,
            summary: summary.to_string(),
            defects: vec![],
            timestamp,
            image: None,
        }
    }

    #[test]
    fn test_same_timestamp_rows_get_distinct_numbers() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 9, 14, 5, 7).unwrap();
        let rows = numbered_rows(&[sample("second", ts), sample("first", ts)]);
        assert_eq!(rows[0].0, 1);
        assert_eq!(rows[1].0, 0);
    }

    #[test]
    fn test_numbers_stable_after_new_record() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 9, 14, 5, 7).unwrap();
        let before = numbered_rows(&[sample("b", ts), sample("a", ts)]);
        let after = numbered_rows(&[sample("c", ts), sample("b", ts), sample("a", ts)]);

        for (sequence, result) in &before {
            let matching = after.iter().find(|(s, _)| s == sequence).map(|(_, r)| r);
            assert_eq!(matching, Some(result));
        }
        assert_eq!(after[0].0, 2);
        assert_eq!(after[0].1.summary, "c");
    }

    #[test]
    fn test_format_timestamp_in_utc() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(format_timestamp(&ts, &Utc), "2026/03/09 14:05:07");
    }

    #[test]
    fn test_format_timestamp_applies_offset() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 9, 23, 30, 0).unwrap();
        let jst = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(format_timestamp(&ts, &jst), "2026/03/10 08:30:00");
    }
}
