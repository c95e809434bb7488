//! 集計ダッシュボード

use circuit_guard_common::chart::{axis_ticks, bar_layout, donut_segments, palette_color};
use circuit_guard_common::{SessionState, Statistics};
use leptos::prelude::*;

const BAR_CHART_WIDTH: f64 = 480.0;
const BAR_CHART_HEIGHT: f64 = 240.0;
const AXIS_GUTTER: f64 = 32.0;
const LABEL_GUTTER: f64 = 28.0;

const DONUT_CENTER: (f64, f64) = (150.0, 150.0);
const DONUT_INNER_RADIUS: f64 = 80.0;
const DONUT_OUTER_RADIUS: f64 = 120.0;
const DONUT_PADDING_DEGREES: f64 = 8.0;

#[component]
fn StatCard(label: &'static str, value: String, unit: &'static str, accent: &'static str) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class=format!("stat-accent {}", accent) />
            <p class="stat-label">{label}</p>
            <div class="stat-value">
                <h3>{value}</h3>
                <span class="stat-unit">{unit}</span>
            </div>
        </div>
    }
}

/// Y座標（最大値が上端）
fn tick_offset(tick: usize, max: usize) -> f64 {
    if max == 0 {
        return BAR_CHART_HEIGHT;
    }
    BAR_CHART_HEIGHT - tick as f64 / max as f64 * BAR_CHART_HEIGHT
}

#[component]
fn DistributionChart(data: Vec<(String, usize)>) -> impl IntoView {
    let max = data.iter().map(|(_, v)| *v).max().unwrap_or(0);
    let grid = axis_ticks(max)
        .into_iter()
        .filter(|tick| *tick <= max)
        .map(|tick| {
            let y = format!("{:.1}", tick_offset(tick, max));
            view! {
                <g class="chart-grid">
                    <line x1="0" x2=BAR_CHART_WIDTH.to_string() y1=y.clone() y2=y.clone() />
                    <text class="chart-axis" x="-8" y=y text-anchor="end">{tick}</text>
                </g>
            }
        })
        .collect_view();

    let bars = bar_layout(&data, BAR_CHART_WIDTH, BAR_CHART_HEIGHT)
        .into_iter()
        .map(|bar| {
            let label_x = format!("{:.1}", bar.x + bar.width / 2.0);
            view! {
                <g class="chart-bar">
                    <rect
                        x=format!("{:.1}", bar.x)
                        y=format!("{:.1}", bar.y)
                        width=format!("{:.1}", bar.width)
                        height=format!("{:.1}", bar.height)
                        rx="6"
                        fill=palette_color(0)
                    />
                    <text class="chart-value" x=label_x.clone() y=format!("{:.1}", bar.y - 6.0) text-anchor="middle">
                        {bar.value}
                    </text>
                    <text class="chart-axis" x=label_x y=(BAR_CHART_HEIGHT + 18.0).to_string() text-anchor="middle">
                        {bar.label}
                    </text>
                </g>
            }
        })
        .collect_view();

    let view_box = format!(
        "{} -24 {} {}",
        -AXIS_GUTTER,
        BAR_CHART_WIDTH + AXIS_GUTTER,
        BAR_CHART_HEIGHT + LABEL_GUTTER + 24.0
    );

    view! {
        <svg class="bar-chart" viewBox=view_box preserveAspectRatio="xMidYMid meet">
            {grid}
            {bars}
        </svg>
    }
}

#[component]
fn FailureVectors(data: Vec<(String, usize)>) -> impl IntoView {
    let segments = donut_segments(
        &data,
        DONUT_CENTER,
        DONUT_INNER_RADIUS,
        DONUT_OUTER_RADIUS,
        DONUT_PADDING_DEGREES,
    );

    let legend = segments
        .iter()
        .map(|segment| {
            view! {
                <div class="legend-item">
                    <span class="legend-swatch" style=format!("background-color: {}", segment.color) />
                    <span class="legend-label">{format!("{} ({})", segment.label, segment.value)}</span>
                </div>
            }
        })
        .collect_view();

    let arcs = segments
        .into_iter()
        .map(|segment| {
            view! {
                <path d=segment.path fill=segment.color stroke="none" />
            }
        })
        .collect_view();

    view! {
        <svg class="donut-chart" viewBox="0 0 300 300">
            {arcs}
        </svg>
        <div class="chart-legend">{legend}</div>
    }
}

#[component]
pub fn Dashboard() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let stats = Memo::new(move |_| session.with(SessionState::statistics));

    let cards = move || {
        let stats = stats.get();
        view! {
            <StatCard label="Total Throughput" value=stats.total_inspected.to_string() unit="Units" accent="accent-blue" />
            <StatCard label="Yield Rate" value=stats.pass_rate().to_string() unit="%" accent="accent-green" />
            <StatCard label="Failed Inspection" value=stats.fail_count.to_string() unit="Units" accent="accent-red" />
            <StatCard label="Defect Density" value=stats.distinct_defect_types().to_string() unit="Types" accent="accent-amber" />
        }
    };

    view! {
        <div class="dashboard">
            <header class="panel-header">
                <div>
                    <h2>"Analytics Dashboard"</h2>
                    <p class="panel-lead">"Aggregate performance metrics across current production batch."</p>
                </div>
            </header>

            <div class="stat-grid">{cards}</div>

            <div class="chart-grid-2">
                <div class="chart-card">
                    <h4>"Defect Distribution"</h4>
                    {move || view! { <DistributionChart data=stats.with(Statistics::distribution) /> }}
                </div>
                <div class="chart-card">
                    <h4>"Top Failure Vectors"</h4>
                    {move || view! { <FailureVectors data=stats.with(Statistics::distribution) /> }}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_offset_spans_chart_height() {
        assert_eq!(tick_offset(0, 4), BAR_CHART_HEIGHT);
        assert_eq!(tick_offset(4, 4), 0.0);
        assert_eq!(tick_offset(2, 4), BAR_CHART_HEIGHT / 2.0);
    }

    #[test]
    fn test_tick_offset_without_data() {
        assert_eq!(tick_offset(0, 0), BAR_CHART_HEIGHT);
    }
}
