//! グラフの座標計算
//!
//! ダッシュボードのSVG棒グラフ・ドーナツグラフの形状をここで求め、描画側は値を流し込むだけにする。

use std::f64::consts::PI;

/// 系列色（順番に循環）
pub const PALETTE: [&str; 5] = ["#3b82f6", "#ef4444", "#f59e0b", "#10b981", "#6366f1"];

pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

const MAX_BAR_WIDTH: f64 = 40.0;

/// 棒グラフの1本
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// 棒の配置を計算（最大値が描画領域の高さになる）
pub fn bar_layout(data: &[(String, usize)], width: f64, height: f64) -> Vec<Bar> {
    if data.is_empty() {
        return vec![];
    }
    let max = data.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1) as f64;
    let slot = width / data.len() as f64;
    let bar_width = (slot * 0.6).min(MAX_BAR_WIDTH);

    data.iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let bar_height = *value as f64 / max * height;
            Bar {
                label: label.clone(),
                value: *value,
                x: i as f64 * slot + (slot - bar_width) / 2.0,
                y: height - bar_height,
                width: bar_width,
                height: bar_height,
            }
        })
        .collect()
}

/// Y軸の目盛り（0から最大値以上まで、4分割程度）
pub fn axis_ticks(max: usize) -> Vec<usize> {
    if max == 0 {
        return vec![0];
    }
    let step = max.div_ceil(4).max(1);
    (0..=max.div_ceil(step)).map(|i| i * step).collect()
}

/// ドーナツグラフの1区画
#[derive(Debug, Clone, PartialEq)]
pub struct DonutSegment {
    pub label: String,
    pub value: usize,
    pub color: &'static str,
    pub sweep_degrees: f64,
    pub path: String,
}

/// ドーナツの区画を計算
///
/// 区画が2つ以上のときは区画ごとに `pad_degrees` の隙間を空ける。角度は真上から時計回り。
pub fn donut_segments(
    data: &[(String, usize)],
    center: (f64, f64),
    inner_radius: f64,
    outer_radius: f64,
    pad_degrees: f64,
) -> Vec<DonutSegment> {
    let total: usize = data.iter().map(|(_, v)| *v).sum();
    if total == 0 {
        return vec![];
    }
    let visible = data.iter().filter(|(_, v)| *v > 0).count();
    let pad = if visible > 1 { pad_degrees } else { 0.0 };
    let available = 360.0 - pad * visible as f64;

    let mut start = -90.0;
    let mut segments = Vec::with_capacity(data.len());
    for (i, (label, value)) in data.iter().enumerate() {
        if *value == 0 {
            continue;
        }
        let sweep = *value as f64 / total as f64 * available;
        let end = start + sweep;
        segments.push(DonutSegment {
            label: label.clone(),
            value: *value,
            color: palette_color(i),
            sweep_degrees: sweep,
            path: arc_path(center, inner_radius, outer_radius, start, end),
        });
        start = end + pad;
    }
    segments
}

fn point(center: (f64, f64), radius: f64, degrees: f64) -> (f64, f64) {
    let radians = degrees * PI / 180.0;
    (center.0 + radius * radians.cos(), center.1 + radius * radians.sin())
}

fn arc_path(center: (f64, f64), inner: f64, outer: f64, start: f64, end: f64) -> String {
    // 360°ちょうどの円弧はSVGで描けないので僅かに詰める
    let end = if end - start >= 360.0 { start + 359.99 } else { end };
    let large_arc = if end - start > 180.0 { 1 } else { 0 };

    let (ox1, oy1) = point(center, outer, start);
    let (ox2, oy2) = point(center, outer, end);
    let (ix2, iy2) = point(center, inner, end);
    let (ix1, iy1) = point(center, inner, start);

    format!(
        "M {:.2} {:.2} A {outer} {outer} 0 {large_arc} 1 {:.2} {:.2} L {:.2} {:.2} A {inner} {inner} 0 {large_arc} 0 {:.2} {:.2} Z",
        ox1, oy1, ox2, oy2, ix2, iy2, ix1, iy1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(values: &[(&str, usize)]) -> Vec<(String, usize)> {
        values.iter().map(|(l, v)| (l.to_string(), *v)).collect()
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), "#3b82f6");
        assert_eq!(palette_color(5), "#3b82f6");
        assert_eq!(palette_color(6), "#ef4444");
    }

    #[test]
    fn test_bar_layout_scales_to_max() {
        let bars = bar_layout(&data(&[("Burnt", 2), ("Short Circuit", 4)]), 200.0, 100.0);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].height, 100.0);
        assert_eq!(bars[1].y, 0.0);
        assert_eq!(bars[0].height, 50.0);
        assert_eq!(bars[0].y, 50.0);
        // 棒は40px以下で枠の中央に置かれる
        assert_eq!(bars[0].width, 40.0);
        assert_eq!(bars[0].x, 30.0);
        assert_eq!(bars[1].x, 130.0);
    }

    #[test]
    fn test_bar_layout_empty() {
        assert!(bar_layout(&[], 200.0, 100.0).is_empty());
    }

    #[test]
    fn test_axis_ticks() {
        assert_eq!(axis_ticks(0), vec![0]);
        assert_eq!(axis_ticks(3), vec![0, 1, 2, 3]);
        assert_eq!(axis_ticks(8), vec![0, 2, 4, 6, 8]);
        assert_eq!(axis_ticks(9), vec![0, 3, 6, 9]);
    }

    #[test]
    fn test_donut_sweeps_sum_with_padding() {
        let segments = donut_segments(&data(&[("A", 1), ("B", 1), ("C", 2)]), (150.0, 150.0), 80.0, 120.0, 8.0);
        assert_eq!(segments.len(), 3);
        let total: f64 = segments.iter().map(|s| s.sweep_degrees).sum();
        assert!((total - (360.0 - 3.0 * 8.0)).abs() < 1e-9);
        assert!((segments[2].sweep_degrees - segments[0].sweep_degrees * 2.0).abs() < 1e-9);
        assert_eq!(segments[1].color, "#ef4444");
    }

    #[test]
    fn test_donut_single_segment_full_ring() {
        let segments = donut_segments(&data(&[("Burnt", 3)]), (150.0, 150.0), 80.0, 120.0, 8.0);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].sweep_degrees, 360.0);
        assert!(segments[0].path.starts_with("M 150.00 30.00 A 120 120 0 1 1"));
        assert!(segments[0].path.ends_with('Z'));
    }

    #[test]
    fn test_arc_path_quarter() {
        assert_eq!(
            arc_path((0.0, 0.0), 1.0, 2.0, -90.0, 0.0),
            "M 0.00 -2.00 A 2 2 0 0 1 2.00 0.00 L 1.00 0.00 A 1 1 0 0 0 0.00 -1.00 Z"
        );
    }

    #[test]
    fn test_donut_empty() {
        assert!(donut_segments(&data(&[("A", 0)]), (0.0, 0.0), 1.0, 2.0, 8.0).is_empty());
    }
}
