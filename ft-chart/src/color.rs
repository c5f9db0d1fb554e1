//! Green to yellow to red color scale for normalized keys.

/// Scale stops as RGB, evenly spaced over [0, 1].
const STOPS: [(f64, f64, f64); 3] = [(0.0, 128.0, 0.0), (255.0, 255.0, 0.0), (255.0, 0.0, 0.0)];

/// Line colors for series that have no fixed color of their own.
const SERIES_PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Color of the `position`-th series, cycling through the palette.
pub fn series_color(position: usize) -> &'static str {
    SERIES_PALETTE[position % SERIES_PALETTE.len()]
}

/// Map a key in [0, 1] to `#rrggbb`. Keys outside the range are clamped and
/// NaN maps to the low end.
pub fn color_for_key(key: f64) -> String {
    let key = if key.is_nan() { 0.0 } else { key.clamp(0.0, 1.0) };
    let scaled = key * (STOPS.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(STOPS.len() - 2);
    let t = scaled - lower as f64;
    let (r0, g0, b0) = STOPS[lower];
    let (r1, g1, b1) = STOPS[lower + 1];
    let channel = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(r0, r1),
        channel(g0, g1),
        channel(b0, b1)
    )
}
