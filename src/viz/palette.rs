//! Slice colors: five base hues, filled at 20% opacity with a solid 1px border.

use plotters::prelude::*;

/// Order: pink, blue, yellow, teal, purple.
const BASE5: [RGBColor; 5] = [
    RGBColor(255, 99, 132),  // pink   (#FF6384)
    RGBColor(54, 162, 235),  // blue   (#36A2EB)
    RGBColor(255, 206, 86),  // yellow (#FFCE56)
    RGBColor(75, 192, 192),  // teal   (#4BC0C0)
    RGBColor(153, 102, 255), // purple (#9966FF)
];

const FILL_ALPHA: f64 = 0.2;

/// Translucent slice fill for series `idx` (cycles after five).
#[inline]
pub fn fill_color(idx: usize) -> RGBAColor {
    BASE5[idx % BASE5.len()].mix(FILL_ALPHA)
}

/// Opaque slice border for series `idx` (cycles after five).
#[inline]
pub fn border_color(idx: usize) -> RGBAColor {
    BASE5[idx % BASE5.len()].to_rgba()
}

/// The fill as it appears over a white background, as RGB bytes.
pub fn fill_over_white(idx: usize) -> [u8; 3] {
    let RGBColor(r, g, b) = BASE5[idx % BASE5.len()];
    let blend = |c: u8| (255.0 + (c as f64 - 255.0) * FILL_ALPHA).round() as u8;
    [blend(r), blend(g), blend(b)]
}
