//! Visualization utilities: render the state→count pie to an in-memory canvas, **PNG** or **SVG**.
//!
//! - Slice colors cycle through a five-color palette (translucent fill, opaque border)
//! - Slices start at 12 o'clock and run clockwise, in first-occurrence order
//! - Legend band on top (`State (count)`), only drawn when a font is registered
//! - An empty tally renders a blank white canvas, never an error

pub mod fonts;
pub mod legend;
pub mod palette;

use crate::stats::StateCounts;
use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::Path;

/// Gap between the pie and the edge of its drawing area.
const PIE_PADDING_PX: f64 = 12.0;
/// Upper bound for the angular step when approximating arcs.
const ARC_STEP_RAD: f64 = std::f64::consts::PI / 90.0;

/// RGB pixel surface the dashboard chart is drawn on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    /// White canvas of `width` × `height` pixels.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![255; width as usize * height as usize * 3],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major RGB8 bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// True when every pixel is white.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|b| *b == 255)
    }

    /// RGB value at `(x, y)`, if inside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
    }
}

/// Draw the pie chart for `counts` onto any plotters drawing area.
///
/// `labels` toggles the legend band; it must only be `true` when a font is registered
/// (see [`fonts::ensure_fonts_registered`]), otherwise text drawing fails.
pub fn draw_pie<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    counts: &StateCounts,
    labels: bool,
) -> Result<()> {
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    if counts.total() == 0 {
        return Ok(());
    }

    let items: Vec<(String, usize)> = counts
        .iter()
        .map(|(state, n)| (state.to_string(), n))
        .collect();

    let (w, h) = root.dim_in_pixel();
    if labels {
        let layout = legend::layout(&items, w, h / 2);
        let band = layout.height_px();
        let (legend_area, pie_area) = root.split_vertically(band as i32);
        legend::draw_legend(&legend_area, &layout)?;
        draw_slices(&pie_area, &items, counts.total())
    } else {
        draw_slices(root, &items, counts.total())
    }
}

fn draw_slices<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    items: &[(String, usize)],
    total: usize,
) -> Result<()> {
    let (w, h) = area.dim_in_pixel();
    let cx = w as f64 / 2.0;
    let cy = h as f64 / 2.0;
    let radius = (w.min(h) as f64 / 2.0 - PIE_PADDING_PX).max(1.0);

    let mut start = -FRAC_PI_2;
    for (idx, (_, n)) in items.iter().enumerate() {
        if *n == 0 {
            continue;
        }
        let sweep = TAU * (*n as f64) / (total as f64);
        let outline = slice_outline((cx, cy), radius, start, sweep);

        area.draw(&Polygon::new(outline.clone(), palette::fill_color(idx).filled()))
            .map_err(|e| anyhow!("{:?}", e))?;

        let mut border = outline;
        if let Some(first) = border.first().copied() {
            border.push(first);
        }
        area.draw(&PathElement::new(
            border,
            palette::border_color(idx).stroke_width(1),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;

        start += sweep;
    }
    Ok(())
}

/// Pixel outline of one slice. A full circle omits the center so no seam is drawn.
fn slice_outline(center: (f64, f64), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = ((sweep / ARC_STEP_RAD).ceil() as usize).max(2);
    let full = sweep >= TAU - 1e-9;
    let mut pts = Vec::with_capacity(steps + 2);
    if !full {
        pts.push((center.0.round() as i32, center.1.round() as i32));
    }
    for i in 0..=steps {
        let theta = start + sweep * (i as f64) / (steps as f64);
        pts.push((
            (center.0 + radius * theta.cos()).round() as i32,
            (center.1 + radius * theta.sin()).round() as i32,
        ));
    }
    pts
}

/// Render the pie into a fresh in-memory canvas.
pub fn render_canvas(
    counts: &StateCounts,
    width: u32,
    height: u32,
    labels: bool,
) -> Result<Canvas> {
    let mut canvas = Canvas::blank(width, height);
    {
        let root = BitMapBackend::with_buffer(&mut canvas.pixels, (width, height))
            .into_drawing_area();
        draw_pie(&root, counts, labels)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(canvas)
}

/// Render the pie to a file; `.svg` selects the SVG backend, anything else PNG.
pub fn plot_pie<P: AsRef<Path>>(
    counts: &StateCounts,
    out_path: P,
    width: u32,
    height: u32,
    labels: bool,
) -> Result<()> {
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_pie(&root, counts, labels)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_pie(&root, counts, labels)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_slice_starts_at_center() {
        let pts = slice_outline((50.0, 50.0), 40.0, -FRAC_PI_2, FRAC_PI_2);
        assert_eq!(pts[0], (50, 50));
        // first arc point sits straight above the center
        assert_eq!(pts[1], (50, 10));
        // quarter turn clockwise ends at 3 o'clock
        assert_eq!(*pts.last().unwrap(), (90, 50));
    }

    #[test]
    fn full_slice_has_no_center_vertex() {
        let pts = slice_outline((50.0, 50.0), 40.0, -FRAC_PI_2, TAU);
        assert!(!pts.contains(&(50, 50)));
    }
}
