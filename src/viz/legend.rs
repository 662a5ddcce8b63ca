//! Legend band drawn above the pie: a title row, then one swatch and
//! `State (count, share)` label per slice, packed greedily into centered rows.

use super::palette::{border_color, fill_color};
use anyhow::{Result, anyhow};
use num_format::{Locale, ToFormattedString};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontFamily;

// Layout constants (estimator and drawing share them)
const FONT_PX: u32 = 13;
const SWATCH_W: i32 = 30;
const SWATCH_H: i32 = 12;
const SWATCH_TO_TEXT: i32 = 8;
const ITEM_GAP: i32 = 16;
const ROW_H: i32 = 22;
const PAD: i32 = 10;
const MAX_LABEL_PX: u32 = 220;

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Cut `text` to fit `max_px`, ending in a single ellipsis when shortened.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        out.push(ch);
        if estimate_text_width_px(&out, font_px) + estimate_text_width_px("…", font_px) > max_px {
            out.pop();
            break;
        }
    }
    out.push('…');
    out
}

/// Caption drawn centered in the first row of the band.
pub const TITLE: &str = "Percentage of Universities";

/// Legend label for one slice, e.g. `Maharashtra (1,204, 12.5%)`.
pub fn item_label(state: &str, count: usize, total: usize) -> String {
    let pct = if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    };
    format!(
        "{} ({}, {:.1}%)",
        state,
        count.to_formatted_string(&Locale::en),
        pct
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedItem {
    pub label: String,
    /// Palette index of the swatch; `None` for the "+N more" entry.
    pub color_idx: Option<usize>,
    /// Top-left corner of the row cell.
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegendLayout {
    pub items: Vec<PlacedItem>,
    /// Item rows, not counting the title row.
    pub rows: usize,
    /// Slices folded into the trailing "+N more" entry.
    pub hidden: usize,
}

impl LegendLayout {
    /// Height of the legend band in pixels (0 when there is nothing to show).
    pub fn height_px(&self) -> u32 {
        if self.rows == 0 {
            0
        } else {
            (PAD * 2 + (self.rows as i32 + 1) * ROW_H) as u32
        }
    }
}

type RowItem = (String, Option<usize>, i32);

fn row_width(row: &[RowItem]) -> i32 {
    if row.is_empty() {
        return 0;
    }
    row.iter().map(|(_, _, w)| *w).sum::<i32>() + ITEM_GAP * (row.len() as i32 - 1)
}

/// Pack legend items into centered rows that fit `width` pixels and `max_height`
/// pixels including the title row. Items that do not fit are folded into a
/// final `+N more` entry.
pub fn layout(items: &[(String, usize)], width: u32, max_height: u32) -> LegendLayout {
    let max_rows = ((max_height as i32 - 2 * PAD) / ROW_H - 1).max(0) as usize;
    if items.is_empty() || max_rows == 0 {
        return LegendLayout::default();
    }

    let width = width as i32;
    let usable = (width - 2 * PAD).max(SWATCH_W);
    let total: usize = items.iter().map(|(_, n)| n).sum();

    // Pass 1: greedy row packing
    let mut rows: Vec<Vec<RowItem>> = Vec::new();
    let mut cur: Vec<RowItem> = Vec::new();
    let mut cur_w = 0;
    for (idx, (state, count)) in items.iter().enumerate() {
        let label = truncate_to_width(&item_label(state, *count, total), FONT_PX, MAX_LABEL_PX);
        let item_w = SWATCH_W + SWATCH_TO_TEXT + estimate_text_width_px(&label, FONT_PX) as i32;
        let needed = if cur.is_empty() { item_w } else { cur_w + ITEM_GAP + item_w };
        if !cur.is_empty() && needed > usable {
            rows.push(std::mem::take(&mut cur));
            cur_w = item_w;
        } else {
            cur_w = needed;
        }
        cur.push((label, Some(idx), item_w));
    }
    if !cur.is_empty() {
        rows.push(cur);
    }

    // Pass 2: fold the overflow into "+N more" on the last row that fits
    let mut hidden = 0;
    if rows.len() > max_rows {
        rows.truncate(max_rows);
        let mut shown: usize = rows.iter().map(Vec::len).sum();
        if let Some(last) = rows.last_mut() {
            loop {
                hidden = items.len() - shown;
                let more = format!("+{} more", hidden);
                let more_w = estimate_text_width_px(&more, FONT_PX) as i32;
                if last.is_empty() || row_width(last) + ITEM_GAP + more_w <= usable {
                    last.push((more, None, more_w));
                    break;
                }
                last.pop();
                shown -= 1;
            }
        }
    }

    // Pass 3: center each row below the title
    let mut placed = Vec::with_capacity(items.len());
    for (r, row) in rows.iter().enumerate() {
        let mut x = ((width - row_width(row)) / 2).max(PAD);
        let y = PAD + (r as i32 + 1) * ROW_H;
        for (label, color_idx, w) in row {
            placed.push(PlacedItem {
                label: label.clone(),
                color_idx: *color_idx,
                x,
                y,
            });
            x += w + ITEM_GAP;
        }
    }

    LegendLayout {
        items: placed,
        rows: rows.len(),
        hidden,
    }
}

/// Draw a computed legend layout. Requires a registered font.
pub fn draw_legend<DB: DrawingBackend>(
    legend_area: &DrawingArea<DB, Shift>,
    layout: &LegendLayout,
) -> Result<()> {
    if layout.rows == 0 {
        return Ok(());
    }
    let label_style: TextStyle =
        TextStyle::from((FontFamily::SansSerif, FONT_PX)).pos(Pos::new(HPos::Left, VPos::Center));
    let title_style: TextStyle = TextStyle::from((FontFamily::SansSerif, FONT_PX))
        .pos(Pos::new(HPos::Center, VPos::Center));

    let (w, _) = legend_area.dim_in_pixel();
    legend_area
        .draw(&Text::new(TITLE, (w as i32 / 2, PAD + ROW_H / 2), title_style))
        .map_err(|e| anyhow!("{:?}", e))?;

    for item in &layout.items {
        let mid_y = item.y + ROW_H / 2;
        let Some(color_idx) = item.color_idx else {
            legend_area
                .draw(&Text::new(item.label.as_str(), (item.x, mid_y), label_style.clone()))
                .map_err(|e| anyhow!("{:?}", e))?;
            continue;
        };
        let top_left = (item.x, mid_y - SWATCH_H / 2);
        let bottom_right = (item.x + SWATCH_W, mid_y + SWATCH_H / 2);

        legend_area
            .draw(&Rectangle::new(
                [top_left, bottom_right],
                fill_color(color_idx).filled(),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
        legend_area
            .draw(&Rectangle::new(
                [top_left, bottom_right],
                border_color(color_idx).stroke_width(1),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
        legend_area
            .draw(&Text::new(
                item.label.as_str(),
                (item.x + SWATCH_W + SWATCH_TO_TEXT, mid_y),
                label_style.clone(),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<(String, usize)> {
        (0..n).map(|i| (format!("State {i}"), i + 1)).collect()
    }

    #[test]
    fn empty_legend_has_no_height() {
        let l = layout(&[], 800, 200);
        assert_eq!(l.rows, 0);
        assert_eq!(l.height_px(), 0);
    }

    #[test]
    fn narrow_canvas_wraps_into_more_rows() {
        let wide = layout(&items(8), 1600, 1000);
        let narrow = layout(&items(8), 300, 1000);
        assert_eq!(wide.items.len(), 8);
        assert_eq!(narrow.items.len(), 8);
        assert!(narrow.rows > wide.rows);
        assert!(narrow.height_px() > wide.height_px());
    }

    #[test]
    fn labels_carry_grouped_counts_and_share() {
        assert_eq!(item_label("Tokyo", 1234, 4936), "Tokyo (1,234, 25.0%)");
        assert_eq!(item_label("Nowhere", 0, 0), "Nowhere (0, 0.0%)");
    }

    #[test]
    fn many_states_stay_inside_the_band() {
        let states: Vec<(String, usize)> = (0..51)
            .map(|i| (format!("Andhra Pradesh {i}"), 45))
            .collect();
        let band = 400 / 2;
        let l = layout(&states, 800, band);

        assert!(l.height_px() <= band);
        for item in &l.items {
            assert!(item.y + ROW_H <= l.height_px() as i32 - PAD, "{:?}", item);
        }
        let last = l.items.last().unwrap();
        assert_eq!(last.color_idx, None);
        assert_eq!(last.label, format!("+{} more", l.hidden));
        let swatches = l.items.iter().filter(|i| i.color_idx.is_some()).count();
        assert_eq!(swatches + l.hidden, states.len());
    }

    #[test]
    fn legend_that_fits_has_nothing_hidden() {
        let l = layout(&items(3), 800, 200);
        assert_eq!(l.hidden, 0);
        assert_eq!(l.items.len(), 3);
        assert!(l.items.iter().all(|i| i.color_idx.is_some()));
    }

    #[test]
    fn no_room_for_a_row_means_no_legend() {
        let l = layout(&items(3), 800, 40);
        assert_eq!(l, LegendLayout::default());
        assert_eq!(l.height_px(), 0);
    }

    #[test]
    fn long_labels_are_truncated() {
        let long = "x".repeat(200);
        let t = truncate_to_width(&long, FONT_PX, 100);
        assert!(t.ends_with('…'));
        assert!(estimate_text_width_px(&t, FONT_PX) <= 100);
        assert_eq!(truncate_to_width("ok", FONT_PX, 100), "ok");
    }
}
