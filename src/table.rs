use crate::models::University;
use serde::Serialize;

/// Column headers, in display order.
pub const HEADERS: [&str; 5] = ["Sr. No.", "Name", "Website", "State", "Country"];

/// One rendered table row, borrowing from the university list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow<'a> {
    /// 1-based position in the list.
    pub sr_no: usize,
    /// Rendering key (the university id).
    pub key: &'a str,
    pub name: &'a str,
    pub website: &'a str,
    pub state: &'a str,
    pub country: &'a str,
}

impl TableRow<'_> {
    /// Cell texts in [`HEADERS`] order.
    pub fn cells(&self) -> [String; 5] {
        [
            self.sr_no.to_string(),
            self.name.to_string(),
            self.website.to_string(),
            self.state.to_string(),
            self.country.to_string(),
        ]
    }
}

/// Rows for `universities`, in list order.
pub fn rows(universities: &[University]) -> Vec<TableRow<'_>> {
    universities
        .iter()
        .enumerate()
        .map(|(i, u)| TableRow {
            sr_no: i + 1,
            key: &u.id,
            name: &u.name,
            website: &u.website,
            state: &u.state,
            country: &u.country,
        })
        .collect()
}

/// Owned cell texts for every row, for front ends that keep them between redraws.
pub fn cell_rows(universities: &[University]) -> Vec<[String; 5]> {
    rows(universities).iter().map(TableRow::cells).collect()
}

/// Plain-text table with left-aligned, padded columns.
pub fn render_text(universities: &[University]) -> String {
    let body = cell_rows(universities);

    let mut widths = HEADERS.map(|h| h.chars().count());
    for cells in &body {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let fmt_line = |cells: &[&str]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(c, w)| format!("{:<w$}", c, w = w))
            .collect();
        padded.join(" | ").trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(&fmt_line(&HEADERS));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for cells in &body {
        let refs: Vec<&str> = cells.iter().map(String::as_str).collect();
        out.push_str(&fmt_line(&refs));
        out.push('\n');
    }
    out
}
