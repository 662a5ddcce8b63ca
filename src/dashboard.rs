//! Dashboard state container.
//!
//! Holds the selected country, the current university list, its state tally and the chart
//! renderer. Every field has a single writer: the selector operation writes the country,
//! [`Dashboard::apply`] writes the list, the tally and the chart.
//!
//! Fetches are split into *issue* and *apply* so they can run elsewhere (a worker thread in
//! the GUI). Each issued [`FetchTicket`] carries a generation number; only a response for the
//! latest generation is committed, so a slow reply for an old selection cannot overwrite a
//! newer one.

use crate::api::{DEFAULT_BASE_URL, FetchError, UniversitySource};
use crate::chart::{ChartError, ChartOptions, ChartRenderer};
use crate::export;
use crate::models::{Country, University};
use crate::stats::{StateCounts, count_by_state};
use crate::table::{self, TableRow};
use crate::viz::fonts;
use anyhow::{Result, anyhow};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub base_url: String,
    pub initial_country: Country,
    pub chart_width: u32,
    pub chart_height: u32,
    /// Font for chart labels; searched for when `None`.
    pub font_path: Option<PathBuf>,
    /// Set to `false` to skip font lookup and always draw a legend-less chart.
    pub labels: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            initial_country: Country::default(),
            chart_width: 800,
            chart_height: 400,
            font_path: None,
            labels: true,
        }
    }
}

/// Proof that a fetch was issued; hand it back to [`Dashboard::apply`] with the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    country: Country,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn country(&self) -> Country {
        self.country
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// List replaced and chart rebuilt.
    Applied { rows: usize },
    /// Response belonged to an older ticket and was dropped.
    Stale,
    /// Fetch failed; previous list kept.
    Failed,
}

#[derive(Debug)]
pub struct Dashboard {
    country: Country,
    universities: Vec<University>,
    counts: StateCounts,
    chart: ChartRenderer,
    generation: u64,
}

impl Dashboard {
    /// Create the dashboard and render its initial (empty) chart.
    ///
    /// Fails when the chart cannot be rendered, e.g. a zero-sized canvas.
    pub fn new(config: &DashboardConfig) -> Result<Self, ChartError> {
        let labels = config.labels && fonts::ensure_fonts_registered(config.font_path.as_deref());
        let mut chart = ChartRenderer::new(ChartOptions {
            width: config.chart_width,
            height: config.chart_height,
            labels,
        });
        let counts = StateCounts::new();
        chart.render(&counts)?;
        Ok(Self {
            country: config.initial_country,
            universities: Vec::new(),
            counts,
            chart,
            generation: 0,
        })
    }

    pub fn country(&self) -> Country {
        self.country
    }

    pub fn universities(&self) -> &[University] {
        &self.universities
    }

    pub fn counts(&self) -> &StateCounts {
        &self.counts
    }

    pub fn chart(&self) -> &ChartRenderer {
        &self.chart
    }

    pub fn table_rows(&self) -> Vec<TableRow<'_>> {
        table::rows(&self.universities)
    }

    /// Number of fetch tickets issued so far.
    pub fn fetches_issued(&self) -> u64 {
        self.generation
    }

    fn issue(&mut self) -> FetchTicket {
        self.generation += 1;
        FetchTicket {
            generation: self.generation,
            country: self.country,
        }
    }

    /// Ticket for the first load of the initial country.
    pub fn initial_request(&mut self) -> FetchTicket {
        self.issue()
    }

    /// Change the selection. Returns a ticket only when the country actually changed.
    pub fn select_country(&mut self, country: Country) -> Option<FetchTicket> {
        if country == self.country {
            return None;
        }
        self.country = country;
        Some(self.issue())
    }

    /// Commit the result of a fetch issued with `ticket`.
    ///
    /// Errors are logged and leave the list and chart untouched. A successful response for a
    /// superseded ticket is discarded. Only a chart rebuild failure is returned as an error.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<University>, FetchError>,
    ) -> Result<FetchOutcome, ChartError> {
        let universities = match result {
            Ok(list) => list,
            Err(e) => {
                error!("Error fetching data: {}", e);
                return Ok(FetchOutcome::Failed);
            }
        };
        if ticket.generation != self.generation {
            warn!(
                "dropping stale response for {} (ticket {}, latest {})",
                ticket.country, ticket.generation, self.generation
            );
            return Ok(FetchOutcome::Stale);
        }

        info!(
            "loaded {} universities for {}",
            universities.len(),
            ticket.country
        );
        self.universities = universities;
        self.counts = count_by_state(&self.universities);
        self.chart.render(&self.counts)?;
        Ok(FetchOutcome::Applied {
            rows: self.universities.len(),
        })
    }

    /// Issue a ticket for the current country, fetch it from `source`, and apply it.
    pub fn load(&mut self, source: &impl UniversitySource) -> Result<FetchOutcome, ChartError> {
        let ticket = self.issue();
        let result = source.fetch_universities(ticket.country);
        self.apply(ticket, result)
    }

    /// Export the chart as currently displayed.
    pub fn export_pdf<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        let canvas = self
            .chart
            .current()
            .and_then(|c| c.canvas())
            .ok_or_else(|| anyhow!("no chart to export"))?;
        export::export_pdf(canvas, path)
    }

    /// Destroy the chart; the dashboard is not used afterwards.
    pub fn teardown(&mut self) {
        self.chart.teardown();
    }
}
