//! Chart lifecycle: one live pie chart at a time, destroyed before it is replaced.
//!
//! [`ChartRenderer`] is a two-state machine (`NoChart`, `ChartPresent`). Every data change
//! goes `ChartPresent → NoChart → ChartPresent`: the current [`PieChart`] is destroyed,
//! then a fresh one is built from the new tally. Charts are never updated in place.
//!
//! ```no_run
//! # use unidash::chart::{ChartOptions, ChartRenderer};
//! # use unidash::stats::StateCounts;
//! let mut renderer = ChartRenderer::new(ChartOptions::default());
//! renderer.render(&StateCounts::new())?;
//! renderer.render(&StateCounts::new())?; // first chart destroyed here
//! assert_eq!(renderer.live_charts(), 1);
//! # Ok::<(), unidash::chart::ChartError>(())
//! ```

use crate::stats::StateCounts;
use crate::viz::{self, Canvas};
use log::debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("render target not found (canvas is {width}x{height})")]
    MissingTarget { width: u32, height: u32 },
    #[error("chart drawing failed: {0}")]
    Draw(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartState {
    NoChart,
    ChartPresent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    /// Draw the legend band; only enable once a font is registered.
    pub labels: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            labels: false,
        }
    }
}

/// Live handle to one rendered chart.
#[derive(Debug)]
pub struct PieChart {
    id: u64,
    counts: StateCounts,
    canvas: Option<Canvas>,
    live: Arc<AtomicUsize>,
}

impl PieChart {
    fn build(
        id: u64,
        counts: &StateCounts,
        options: &ChartOptions,
        live: Arc<AtomicUsize>,
    ) -> Result<Self, ChartError> {
        if options.width == 0 || options.height == 0 {
            return Err(ChartError::MissingTarget {
                width: options.width,
                height: options.height,
            });
        }
        let canvas = viz::render_canvas(counts, options.width, options.height, options.labels)
            .map_err(|e| ChartError::Draw(format!("{:#}", e)))?;
        live.fetch_add(1, Ordering::SeqCst);
        debug!("created chart #{} ({} slices)", id, counts.len());
        Ok(Self {
            id,
            counts: counts.clone(),
            canvas: Some(canvas),
            live,
        })
    }

    /// Monotonic id; a larger id means a later build.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Tally the chart was built from.
    pub fn counts(&self) -> &StateCounts {
        &self.counts
    }

    /// Current pixels; `None` once destroyed.
    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    pub fn is_destroyed(&self) -> bool {
        self.canvas.is_none()
    }

    /// Release the chart's canvas. Calling it again is a no-op.
    pub fn destroy(&mut self) {
        if self.canvas.take().is_some() {
            self.live.fetch_sub(1, Ordering::SeqCst);
            debug!("destroyed chart #{}", self.id);
        }
    }
}

impl Drop for PieChart {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Owner of the single live [`PieChart`].
#[derive(Debug)]
pub struct ChartRenderer {
    options: ChartOptions,
    current: Option<PieChart>,
    built: u64,
    live: Arc<AtomicUsize>,
}

impl ChartRenderer {
    pub fn new(options: ChartOptions) -> Self {
        Self {
            options,
            current: None,
            built: 0,
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn state(&self) -> ChartState {
        match self.current {
            Some(_) => ChartState::ChartPresent,
            None => ChartState::NoChart,
        }
    }

    pub fn current(&self) -> Option<&PieChart> {
        self.current.as_ref()
    }

    /// Destroy the current chart (if any), then build a new one from `counts`.
    ///
    /// On error the renderer is left in `NoChart`.
    pub fn render(&mut self, counts: &StateCounts) -> Result<&PieChart, ChartError> {
        self.teardown();
        self.built += 1;
        let chart = PieChart::build(self.built, counts, &self.options, Arc::clone(&self.live))?;
        Ok(&*self.current.insert(chart))
    }

    /// Destroy the current chart and return to `NoChart`.
    pub fn teardown(&mut self) {
        if let Some(mut old) = self.current.take() {
            old.destroy();
        }
    }

    /// Charts whose canvas has not been released yet.
    pub fn live_charts(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Number of build attempts so far.
    pub fn charts_built(&self) -> u64 {
        self.built
    }
}
