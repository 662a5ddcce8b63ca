//! unidash
//!
//! A small Rust library for browsing universities per country. Pairs with the `unidash`
//! CLI and the `unidash-gui` desktop dashboard.
//!
//! ### Features
//! - Fetch the university list for a country from a local `/universities` endpoint
//! - Tally universities per state (first-occurrence order)
//! - Render the tally as a pie chart (in-memory canvas, PNG or SVG)
//! - Export the chart canvas to a landscape PDF
//! - Render the list as a table, save it as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use unidash::{Client, Country, Dashboard, DashboardConfig};
//!
//! let mut dash = Dashboard::new(&DashboardConfig::default())?;
//! dash.select_country(Country::Japan);
//! dash.load(&Client::default())?;
//! println!("{}", unidash::table::render_text(dash.universities()));
//! dash.export_pdf("chart.pdf")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod chart;
pub mod dashboard;
pub mod export;
pub mod models;
pub mod stats;
pub mod storage;
pub mod table;
pub mod viz;

pub use api::{Client, FetchError, UniversitySource};
pub use dashboard::{Dashboard, DashboardConfig, FetchOutcome, FetchTicket};
pub use models::{Country, University};
pub use stats::{StateCounts, count_by_state};
