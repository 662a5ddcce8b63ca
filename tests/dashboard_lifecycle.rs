mod common;

use common::{india, japan};
use std::cell::RefCell;
use std::collections::VecDeque;
use tempfile::tempdir;
use unidash::chart::ChartState;
use unidash::{
    Country, Dashboard, DashboardConfig, FetchError, FetchOutcome, University, UniversitySource,
};

fn config() -> DashboardConfig {
    DashboardConfig {
        chart_width: 320,
        chart_height: 200,
        labels: false,
        ..DashboardConfig::default()
    }
}

fn server_error() -> FetchError {
    FetchError::Status {
        url: "http://localhost:3001/universities?country=India".into(),
        status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Source that replays canned results and records which countries were asked for.
struct Canned {
    replies: RefCell<VecDeque<Result<Vec<University>, FetchError>>>,
    asked: RefCell<Vec<Country>>,
}

impl Canned {
    fn new(replies: Vec<Result<Vec<University>, FetchError>>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            asked: RefCell::new(Vec::new()),
        }
    }
}

impl UniversitySource for Canned {
    fn fetch_universities(&self, country: Country) -> Result<Vec<University>, FetchError> {
        self.asked.borrow_mut().push(country);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[test]
fn new_dashboard_shows_an_empty_chart() {
    let dash = Dashboard::new(&config()).unwrap();
    assert_eq!(dash.country(), Country::India);
    assert!(dash.universities().is_empty());
    assert_eq!(dash.chart().state(), ChartState::ChartPresent);
    assert_eq!(dash.chart().live_charts(), 1);
    let canvas = dash.chart().current().unwrap().canvas().unwrap();
    assert!(canvas.is_blank());
}

#[test]
fn zero_sized_canvas_is_fatal() {
    let cfg = DashboardConfig {
        chart_height: 0,
        ..config()
    };
    assert!(Dashboard::new(&cfg).is_err());
}

#[test]
fn one_fetch_per_selection_change() {
    let mut dash = Dashboard::new(&config()).unwrap();
    assert_eq!(dash.fetches_issued(), 0);

    assert!(dash.select_country(Country::India).is_none());
    let t = dash.select_country(Country::Japan).unwrap();
    assert_eq!(t.country(), Country::Japan);
    assert!(dash.select_country(Country::Japan).is_none());
    assert!(dash.select_country(Country::Japan).is_none());
    dash.select_country(Country::UnitedKingdom).unwrap();

    assert_eq!(dash.fetches_issued(), 2);
}

#[test]
fn successful_fetch_replaces_list_and_rebuilds_chart() {
    let mut dash = Dashboard::new(&config()).unwrap();
    let source = Canned::new(vec![Ok(india())]);
    let before = dash.chart().current().unwrap().id();

    let outcome = dash.load(&source).unwrap();
    assert_eq!(outcome, FetchOutcome::Applied { rows: 4 });
    assert_eq!(*source.asked.borrow(), vec![Country::India]);
    assert_eq!(dash.universities(), india().as_slice());
    assert_eq!(dash.counts().get("Maharashtra"), Some(2));

    let chart = dash.chart().current().unwrap();
    assert!(chart.id() > before);
    assert_eq!(chart.counts(), dash.counts());
    assert!(!chart.canvas().unwrap().is_blank());
    assert_eq!(dash.table_rows().len(), 4);
}

#[test]
fn at_most_one_live_chart_after_consecutive_updates() {
    let mut dash = Dashboard::new(&config()).unwrap();
    let source = Canned::new(vec![Ok(india()), Ok(japan()), Ok(india())]);

    dash.load(&source).unwrap();
    assert_eq!(dash.chart().live_charts(), 1);
    dash.select_country(Country::Japan);
    dash.load(&source).unwrap();
    assert_eq!(dash.chart().live_charts(), 1);
    dash.load(&source).unwrap();
    assert_eq!(dash.chart().live_charts(), 1);
    assert_eq!(dash.chart().charts_built(), 4);
}

#[test]
fn failed_fetch_keeps_previous_list_and_chart() {
    let mut dash = Dashboard::new(&config()).unwrap();
    let source = Canned::new(vec![Ok(india()), Err(server_error())]);
    dash.load(&source).unwrap();
    let built = dash.chart().charts_built();
    let chart_id = dash.chart().current().unwrap().id();

    let outcome = dash.load(&source).unwrap();
    assert_eq!(outcome, FetchOutcome::Failed);
    assert_eq!(dash.universities(), india().as_slice());
    assert_eq!(dash.chart().charts_built(), built);
    assert_eq!(dash.chart().current().unwrap().id(), chart_id);
    assert_eq!(dash.chart().live_charts(), 1);
}

#[test]
fn stale_response_is_discarded() {
    let mut dash = Dashboard::new(&config()).unwrap();
    let first = dash.initial_request();
    let second = dash.select_country(Country::Japan).unwrap();

    // The newer request lands first...
    assert_eq!(
        dash.apply(second, Ok(japan())).unwrap(),
        FetchOutcome::Applied { rows: 2 }
    );
    // ...then the older one arrives late.
    let built = dash.chart().charts_built();
    let chart_id = dash.chart().current().unwrap().id();
    assert_eq!(dash.apply(first, Ok(india())).unwrap(), FetchOutcome::Stale);
    assert_eq!(dash.chart().charts_built(), built);
    assert_eq!(dash.chart().current().unwrap().id(), chart_id);

    assert_eq!(dash.universities(), japan().as_slice());
    assert_eq!(dash.counts().get("Tokyo"), Some(1));
    assert_eq!(dash.chart().live_charts(), 1);
}

#[test]
fn export_with_no_universities_still_writes_a_pdf() {
    let dash = Dashboard::new(&config()).unwrap();
    let dir = tempdir().unwrap();
    let path = dir.path().join("chart.pdf");

    let written = dash.export_pdf(&path).unwrap();
    assert_eq!(written, path);
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn export_after_teardown_fails() {
    let mut dash = Dashboard::new(&config()).unwrap();
    dash.teardown();
    assert_eq!(dash.chart().state(), ChartState::NoChart);
    assert_eq!(dash.chart().live_charts(), 0);
    let dir = tempdir().unwrap();
    assert!(dash.export_pdf(dir.path().join("chart.pdf")).is_err());
}
