mod common;

use common::{FixtureServer, as_json, dead_base_url, japan};
use unidash::{Client, Country, FetchError};

#[test]
fn fetch_parses_university_array() {
    let server = FixtureServer::start(vec![(200, as_json(&japan()))]);
    let client = Client::new(&server.base_url);

    let list = client.fetch_universities(Country::Japan).unwrap();
    assert_eq!(list, japan());
    assert_eq!(server.requests(), vec!["/universities?country=Japan"]);
}

#[test]
fn country_name_is_percent_encoded() {
    let server = FixtureServer::start(vec![(200, "[]".into())]);
    let client = Client::new(&server.base_url);

    let list = client.fetch_universities(Country::UnitedStates).unwrap();
    assert!(list.is_empty());
    assert_eq!(
        server.requests(),
        vec!["/universities?country=United%20States"]
    );
}

#[test]
fn numeric_ids_and_missing_fields_are_accepted() {
    let body = r#"[{"id": 42, "name": "Osaka University", "state": "Osaka"}]"#;
    let server = FixtureServer::start(vec![(200, body.into())]);
    let client = Client::new(&server.base_url);

    let list = client.fetch_universities(Country::Japan).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, "42");
    assert_eq!(list[0].website, "");
    assert_eq!(list[0].country, "");
}

#[test]
fn null_ids_and_names_do_not_reject_the_list() {
    let body = r#"[
        {"id": null, "name": null, "state": "Osaka"},
        {"name": "No Id University", "state": "Kyoto"},
        {"id": 3.0, "name": "Float Id University", "state": "Tokyo"}
    ]"#;
    let server = FixtureServer::start(vec![(200, body.into())]);
    let client = Client::new(&server.base_url);

    let list = client.fetch_universities(Country::Japan).unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[0].id, "");
    assert_eq!(list[0].name, "");
    assert_eq!(list[0].state, "Osaka");
    assert_eq!(list[1].id, "");
    assert_eq!(list[1].name, "No Id University");
    assert_eq!(list[2].id, "3");
}

#[test]
fn server_error_is_a_status_error() {
    let server = FixtureServer::start(vec![(500, r#"{"error":"boom"}"#.into())]);
    let client = Client::new(&server.base_url);

    let err = client.fetch_universities(Country::India).unwrap_err();
    assert!(matches!(err, FetchError::Status { status, .. } if status.as_u16() == 500));
    // no retry
    assert_eq!(server.requests().len(), 1);
}

#[test]
fn malformed_body_is_a_decode_error() {
    let server = FixtureServer::start(vec![(200, r#"{"not":"a list"}"#.into())]);
    let client = Client::new(&server.base_url);

    let err = client.fetch_universities(Country::India).unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }));
}

#[test]
fn unreachable_host_is_a_transport_error() {
    let client = Client::new(dead_base_url());
    let err = client.fetch_universities(Country::India).unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }));
    assert!(err.to_string().contains("/universities?country=India"));
}

#[test]
fn trailing_slash_in_base_url_is_ignored() {
    let client = Client::new("http://localhost:3001/");
    assert_eq!(
        client.universities_url(Country::UnitedKingdom),
        "http://localhost:3001/universities?country=United%20Kingdom"
    );
}
