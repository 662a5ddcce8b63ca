//! Synchronous client for the local **universities** endpoint.
//!
//! The endpoint is an external collaborator: `GET /universities?country=<name>` returns a
//! JSON array of [`University`] objects. There is no pagination, no authentication and no
//! retry; any failure is reported once as a [`FetchError`].
//!
//! Typical usage:
//! ```no_run
//! # use unidash::{Client, Country};
//! let client = Client::default();
//! let rows = client.fetch_universities(Country::Japan)?;
//! # Ok::<(), unidash::api::FetchError>(())
//! ```
use crate::models::{Country, University};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;
use thiserror::Error;

/// Default host/port of the universities service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} failed with HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("could not decode universities from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Anything the dashboard can pull a university list from.
pub trait UniversitySource {
    fn fetch_universities(&self, country: Country) -> Result<Vec<University>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

// Country names contain spaces; keep the usual unreserved marks readable.
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .no_proxy() // the service lives on the local machine
            .user_agent(concat!("unidash/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .unwrap_or_else(|_| HttpClient::new());
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Full request URL for `country`.
    pub fn universities_url(&self, country: Country) -> String {
        format!(
            "{}/universities?country={}",
            self.base_url,
            percent_encoding::utf8_percent_encode(country.as_str(), SAFE)
        )
    }

    /// Fetch the university list for one country.
    ///
    /// ### Errors
    /// - Network error ([`FetchError::Transport`])
    /// - Non-2xx response ([`FetchError::Status`])
    /// - Body is not a JSON array of universities ([`FetchError::Decode`])
    pub fn fetch_universities(&self, country: Country) -> Result<Vec<University>, FetchError> {
        let url = self.universities_url(country);
        let resp = self
            .http
            .get(&url)
            .send()
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }
        resp.json::<Vec<University>>()
            .map_err(|source| FetchError::Decode { url, source })
    }
}

impl UniversitySource for Client {
    fn fetch_universities(&self, country: Country) -> Result<Vec<University>, FetchError> {
        Client::fetch_universities(self, country)
    }
}
