//! Transport for CDX queries.
//!
//! [`CdxClient`] owns the HTTP client and endpoint configuration. It issues
//! the query request, validates the status and either exposes the raw body
//! ([`CdxClient::raw_perform`]) or decodes it into records
//! ([`CdxClient::perform`]).

mod rows;

use std::fmt;
use std::io::{self, Read};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use reqwest::blocking::{Client, Request, Response};
use reqwest::header::{COOKIE, USER_AGENT};
use reqwest::StatusCode;

use crate::config::{ClientConfig, AUTH_COOKIE_NAME};
use crate::error_handling::{CdxError, InitializationError};
use crate::initialization::init_client;
use crate::query::{CdxQuery, OutputFormat};
use crate::record::CdxRecord;
use crate::snapshot::Snapshot;

use rows::decode_rows;

/// Client for the CDX index and the archived-content host.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct CdxClient {
    http: Client,
    config: Arc<ClientConfig>,
}

impl CdxClient {
    /// Creates a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::ConfigError` if the configuration does
    /// not validate, or `InitializationError::HttpClientError` if the HTTP
    /// client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, InitializationError> {
        let http = init_client(&config)?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Performs `query` and returns the response body untouched.
    ///
    /// The body is in whichever output format the query asks for.
    ///
    /// # Errors
    ///
    /// [`CdxError::InvalidUrl`] if the query has no target, the transport
    /// error, or [`CdxError::BadResponse`] for a status other than 200.
    pub fn raw_perform(&self, query: &CdxQuery) -> Result<RawQuery, CdxError> {
        let request = self.query_request(query)?;
        info!("Querying {}", request.url());
        let response = self.http.execute(request)?;
        if response.status() != StatusCode::OK {
            debug!("CDX query answered with HTTP {}", response.status());
            return Err(CdxError::BadResponse(response.status()));
        }
        Ok(RawQuery { response })
    }

    /// Performs `query` and decodes every returned capture.
    ///
    /// The request always asks for JSON output; the query's own output
    /// format is restored afterwards, whether the call succeeds or not. When
    /// resumption keys are enabled and the server returned one, it is stored
    /// in `query` so that performing it again continues the listing.
    ///
    /// # Errors
    ///
    /// Everything [`CdxClient::raw_perform`] returns, plus I/O, JSON, integer
    /// and timestamp errors from decoding. No records are returned if any row
    /// fails to decode.
    pub fn perform(&self, query: &mut CdxQuery) -> Result<Vec<CdxRecord>, CdxError> {
        let requested = query.output_format();
        query.set_output_format(OutputFormat::Json);
        let body = self.fetch_body(query);
        query.set_output_format(requested);

        let decoded = decode_rows(&body?)?;
        if let Some(key) = decoded.resume_key {
            if query.resumption_key_enabled() {
                query.store_resumption_key(&key);
            } else {
                warn!("Ignoring resumption key {key:?} returned for a query without resumption");
            }
        }

        Ok(decoded
            .captures
            .into_iter()
            .map(|capture| {
                let content = self.snapshot(capture.original.clone(), capture.timestamp);
                capture.into_record(content)
            })
            .collect())
    }

    /// Returns an unopened content handle for one capture.
    pub fn snapshot(&self, original: impl Into<String>, timestamp: DateTime<Utc>) -> Snapshot {
        Snapshot::new(self.http.clone(), self.config.clone(), original, timestamp)
    }

    fn fetch_body(&self, query: &CdxQuery) -> Result<Vec<u8>, CdxError> {
        let mut body = Vec::new();
        self.raw_perform(query)?.read_to_end(&mut body)?;
        debug!("Read {} bytes of CDX response", body.len());
        Ok(body)
    }

    pub(crate) fn query_request(&self, query: &CdxQuery) -> Result<Request, CdxError> {
        let url = query.build_url_with(&self.config.cdx_endpoint)?;
        let mut builder = self
            .http
            .get(url)
            .header(USER_AGENT, &self.config.user_agent);
        if let Some(api_key) = query.api_key() {
            builder = builder.header(COOKIE, format!("{AUTH_COOKIE_NAME}={api_key}"));
        }
        Ok(builder.build()?)
    }
}

impl fmt::Debug for CdxClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CdxClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Undecoded body of a successful CDX query.
pub struct RawQuery {
    response: Response,
}

impl RawQuery {
    /// Final URL of the request.
    pub fn url(&self) -> &str {
        self.response.url().as_str()
    }
}

impl Read for RawQuery {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.response.read(buf)
    }
}

impl fmt::Debug for RawQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawQuery")
            .field("url", &self.url())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{all_of, matchers::*, responders::*, Expectation, Server};

    const CDX_LINE: &str =
        "org,archive)/ 20060102150405 http://archive.org/ text/html 200 AAAA 1234\n";

    fn client_for(server: &Server) -> CdxClient {
        CdxClient::new(ClientConfig {
            cdx_endpoint: server.url("/cdx/search/cdx").to_string(),
            content_host: server.url("/web").to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_query_request_headers() {
        let client = CdxClient::new(ClientConfig::default()).unwrap();
        let query = CdxQuery::new("archive.org").unwrap();
        let request = client.query_request(&query).unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://web.archive.org/cdx/search/cdx?url=archive.org"
        );
        assert_eq!(
            request.headers()[USER_AGENT],
            client.config().user_agent.as_str()
        );
        assert!(request.headers().get(COOKIE).is_none());
    }

    #[test]
    fn test_query_request_sends_api_key_cookie() {
        let client = CdxClient::new(ClientConfig::default()).unwrap();
        let mut query = CdxQuery::new("archive.org").unwrap();
        query.set_api_key("s3cret");
        let request = client.query_request(&query).unwrap();
        assert_eq!(request.headers()[COOKIE], "cdx-auth-token=s3cret");
    }

    #[test]
    fn test_query_request_without_target() {
        let client = CdxClient::new(ClientConfig::default()).unwrap();
        let query = CdxQuery::default();
        assert!(matches!(
            client.query_request(&query),
            Err(CdxError::InvalidUrl)
        ));
    }

    #[test]
    fn test_raw_perform_streams_body() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/cdx/search/cdx"))
                .respond_with(status_code(200).body(CDX_LINE)),
        );

        let client = client_for(&server);
        let query = CdxQuery::new("archive.org").unwrap();
        let mut raw = client.raw_perform(&query).unwrap();
        let mut body = String::new();
        raw.read_to_string(&mut body).unwrap();
        assert!(body.starts_with("org,archive)/ 20060102150405"));
    }

    #[test]
    fn test_raw_perform_bad_status() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/cdx/search/cdx"))
                .respond_with(status_code(403)),
        );

        let client = client_for(&server);
        let query = CdxQuery::new("archive.org").unwrap();
        assert!(matches!(
            client.raw_perform(&query),
            Err(CdxError::BadResponse(s)) if s == StatusCode::FORBIDDEN
        ));
    }

    #[test]
    fn test_perform_forces_json_and_restores_format() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/cdx/search/cdx"),
                request::query(url_decoded(contains(("output", "json")))),
            ])
            .respond_with(status_code(200).body(
                r#"[["urlkey","timestamp","original","mimetype","statuscode","digest","length"],
                   ["org,archive)/","20060102150405","http://archive.org/","text/html","200","AAAA","1234"]]"#,
            )),
        );

        let client = client_for(&server);
        let mut query = CdxQuery::new("archive.org").unwrap();
        let records = client.perform(&mut query).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].original(), "http://archive.org/");
        assert_eq!(records[0].status_code(), 200);
        assert_eq!(query.output_format(), OutputFormat::Cdx);
    }

    #[test]
    fn test_perform_restores_format_on_failure() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/cdx/search/cdx"))
                .respond_with(status_code(500)),
        );

        let client = client_for(&server);
        let mut query = CdxQuery::new("archive.org").unwrap();
        let before = query.clone();
        assert!(client.perform(&mut query).is_err());
        assert_eq!(query, before);
    }

    #[test]
    fn test_snapshot_uses_content_host() {
        let client = CdxClient::new(ClientConfig::default()).unwrap();
        let snapshot = client.snapshot(
            "http://archive.org/",
            crate::query::parse_timestamp("20060102150405").unwrap(),
        );
        assert_eq!(
            snapshot.url(),
            "http://web.archive.org/web/20060102150405/http://archive.org/"
        );
    }
}
