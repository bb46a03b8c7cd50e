//! Lazy access to archived content.
//!
//! A [`Snapshot`] is bound to one (original URL, timestamp) pair and does not
//! touch the network until it is first read. It performs at most one fetch
//! over its lifetime.

use std::fmt;
use std::io::{self, Read};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::debug;
use reqwest::blocking::{Client, Request, Response};
use reqwest::header::{ACCEPT, ACCEPT_ENCODING, USER_AGENT};
use reqwest::StatusCode;

use crate::config::ClientConfig;
use crate::error_handling::CdxError;
use crate::query::format_timestamp;

/// Fetch state of a [`Snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotStatus {
    /// Nothing has been requested yet.
    Unopened,
    /// The archive answered and the body is being read.
    Open,
    /// The body was read to the end, or the fetch failed.
    Exhausted,
}

enum State {
    Unopened,
    Open(Response),
    Exhausted,
}

/// Archived content of one capture, fetched on first read.
///
/// Implements [`Read`]: the first call requests
/// `<content-host>/<timestamp>/<original>` and later calls stream the body.
/// A failed fetch is returned from the read that triggered it (wrapping a
/// [`CdxError`]); afterwards every read reports end-of-data.
///
/// # Example
///
/// ```no_run
/// use std::io::Read;
/// use wayback_cdx::{CdxClient, ClientConfig, parse_timestamp};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CdxClient::new(ClientConfig::default())?;
/// let mut snapshot = client.snapshot("http://archive.org/", parse_timestamp("20060102150405")?);
/// let mut html = String::new();
/// snapshot.read_to_string(&mut html)?;
/// # Ok(())
/// # }
/// ```
pub struct Snapshot {
    original: String,
    timestamp: DateTime<Utc>,
    http: Client,
    config: Arc<ClientConfig>,
    state: State,
}

impl Snapshot {
    pub(crate) fn new(
        http: Client,
        config: Arc<ClientConfig>,
        original: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            original: original.into(),
            timestamp,
            http,
            config,
            state: State::Unopened,
        }
    }

    /// Original URL of the capture.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Capture timestamp.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// URL the content is fetched from.
    pub fn url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.config.content_host.trim_end_matches('/'),
            format_timestamp(&self.timestamp),
            self.original
        )
    }

    /// Current fetch state.
    pub fn status(&self) -> SnapshotStatus {
        match self.state {
            State::Unopened => SnapshotStatus::Unopened,
            State::Open(_) => SnapshotStatus::Open,
            State::Exhausted => SnapshotStatus::Exhausted,
        }
    }

    /// Performs the fetch now instead of on the first read.
    ///
    /// Does nothing if the snapshot was already opened or exhausted.
    ///
    /// # Errors
    ///
    /// The transport error, or [`CdxError::BadResponse`] for a status other
    /// than 200. The snapshot is exhausted afterwards in both cases.
    pub fn open(&mut self) -> Result<(), CdxError> {
        if !matches!(self.state, State::Unopened) {
            return Ok(());
        }
        // Exhausted until the response is established
        self.state = State::Exhausted;
        let request = self.request()?;
        debug!("Fetching snapshot {}", request.url());
        let response = self.http.execute(request)?;
        if response.status() != StatusCode::OK {
            debug!(
                "Snapshot {} answered with HTTP {}",
                response.url(),
                response.status()
            );
            return Err(CdxError::BadResponse(response.status()));
        }
        self.state = State::Open(response);
        Ok(())
    }

    pub(crate) fn request(&self) -> Result<Request, CdxError> {
        Ok(self
            .http
            .get(self.url())
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT, "*/*")
            .header(ACCEPT_ENCODING, "identity")
            .build()?)
    }
}

impl Read for Snapshot {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.open().map_err(io::Error::other)?;
        match &mut self.state {
            State::Open(response) => {
                let n = response.read(buf)?;
                if n == 0 && !buf.is_empty() {
                    self.state = State::Exhausted;
                }
                Ok(n)
            }
            State::Unopened | State::Exhausted => Ok(0),
        }
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("original", &self.original)
            .field("timestamp", &self.timestamp)
            .field("status", &self.status())
            .finish()
    }
}
