//! CDX query configuration.
//!
//! [`CdxQuery`] holds every parameter of one query session. Setters validate
//! their input and leave the query untouched when they fail; getters never
//! fail and report unset values as `None` or the server-side default.
//!
//! # Example
//!
//! ```
//! use wayback_cdx::{CdxQuery, Field, MatchType};
//!
//! let mut query = CdxQuery::new("archive.org").unwrap();
//! query.set_match_type(MatchType::Host);
//! query.add_regex_filter(Field::StatusCode, "200", false).unwrap();
//! query.add_collapse(Field::Digest, 0).unwrap();
//! query.set_limit(10).unwrap();
//!
//! let url = query.build_url().unwrap();
//! assert_eq!(
//!     url,
//!     "https://web.archive.org/cdx/search/cdx?collapse=digest&filter=statuscode%3A200&limit=10&matchType=host&url=archive.org"
//! );
//! ```

mod params;
mod target;
mod timestamp;
mod types;

use chrono::{DateTime, Utc};
use log::debug;
use regex::Regex;

use crate::config::CDX_ENDPOINT;
use crate::error_handling::CdxError;
use params::*;

// Re-export public API
pub use target::validate_target;
pub use timestamp::{format_timestamp, parse_timestamp};
pub use types::{Field, MatchType, OutputFormat};

/// Parameters of a CDX query session.
///
/// Created with a mandatory target URL and mutated only through its setters.
/// Records returned by a query do not borrow from it, so a query can be
/// modified and performed again (for example to follow a resumption key).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CdxQuery {
    params: ParamStore,
    use_resumption_key: bool,
    use_pagination: bool,
    api_key: Option<String>,
}

impl CdxQuery {
    /// Creates a query for `url`.
    ///
    /// # Errors
    ///
    /// See [`CdxQuery::set_url`].
    pub fn new(url: &str) -> Result<Self, CdxError> {
        let mut query = Self::default();
        query.set_url(url)?;
        Ok(query)
    }

    /// Sets the URL or URL pattern to look up.
    ///
    /// An empty string clears the target; building the request URL then fails
    /// with [`CdxError::InvalidUrl`].
    ///
    /// # Errors
    ///
    /// [`CdxError::InvalidUrl`] or [`CdxError::InvalidScheme`], see
    /// [`validate_target`].
    pub fn set_url(&mut self, url: &str) -> Result<(), CdxError> {
        if url.is_empty() {
            self.params.remove(KEY_URL);
            return Ok(());
        }
        validate_target(url)?;
        self.params.set(KEY_URL, url);
        Ok(())
    }

    /// Target URL, or `""` when none is set.
    pub fn url(&self) -> &str {
        self.params.get(KEY_URL).unwrap_or_default()
    }

    /// Sets the API key sent as the `cdx-auth-token` cookie. An empty key clears it.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        let api_key = api_key.into();
        self.api_key = (!api_key.is_empty()).then_some(api_key);
    }

    /// Configured API key.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Removes the API key.
    pub fn reset_api_key(&mut self) {
        self.api_key = None;
    }

    /// Sets how the target is matched.
    pub fn set_match_type(&mut self, mode: MatchType) {
        self.params.set(KEY_MATCH_TYPE, mode.as_str());
    }

    /// Current match mode ([`MatchType::Exact`] unless set).
    pub fn match_type(&self) -> MatchType {
        self.params
            .get(KEY_MATCH_TYPE)
            .and_then(|mode| mode.parse().ok())
            .unwrap_or_default()
    }

    /// Resets the match mode to [`MatchType::Exact`].
    pub fn reset_match_type(&mut self) {
        self.set_match_type(MatchType::Exact);
    }

    /// Selects the wire format used by [`crate::CdxClient::raw_perform`].
    ///
    /// [`OutputFormat::Cdx`] is the server default and is expressed by
    /// omitting the `output` key.
    pub fn set_output_format(&mut self, format: OutputFormat) {
        match format {
            OutputFormat::Cdx => self.params.remove(KEY_OUTPUT),
            OutputFormat::Json => self.params.set(KEY_OUTPUT, format.as_str()),
        }
    }

    /// Current wire format.
    pub fn output_format(&self) -> OutputFormat {
        match self.params.get(KEY_OUTPUT) {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Cdx,
        }
    }

    /// Resets the wire format to [`OutputFormat::Cdx`].
    pub fn reset_output_format(&mut self) {
        self.params.remove(KEY_OUTPUT);
    }

    /// Limits the number of results.
    ///
    /// # Errors
    ///
    /// [`CdxError::InvalidNumber`] if `limit <= 0`.
    pub fn set_limit(&mut self, limit: i64) -> Result<(), CdxError> {
        if limit <= 0 {
            return Err(CdxError::InvalidNumber(format!(
                "limit must be positive, got {limit}"
            )));
        }
        self.params.set(KEY_LIMIT, limit.to_string());
        Ok(())
    }

    /// Result limit, if any.
    pub fn limit(&self) -> Option<u64> {
        self.params.get(KEY_LIMIT).and_then(|v| v.parse().ok())
    }

    /// Removes the result limit.
    pub fn reset_limit(&mut self) {
        self.params.remove(KEY_LIMIT);
    }

    /// Skips the first `offset` results.
    ///
    /// # Errors
    ///
    /// [`CdxError::InvalidNumber`] if `offset <= 0`.
    pub fn set_offset(&mut self, offset: i64) -> Result<(), CdxError> {
        if offset <= 0 {
            return Err(CdxError::InvalidNumber(format!(
                "offset must be positive, got {offset}"
            )));
        }
        self.params.set(KEY_OFFSET, offset.to_string());
        Ok(())
    }

    /// Row offset, if any.
    pub fn offset(&self) -> Option<u64> {
        self.params.get(KEY_OFFSET).and_then(|v| v.parse().ok())
    }

    /// Removes the row offset.
    pub fn reset_offset(&mut self) {
        self.params.remove(KEY_OFFSET);
    }

    /// Adds a regex filter on `field`.
    ///
    /// Filters accumulate: every call adds one `filter=` parameter, sent in
    /// call order. With `negate` the server keeps rows that do *not* match.
    ///
    /// # Errors
    ///
    /// The `regex` compilation error if `pattern` is not a valid expression.
    pub fn add_regex_filter(
        &mut self,
        field: Field,
        pattern: &str,
        negate: bool,
    ) -> Result<(), CdxError> {
        Regex::new(pattern)?;
        let bang = if negate { "!" } else { "" };
        self.params
            .append(KEY_FILTER, format!("{bang}{}:{pattern}", field.as_str()));
        Ok(())
    }

    /// Adds a filter written as `[!]field:regex`, e.g. `!mimetype:text/html`.
    ///
    /// # Errors
    ///
    /// [`CdxError::InvalidField`] for an unknown field or a missing `:`, or the
    /// `regex` compilation error.
    pub fn add_filter_expr(&mut self, expr: &str) -> Result<(), CdxError> {
        let (negate, rest) = match expr.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, expr),
        };
        let (field, pattern) = rest
            .split_once(':')
            .ok_or_else(|| CdxError::InvalidField(expr.to_string()))?;
        self.add_regex_filter(field.parse()?, pattern, negate)
    }

    /// Filters in the order they were added, as sent on the wire.
    pub fn regex_filters(&self) -> &[String] {
        self.params.get_all(KEY_FILTER)
    }

    /// Removes all regex filters.
    pub fn reset_regex_filters(&mut self) {
        self.params.remove(KEY_FILTER);
    }

    /// Collapses adjacent rows sharing `field`, or its first `n` characters when `n > 0`.
    ///
    /// Collapse directives accumulate in call order, which the server applies
    /// in sequence.
    ///
    /// # Errors
    ///
    /// [`CdxError::InvalidNumber`] if `n < 0`.
    pub fn add_collapse(&mut self, field: Field, n: i64) -> Result<(), CdxError> {
        if n < 0 {
            return Err(CdxError::InvalidNumber(format!(
                "collapse length must not be negative, got {n}"
            )));
        }
        let value = if n == 0 {
            field.as_str().to_string()
        } else {
            format!("{}:{n}", field.as_str())
        };
        self.params.append(KEY_COLLAPSE, value);
        Ok(())
    }

    /// Adds a collapse directive written as `field` or `field:n`.
    ///
    /// # Errors
    ///
    /// [`CdxError::InvalidField`] or [`CdxError::InvalidNumber`].
    pub fn add_collapse_expr(&mut self, expr: &str) -> Result<(), CdxError> {
        let (field, n) = match expr.split_once(':') {
            Some((field, n)) => {
                let n = n.parse().map_err(|_| {
                    CdxError::InvalidNumber(format!("invalid collapse length {n:?}"))
                })?;
                (field, n)
            }
            None => (expr, 0),
        };
        self.add_collapse(field.parse()?, n)
    }

    /// Collapse directives in the order they were added, as sent on the wire.
    pub fn collapses(&self) -> &[String] {
        self.params.get_all(KEY_COLLAPSE)
    }

    /// Removes all collapse directives.
    pub fn reset_collapses(&mut self) {
        self.params.remove(KEY_COLLAPSE);
    }

    /// Restricts results to captures between `from` and `to` (inclusive).
    ///
    /// # Errors
    ///
    /// [`CdxError::InvalidFromTo`] if `to` is earlier than `from`.
    pub fn set_time_range(
        &mut self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<(), CdxError> {
        if to < from {
            return Err(CdxError::InvalidFromTo);
        }
        self.params.set(KEY_FROM, format_timestamp(&from));
        self.params.set(KEY_TO, format_timestamp(&to));
        Ok(())
    }

    /// Configured time range, truncated to whole seconds.
    pub fn time_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let from = parse_timestamp(self.params.get(KEY_FROM)?).ok()?;
        let to = parse_timestamp(self.params.get(KEY_TO)?).ok()?;
        Some((from, to))
    }

    /// Removes the time range.
    pub fn reset_time_range(&mut self) {
        self.params.remove(KEY_FROM);
        self.params.remove(KEY_TO);
    }

    /// Allows (default) or forbids a gzip-compressed response.
    pub fn set_gzip(&mut self, enabled: bool) {
        if enabled {
            self.params.remove(KEY_GZIP);
        } else {
            self.params.set(KEY_GZIP, "false");
        }
    }

    /// Whether a gzip-compressed response is allowed.
    pub fn gzip(&self) -> bool {
        self.params.get(KEY_GZIP) != Some("false")
    }

    /// Re-allows gzip-compressed responses.
    pub fn reset_gzip(&mut self) {
        self.params.remove(KEY_GZIP);
    }

    /// Enables or disables resumption keys.
    ///
    /// When enabled the server appends a resumption key to the result, which
    /// [`crate::CdxClient::perform`] stores back into this query so the next
    /// call continues where the previous one stopped. `key` is the key to
    /// resume from (empty for a fresh query).
    ///
    /// # Errors
    ///
    /// [`CdxError::PaginationResumptionConflict`] while pagination is enabled.
    pub fn set_resumption_key(&mut self, enabled: bool, key: &str) -> Result<(), CdxError> {
        if self.use_pagination {
            return Err(CdxError::PaginationResumptionConflict);
        }
        self.apply_resumption_key(enabled, key);
        Ok(())
    }

    /// Whether resumption keys are enabled.
    pub fn resumption_key_enabled(&self) -> bool {
        self.use_resumption_key
    }

    /// Current resumption key, or `""`.
    pub fn resumption_key(&self) -> &str {
        self.params.get(KEY_RESUME_KEY).unwrap_or_default()
    }

    /// Disables resumption keys and forgets the stored key.
    pub fn reset_resumption_key(&mut self) {
        self.apply_resumption_key(false, "");
    }

    fn apply_resumption_key(&mut self, enabled: bool, key: &str) {
        self.use_resumption_key = enabled;
        if enabled {
            self.params.set(KEY_RESUME_KEY, key);
            self.params.set(KEY_SHOW_RESUME_KEY, "true");
        } else {
            self.params.remove(KEY_RESUME_KEY);
            self.params.remove(KEY_SHOW_RESUME_KEY);
        }
    }

    /// Enables pagination at `page`, or disables it.
    ///
    /// # Errors
    ///
    /// [`CdxError::PaginationResumptionConflict`] while resumption keys are
    /// enabled, [`CdxError::InvalidNumber`] if `page < 0`.
    pub fn set_pagination(&mut self, enabled: bool, page: i64) -> Result<(), CdxError> {
        if self.use_resumption_key {
            return Err(CdxError::PaginationResumptionConflict);
        }
        if page < 0 {
            return Err(CdxError::InvalidNumber(format!(
                "page must not be negative, got {page}"
            )));
        }
        self.apply_pagination(enabled, page);
        Ok(())
    }

    /// Whether pagination is enabled.
    pub fn pagination_enabled(&self) -> bool {
        self.use_pagination
    }

    /// Requested page while pagination is enabled.
    pub fn page(&self) -> Option<u64> {
        if !self.use_pagination {
            return None;
        }
        self.params.get(KEY_PAGE).and_then(|v| v.parse().ok())
    }

    /// Disables pagination.
    pub fn reset_pagination(&mut self) {
        self.apply_pagination(false, 0);
    }

    fn apply_pagination(&mut self, enabled: bool, page: i64) {
        self.use_pagination = enabled;
        if enabled {
            self.params.set(KEY_PAGE, page.to_string());
        } else {
            self.params.remove(KEY_PAGE);
        }
    }

    /// Builds the request URL against the public CDX endpoint.
    ///
    /// # Errors
    ///
    /// [`CdxError::InvalidUrl`] if no target is configured.
    pub fn build_url(&self) -> Result<String, CdxError> {
        self.build_url_with(CDX_ENDPOINT)
    }

    /// Builds the request URL against `endpoint`.
    ///
    /// Parameters are emitted in ascending key order; repeated `filter` and
    /// `collapse` parameters keep the order they were added in.
    ///
    /// # Errors
    ///
    /// [`CdxError::InvalidUrl`] if no target is configured.
    pub fn build_url_with(&self, endpoint: &str) -> Result<String, CdxError> {
        if self.url().is_empty() {
            return Err(CdxError::InvalidUrl);
        }
        let url = format!("{endpoint}?{}", self.params.encode());
        debug!("Built CDX request URL: {url}");
        Ok(url)
    }

    /// Stores a resumption key received from the server.
    pub(crate) fn store_resumption_key(&mut self, key: &str) {
        if self.use_resumption_key {
            self.params.set(KEY_RESUME_KEY, key);
        }
    }
}
