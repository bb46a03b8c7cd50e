//! Enumerations accepted by the CDX API.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::error_handling::CdxError;

/// How the target URL is matched against the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, ValueEnum)]
pub enum MatchType {
    /// Exactly `example.org/page.html`
    #[default]
    Exact,
    /// Everything under a path, e.g. `example.org/subdir/`
    Prefix,
    /// Everything on the host `example.org`
    Host,
    /// The host and all of its subdomains (`*.example.org`)
    Domain,
}

impl MatchType {
    /// Wire value of the `matchType` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Prefix => "prefix",
            MatchType::Host => "host",
            MatchType::Domain => "domain",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchType {
    type Err = CdxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(MatchType::Exact),
            "prefix" => Ok(MatchType::Prefix),
            "host" => Ok(MatchType::Host),
            "domain" => Ok(MatchType::Domain),
            other => Err(CdxError::InvalidMatchType(other.to_string())),
        }
    }
}

/// Wire format of a CDX response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, ValueEnum)]
pub enum OutputFormat {
    /// Space separated CDX lines (the server default, no `output` key)
    #[default]
    Cdx,
    /// A JSON array of string arrays, first row holding the labels
    Json,
}

impl OutputFormat {
    /// Wire value of the `output` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Cdx => "cdx",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = CdxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cdx" => Ok(OutputFormat::Cdx),
            "json" => Ok(OutputFormat::Json),
            other => Err(CdxError::InvalidOutputFormat(other.to_string())),
        }
    }
}

/// A column of a CDX row, usable in filters and collapse directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Field {
    /// SURT-canonicalized URL key
    UrlKey,
    /// Capture timestamp
    Timestamp,
    /// Original URL
    Original,
    /// MIME type of the capture
    MimeType,
    /// HTTP status code
    StatusCode,
    /// Content digest
    Digest,
    /// Content length
    Length,
}

impl Field {
    /// Column name as used by the CDX API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::UrlKey => "urlkey",
            Field::Timestamp => "timestamp",
            Field::Original => "original",
            Field::MimeType => "mimetype",
            Field::StatusCode => "statuscode",
            Field::Digest => "digest",
            Field::Length => "length",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = CdxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CdxError::InvalidField(s.to_string()))
    }
}
