//! Decoded CDX captures.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::snapshot::Snapshot;

/// One capture returned by [`crate::CdxClient::perform`].
///
/// Metadata is read-only. The archived content is available through
/// [`CdxRecord::content`], which fetches it on first read.
#[derive(Debug, Serialize)]
pub struct CdxRecord {
    url_key: String,
    timestamp: DateTime<Utc>,
    original: String,
    mime_type: String,
    status_code: u16,
    digest: String,
    length: u64,
    #[serde(skip)]
    content: Snapshot,
}

/// Typed fields of one data row, before a snapshot handle is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Capture {
    pub url_key: String,
    pub timestamp: DateTime<Utc>,
    pub original: String,
    pub mime_type: String,
    pub status_code: u16,
    pub digest: String,
    pub length: u64,
}

impl Capture {
    pub fn into_record(self, content: Snapshot) -> CdxRecord {
        CdxRecord {
            url_key: self.url_key,
            timestamp: self.timestamp,
            original: self.original,
            mime_type: self.mime_type,
            status_code: self.status_code,
            digest: self.digest,
            length: self.length,
            content,
        }
    }
}

impl CdxRecord {
    /// SURT-canonicalized URL key, e.g. `org,archive)/about`.
    pub fn url_key(&self) -> &str {
        &self.url_key
    }

    /// Capture time.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// URL as it was originally crawled.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// MIME type reported for the capture.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// HTTP status of the capture, 0 when the archive does not know it.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Content digest (base32 SHA-1).
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Stored length in bytes, 0 when the archive does not know it.
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Lazily fetched archived content of this capture.
    pub fn content(&mut self) -> &mut Snapshot {
        &mut self.content
    }

    /// Detaches the content handle from the record.
    pub fn into_content(self) -> Snapshot {
        self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::CdxClient;
    use crate::config::ClientConfig;
    use crate::query::parse_timestamp;
    use crate::snapshot::SnapshotStatus;

    fn record() -> CdxRecord {
        let client = CdxClient::new(ClientConfig::default()).unwrap();
        let timestamp = parse_timestamp("20060102150405").unwrap();
        let capture = Capture {
            url_key: "org,archive)/".to_string(),
            timestamp,
            original: "http://archive.org/".to_string(),
            mime_type: "text/html".to_string(),
            status_code: 200,
            digest: "AAAA".to_string(),
            length: 1234,
        };
        capture.into_record(client.snapshot("http://archive.org/", timestamp))
    }

    #[test]
    fn test_into_content_keeps_binding() {
        let record = record();
        let timestamp = record.timestamp();
        let snapshot = record.into_content();
        assert_eq!(snapshot.original(), "http://archive.org/");
        assert_eq!(snapshot.timestamp(), timestamp);
        assert_eq!(snapshot.status(), SnapshotStatus::Unopened);
    }

    #[test]
    fn test_serialize_skips_content() {
        let value = serde_json::to_value(record()).unwrap();
        assert_eq!(value["url_key"], "org,archive)/");
        assert_eq!(value["length"], 1234);
        assert!(value.get("content").is_none());
    }
}
