//! End-to-end tests for performing queries against a mock CDX server.

use std::io::Read;

use httptest::{all_of, matchers::*, responders::*, Expectation, Server};
use reqwest::StatusCode;
use wayback_cdx::{CdxClient, CdxError, CdxQuery, ClientConfig, OutputFormat, SnapshotStatus};

const LABELS: &str =
    r#"["urlkey","timestamp","original","mimetype","statuscode","digest","length"]"#;

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
fn test_resumption_key_continues_listing() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/cdx/search/cdx"),
            request::query(url_decoded(contains(("showResumeKey", "true")))),
            request::query(url_decoded(contains(("resumeKey", "")))),
        ])
        .respond_with(status_code(200).body(format!(
            r#"[{LABELS},
["org,archive)/","20060102150405","http://archive.org/","text/html","200","AAAA","1234"],
[],
["org,archive)/ 20070102150405"]]"#
        ))),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/cdx/search/cdx"),
            request::query(url_decoded(contains((
                "resumeKey",
                "org,archive)/ 20070102150405"
            )))),
        ])
        .respond_with(status_code(200).body(format!(
            r#"[{LABELS},
["org,archive)/","20070102150405","http://archive.org/","text/html","301","BBBB","512"]]"#
        ))),
    );

    let client = client_for(&server);
    let mut query = CdxQuery::new("archive.org").unwrap();
    query.set_resumption_key(true, "").unwrap();

    let first = client.perform(&mut query).unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(query.resumption_key(), "org,archive)/ 20070102150405");

    let second = client.perform(&mut query).unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].status_code(), 301);
    assert_eq!(second[0].length(), 512);
    // no cursor row in the last page, so the stored key is kept
    assert_eq!(query.resumption_key(), "org,archive)/ 20070102150405");
}

#[test]
fn test_cursor_row_ignored_without_resumption() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/cdx/search/cdx")).respond_with(
            status_code(200).body(format!(r#"[{LABELS},["ignored-cursor"]]"#)),
        ),
    );

    let mut query = CdxQuery::new("archive.org").unwrap();
    let records = client_for(&server).perform(&mut query).unwrap();
    assert!(records.is_empty());
    assert_eq!(query.resumption_key(), "");
}

#[test]
fn test_sentinel_fields_decode_to_zero() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/cdx/search/cdx")).respond_with(
            status_code(200).body(format!(
                r#"[{LABELS},["key","20060102150405","http://x","text/html","-","digest","-"]]"#
            )),
        ),
    );

    let mut query = CdxQuery::new("x").unwrap();
    let records = client_for(&server).perform(&mut query).unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.url_key(), "key");
    assert_eq!(record.original(), "http://x");
    assert_eq!(record.mime_type(), "text/html");
    assert_eq!(record.digest(), "digest");
    assert_eq!(record.status_code(), 0);
    assert_eq!(record.length(), 0);
}

#[test]
fn test_bad_row_returns_no_records() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/cdx/search/cdx")).respond_with(
            status_code(200).body(format!(
                r#"[{LABELS},
["key","20060102150405","http://x","text/html","200","digest","10"],
["key","not-a-time","http://x","text/html","200","digest","10"]]"#
            )),
        ),
    );

    let mut query = CdxQuery::new("x").unwrap();
    assert!(matches!(
        client_for(&server).perform(&mut query),
        Err(CdxError::Timestamp(_))
    ));
}

#[test]
fn test_bad_status_is_reported() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/cdx/search/cdx"))
            .respond_with(status_code(429)),
    );

    let mut query = CdxQuery::new("archive.org").unwrap();
    query.set_output_format(OutputFormat::Json);
    let err = client_for(&server).perform(&mut query).unwrap_err();
    assert!(matches!(err, CdxError::BadResponse(s) if s == StatusCode::TOO_MANY_REQUESTS));
    assert_eq!(query.output_format(), OutputFormat::Json);
}

#[test]
fn test_raw_perform_keeps_requested_format() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/cdx/search/cdx"),
            request::query(url_decoded(not(contains(key("output"))))),
        ])
        .respond_with(status_code(200).body(CDX_LINE)),
    );

    let query = CdxQuery::new("archive.org").unwrap();
    let mut raw = client_for(&server).raw_perform(&query).unwrap();
    let mut body = String::new();
    raw.read_to_string(&mut body).unwrap();
    assert_eq!(body.lines().count(), 1);
}

#[test]
fn test_record_content_is_fetched_on_read() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/cdx/search/cdx")).respond_with(
            status_code(200).body(format!(
                r#"[{LABELS},["org,archive)/","20060102150405","archive.org/","text/html","200","AAAA","21"]]"#
            )),
        ),
    );
    server.expect(
        Expectation::matching(request::method_path(
            "GET",
            "/web/20060102150405/archive.org/",
        ))
        .respond_with(status_code(200).body("<html>archived</html>")),
    );

    let client = client_for(&server);
    let mut query = CdxQuery::new("archive.org").unwrap();
    let mut records = client.perform(&mut query).unwrap();
    let record = &mut records[0];
    assert_eq!(record.content().status(), SnapshotStatus::Unopened);

    let mut html = String::new();
    record.content().read_to_string(&mut html).unwrap();
    assert_eq!(html, "<html>archived</html>");
    assert_eq!(html.len() as u64, record.length());
    assert_eq!(record.content().status(), SnapshotStatus::Exhausted);
}
