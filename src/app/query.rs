//! Translation of command-line query options into a [`CdxQuery`].

use log::debug;

use crate::config::QueryArgs;
use crate::error_handling::CdxError;
use crate::query::{parse_timestamp, CdxQuery};

/// Builds a query from the `query`/`raw` subcommand options.
///
/// Every value goes through the library setters, so invalid input is
/// reported with the same error the library API would return.
pub fn build_query(args: &QueryArgs) -> Result<CdxQuery, CdxError> {
    let mut query = CdxQuery::new(&args.url)?;
    query.set_match_type(args.match_type);

    if let Some(limit) = args.limit {
        query.set_limit(limit)?;
    }
    if let Some(offset) = args.offset {
        query.set_offset(offset)?;
    }
    if let (Some(from), Some(to)) = (&args.from, &args.to) {
        query.set_time_range(parse_timestamp(from)?, parse_timestamp(to)?)?;
    }
    for filter in &args.filters {
        query.add_filter_expr(filter)?;
    }
    for collapse in &args.collapses {
        query.add_collapse_expr(collapse)?;
    }
    if args.no_gzip {
        query.set_gzip(false);
    }
    if args.resume || args.resume_key.is_some() {
        query.set_resumption_key(true, args.resume_key.as_deref().unwrap_or_default())?;
    }
    if let Some(page) = args.page {
        query.set_pagination(true, page)?;
    }
    if let Some(api_key) = &args.api_key {
        query.set_api_key(api_key.as_str());
    }

    debug!("Built query for {} ({})", query.url(), query.match_type());
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Command, Opt};
    use crate::query::MatchType;
    use clap::Parser;

    fn args(extra: &[&str]) -> QueryArgs {
        let mut argv = vec!["wayback_cdx", "query"];
        argv.extend_from_slice(extra);
        match Opt::try_parse_from(argv).unwrap().command {
            Command::Query(args) => args,
            other => panic!("expected query, got {other:?}"),
        }
    }

    #[test]
    fn test_build_full_query() {
        let query = build_query(&args(&[
            "archive.org",
            "--match-type",
            "host",
            "--limit",
            "1",
            "--offset",
            "1",
            "--from",
            "20060102150405",
            "--to",
            "20070102150405",
            "--filter",
            "!mimetype:text/html",
            "--collapse",
            "length:10",
            "--collapse",
            "statuscode",
        ]))
        .unwrap();
        assert_eq!(query.match_type(), MatchType::Host);
        assert_eq!(query.limit(), Some(1));
        assert_eq!(query.offset(), Some(1));
        assert_eq!(
            query.build_url().unwrap(),
            "https://web.archive.org/cdx/search/cdx?collapse=length%3A10&collapse=statuscode&filter=%21mimetype%3Atext%2Fhtml&from=20060102150405&limit=1&matchType=host&offset=1&to=20070102150405&url=archive.org"
        );
    }

    #[test]
    fn test_resume_key_enables_resumption() {
        let query = build_query(&args(&["archive.org", "--resume-key", "abc"])).unwrap();
        assert!(query.resumption_key_enabled());
        assert_eq!(query.resumption_key(), "abc");
        assert!(!query.pagination_enabled());
    }

    #[test]
    fn test_page_enables_pagination() {
        let query = build_query(&args(&["archive.org", "--page", "3"])).unwrap();
        assert!(query.pagination_enabled());
        assert_eq!(query.page(), Some(3));
    }

    #[test]
    fn test_invalid_values_are_reported() {
        assert!(matches!(
            build_query(&args(&["archive.org", "--limit", "0"])),
            Err(CdxError::InvalidNumber(_))
        ));
        assert!(matches!(
            build_query(&args(&["archive.org", "--filter", "size:10"])),
            Err(CdxError::InvalidField(_))
        ));
        assert!(matches!(
            build_query(&args(&[
                "archive.org",
                "--from",
                "20070102150405",
                "--to",
                "20060102150405"
            ])),
            Err(CdxError::InvalidFromTo)
        ));
        assert!(matches!(
            build_query(&args(&["ftp://archive.org"])),
            Err(CdxError::InvalidScheme)
        ));
    }
}
