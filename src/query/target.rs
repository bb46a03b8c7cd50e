//! Target URL validation.

use log::debug;
use url::{ParseError, Url};

use crate::error_handling::CdxError;

/// Base used to check that scheme-less targets are well-formed.
const RELATIVE_BASE: &str = "http://web.archive.org/";

/// Validates a CDX lookup target.
///
/// The CDX API accepts bare hosts and paths (`archive.org/about`), URLs with
/// an `http` or `https` scheme, and scheme-relative URLs (`//archive.org/`).
/// Wildcard patterns such as `*.archive.org` or `archive.org/*` are passed
/// through unchanged.
///
/// # Errors
///
/// * [`CdxError::InvalidScheme`] if a scheme other than `http`/`https` is present.
/// * [`CdxError::InvalidUrl`] if the text does not follow the URL grammar.
pub fn validate_target(target: &str) -> Result<(), CdxError> {
    match Url::parse(target) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => {
                debug!("Rejecting target {target:?} with scheme {other:?}");
                Err(CdxError::InvalidScheme)
            }
        },
        Err(ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(RELATIVE_BASE).map_err(|_| CdxError::InvalidUrl)?;
            base.join(target).map(|_| ()).map_err(|e| {
                debug!("Rejecting target {target:?}: {e}");
                CdxError::InvalidUrl
            })
        }
        Err(e) => {
            debug!("Rejecting target {target:?}: {e}");
            Err(CdxError::InvalidUrl)
        }
    }
}
