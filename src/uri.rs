//! Splits a connection URI into an application path and a publication name.
//!
//! The convention mirrors RTMP playback urls: the application is the first
//! one or two directories of the path (`/ondemand/`, `/flash/live/`, ...) and
//! the publication is the rest, optionally prefixed with a container hint
//! such as `mp4:`. No network I/O happens here.

use thiserror::Error;
use url::Url;

/// The application path and publication name extracted from a connection URI
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// First one or two path segments after the host
    pub application: String,

    /// Remainder of the path, container hint prefix preserved
    pub publication: String,
}

/// Represents the type of error hit while resolving a connection URI
#[derive(Debug, Error)]
pub enum UriError {
    /// Encountered when the URI cannot be parsed at all
    #[error("The URI could not be parsed: {0}")]
    Malformed(#[from] url::ParseError),

    /// Encountered when the URI carries no host to connect to
    #[error("The URI has no host component")]
    MissingHost,

    /// Encountered when the path is too short to name both an application
    /// and a publication
    #[error("The URI path does not name both an application and a publication")]
    MissingPublication,
}

/// Extracts the application path and publication name from a connection URI.
///
/// The application takes two leading segments whenever at least one segment
/// remains for the publication, otherwise one. A path with fewer than two
/// segments cannot name a publication and is rejected.
pub fn resolve(uri: &str) -> Result<ResolvedTarget, UriError> {
    let parsed = Url::parse(uri)?;
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(UriError::MissingHost);
    }

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|segments| segments.filter(|segment| !segment.is_empty()).collect())
        .unwrap_or_default();

    if segments.len() < 2 {
        return Err(UriError::MissingPublication);
    }

    let application_segments = if segments.len() > 2 { 2 } else { 1 };
    Ok(ResolvedTarget {
        application: segments[..application_segments].join("/"),
        publication: segments[application_segments..].join("/"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_path_takes_two_application_segments() {
        let target = resolve("rtmfp://host/app/sub/path/name").unwrap();

        assert_eq!(target.application, "app/sub");
        assert_eq!(target.publication, "path/name");
    }

    #[test]
    fn short_path_takes_one_application_segment() {
        let target = resolve("rtmfp://host/app/mp4:clip").unwrap();

        assert_eq!(target.application, "app");
        assert_eq!(target.publication, "mp4:clip");
    }

    #[test]
    fn three_segment_path_leaves_one_publication_segment() {
        let target = resolve("rtmfp://host/flash/live/stream").unwrap();

        assert_eq!(target.application, "flash/live");
        assert_eq!(target.publication, "stream");
    }

    #[test]
    fn port_does_not_change_the_split() {
        let target = resolve("rtmfp://host:1935/live/stream").unwrap();

        assert_eq!(target.application, "live");
        assert_eq!(target.publication, "stream");
    }

    #[test]
    fn uri_without_a_host_is_rejected() {
        let result = resolve("rtmfp:stream");

        assert!(
            matches!(result, Err(UriError::MissingHost)),
            "Expected MissingHost, got {:?}",
            result
        );
    }

    #[test]
    fn uri_without_a_scheme_is_rejected() {
        let result = resolve("host/app/stream");

        assert!(
            matches!(result, Err(UriError::Malformed(_))),
            "Expected Malformed, got {:?}",
            result
        );
    }

    #[test]
    fn path_without_a_publication_is_rejected() {
        for uri in ["rtmfp://host/app", "rtmfp://host/", "rtmfp://host"] {
            let result = resolve(uri);
            assert!(
                matches!(result, Err(UriError::MissingPublication)),
                "Expected MissingPublication for '{}', got {:?}",
                uri,
                result
            );
        }
    }
}
