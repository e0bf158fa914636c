//! Maps raw upstream failure signals to the canonical error taxonomy.
//!
//! The rule order is load-bearing: specific, actionable kinds are checked
//! before the generic network catch-alls so a "private video" diagnostic is
//! never misreported as a connectivity problem just because it also mentions
//! a connection.

use crate::error::ExtractError;

const NOT_FOUND_KEYWORDS: &[&str] = &[
    "not found",
    "404",
    "private",
    "unavailable",
    "no longer available",
    "removed",
    "deleted",
    "does not exist",
];

const AGE_KEYWORDS: &[&str] = &[
    "age-restricted",
    "age restricted",
    "confirm your age",
    "18 years",
    "adult content",
    "explicit content",
    "inappropriate for some users",
];

const LOGIN_KEYWORDS: &[&str] = &[
    "login",
    "log in",
    "logged in",
    "sign in",
    "authentication",
    "use --cookies",
    "account",
];

const GEO_KEYWORDS: &[&str] = &[
    "geo",
    "not available in your country",
    "blocked in your",
    "unavailable in your region",
];

const NETWORK_KEYWORDS: &[&str] = &[
    "urlopen error",
    "timed out",
    "timeout",
    "connection",
    "network",
    "unreachable",
    "temporary failure",
    "name resolution",
    "reset by peer",
    "handshake",
];

/// Classify a raw upstream failure signal: an optional status code plus any
/// free-text diagnostic. Pure and deterministic.
pub fn classify_upstream(status: Option<u16>, diagnostic: &str) -> ExtractError {
    let text = diagnostic.to_lowercase();
    let has = |keywords: &[&str]| keywords.iter().any(|k| text.contains(k));

    if matches!(status, Some(404) | Some(410)) || has(NOT_FOUND_KEYWORDS) {
        return ExtractError::NotFound;
    }
    if has(AGE_KEYWORDS) {
        return ExtractError::AgeRestricted;
    }
    if matches!(status, Some(401) | Some(403)) || has(LOGIN_KEYWORDS) {
        return ExtractError::LoginRequired;
    }
    if status == Some(451) || has(GEO_KEYWORDS) {
        return ExtractError::GeoBlocked;
    }
    if matches!(status, Some(429)) || status.is_some_and(|s| s >= 500) || has(NETWORK_KEYWORDS) {
        return ExtractError::Upstream;
    }

    ExtractError::ExtractionFailed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_wins_over_connectivity_words() {
        // A private video message mentioning a connection is still not-found.
        let err = classify_upstream(None, "This private video timed out over the connection");
        assert_eq!(err, ExtractError::NotFound);
    }

    #[test]
    fn age_before_login() {
        let err = classify_upstream(None, "age-restricted: sign in to confirm your age");
        assert_eq!(err, ExtractError::AgeRestricted);
    }

    #[test]
    fn login_keywords() {
        assert_eq!(
            classify_upstream(None, "ERROR: use --cookies to provide authentication"),
            ExtractError::LoginRequired
        );
        assert_eq!(classify_upstream(Some(403), ""), ExtractError::LoginRequired);
    }

    #[test]
    fn geo_restriction() {
        assert_eq!(
            classify_upstream(None, "the uploader has not made this video available in your country"),
            ExtractError::GeoBlocked
        );
        assert_eq!(classify_upstream(Some(451), ""), ExtractError::GeoBlocked);
    }

    #[test]
    fn network_failures_are_upstream() {
        assert_eq!(
            classify_upstream(None, "urlopen error [Errno 110] connection refused"),
            ExtractError::Upstream
        );
        assert_eq!(classify_upstream(Some(502), ""), ExtractError::Upstream);
        assert_eq!(classify_upstream(Some(429), ""), ExtractError::Upstream);
    }

    #[test]
    fn status_codes_alone() {
        assert_eq!(classify_upstream(Some(404), ""), ExtractError::NotFound);
        assert_eq!(classify_upstream(Some(410), ""), ExtractError::NotFound);
        assert_eq!(classify_upstream(Some(401), ""), ExtractError::LoginRequired);
    }

    #[test]
    fn unmatched_signal_is_extraction_failed() {
        assert_eq!(
            classify_upstream(None, "some entirely novel failure"),
            ExtractError::ExtractionFailed
        );
        assert_eq!(classify_upstream(None, ""), ExtractError::ExtractionFailed);
    }

    #[test]
    fn classification_is_deterministic() {
        let signal = "Video unavailable: removed by the uploader";
        let first = classify_upstream(None, signal);
        for _ in 0..10 {
            assert_eq!(classify_upstream(None, signal), first);
        }
    }
}
