use thiserror::Error;

/// The fixed failure taxonomy surfaced to callers.
///
/// Every failure an extraction can end in maps to exactly one of these kinds.
/// Messages are fixed templates; raw upstream diagnostics never reach the
/// caller verbatim. Kinds are immutable once constructed and are propagated,
/// never rewritten, on their way up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("URL format is invalid")]
    InvalidUrl,

    #[error("This platform is not supported")]
    UnsupportedPlatform { supported: Vec<String> },

    #[error("Content not found or is private")]
    NotFound,

    #[error("This content is age-restricted and cannot be extracted")]
    AgeRestricted,

    #[error("This content is not available in the server's region")]
    GeoBlocked,

    #[error("This content requires signing in to view")]
    LoginRequired,

    #[error("Could not reach the platform")]
    Upstream,

    #[error("Extraction timed out. The platform may be throttling this server, try again shortly")]
    Timeout,

    #[error("Failed to extract content")]
    ExtractionFailed,
}

impl ExtractError {
    /// Stable external identifier for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ExtractError::InvalidUrl => "invalid_url",
            ExtractError::UnsupportedPlatform { .. } => "unsupported_platform",
            ExtractError::NotFound => "not_found",
            ExtractError::AgeRestricted => "age_restricted",
            ExtractError::GeoBlocked => "geo_blocked",
            ExtractError::LoginRequired => "login_required",
            ExtractError::Upstream => "upstream_error",
            ExtractError::Timeout => "timeout",
            ExtractError::ExtractionFailed => "extraction_failed",
        }
    }

    /// Stable status class the HTTP layer maps this kind to.
    pub fn status(&self) -> u16 {
        match self {
            ExtractError::InvalidUrl => 400,
            ExtractError::UnsupportedPlatform { .. } => 400,
            ExtractError::NotFound => 404,
            ExtractError::AgeRestricted => 403,
            ExtractError::GeoBlocked => 451,
            ExtractError::LoginRequired => 401,
            ExtractError::Upstream => 502,
            ExtractError::Timeout => 504,
            ExtractError::ExtractionFailed => 503,
        }
    }

    /// Whether retrying through another extraction path could change the
    /// outcome. Permanent kinds halt a strategy chain immediately.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            ExtractError::InvalidUrl
                | ExtractError::UnsupportedPlatform { .. }
                | ExtractError::NotFound
                | ExtractError::AgeRestricted
                | ExtractError::GeoBlocked
                | ExtractError::LoginRequired
        )
    }
}
