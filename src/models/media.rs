use serde::{Deserialize, Serialize};

/// Canonical description of one extracted piece of media.
///
/// This is the wire shape handed to the HTTP layer on success. A `MediaInfo`
/// always carries a fetchable `download_url`; the normalizer refuses to build
/// one without it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    pub platform: String,
    pub title: String,
    pub thumbnail: String,
    pub media_type: MediaType,
    pub format: String,
    pub quality: String,
    /// Byte size, 0 when the upstream does not report one.
    pub file_size: u64,
    pub download_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Video,
    Audio,
    Image,
    Document,
}
