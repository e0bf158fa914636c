//! Folds heterogeneous upstream metadata into the canonical result shape.

use crate::error::ExtractError;
use crate::models::media::{MediaInfo, MediaType};

/// Maximum length of a human-readable title, in characters.
pub const MAX_TITLE_LEN: usize = 80;

/// Partially-filled metadata as one strategy saw it. Everything is optional
/// here; `normalize` supplies defaults for all but the download URL.
#[derive(Debug, Default, Clone)]
pub struct RawMedia {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub media_type: Option<MediaType>,
    pub format: Option<String>,
    pub quality: Option<String>,
    pub file_size: Option<u64>,
    pub download_url: Option<String>,
    pub duration: Option<u64>,
    pub author: Option<String>,
}

/// Build the canonical result. There is no partial success: input without a
/// resolvable download URL is rejected outright.
pub fn normalize(raw: RawMedia, platform: &str) -> Result<MediaInfo, ExtractError> {
    let download_url = match raw.download_url {
        Some(u) if !u.trim().is_empty() => u,
        _ => return Err(ExtractError::ExtractionFailed),
    };

    let format = raw
        .format
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| "mp4".to_string());
    let media_type = raw
        .media_type
        .unwrap_or_else(|| media_type_for_format(&format));

    let title = raw
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| default_title(platform));

    Ok(MediaInfo {
        platform: platform.to_string(),
        title: truncate_title(&title),
        thumbnail: raw.thumbnail.unwrap_or_default(),
        media_type,
        format,
        quality: raw
            .quality
            .filter(|q| !q.is_empty())
            .unwrap_or_else(|| "original".to_string()),
        file_size: raw.file_size.unwrap_or(0),
        download_url,
        duration: raw.duration,
        author: raw.author.filter(|a| !a.is_empty()),
    })
}

/// Clamp a title to `MAX_TITLE_LEN` characters; overlong titles come back as
/// exactly the maximum, ending in a single ellipsis.
pub fn truncate_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.chars().count() <= MAX_TITLE_LEN {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(MAX_TITLE_LEN - 1).collect();
    out.push('\u{2026}');
    out
}

/// Derive the media kind from a container format or file extension.
pub fn media_type_for_format(format: &str) -> MediaType {
    match format.trim_start_matches('.').to_lowercase().as_str() {
        "jpg" | "jpeg" | "png" | "webp" | "gif" | "avif" | "bmp" => MediaType::Image,
        "mp3" | "m4a" | "aac" | "ogg" | "opus" | "wav" | "flac" => MediaType::Audio,
        "pdf" | "doc" | "docx" | "txt" | "epub" => MediaType::Document,
        _ => MediaType::Video,
    }
}

fn default_title(platform: &str) -> String {
    let mut chars = platform.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
    format!("Untitled {} Post", capitalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_download_url() {
        let err = normalize(RawMedia::default(), "reddit").unwrap_err();
        assert_eq!(err, ExtractError::ExtractionFailed);
    }

    #[test]
    fn rejects_empty_download_url() {
        let raw = RawMedia {
            download_url: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            normalize(raw, "reddit").unwrap_err(),
            ExtractError::ExtractionFailed
        );
    }

    #[test]
    fn fills_source_appropriate_defaults() {
        let raw = RawMedia {
            download_url: Some("https://cdn.example.com/v.mp4".to_string()),
            ..Default::default()
        };
        let info = normalize(raw, "tiktok").unwrap();
        assert_eq!(info.title, "Untitled Tiktok Post");
        assert_eq!(info.media_type, MediaType::Video);
        assert_eq!(info.quality, "original");
        assert_eq!(info.file_size, 0);
        assert!(info.thumbnail.is_empty());
    }

    #[test]
    fn long_title_clamps_to_exactly_max_with_ellipsis() {
        let long: String = std::iter::repeat('a').take(200).collect();
        let out = truncate_title(&long);
        assert_eq!(out.chars().count(), MAX_TITLE_LEN);
        assert!(out.ends_with('\u{2026}'));
        assert_eq!(out.matches('\u{2026}').count(), 1);
    }

    #[test]
    fn short_title_untouched() {
        assert_eq!(truncate_title("a fine title"), "a fine title");
    }

    #[test]
    fn multibyte_titles_count_characters_not_bytes() {
        let long: String = std::iter::repeat('é').take(200).collect();
        let out = truncate_title(&long);
        assert_eq!(out.chars().count(), MAX_TITLE_LEN);
    }

    #[test]
    fn media_kind_from_extension() {
        assert_eq!(media_type_for_format("jpg"), MediaType::Image);
        assert_eq!(media_type_for_format("MP3"), MediaType::Audio);
        assert_eq!(media_type_for_format("pdf"), MediaType::Document);
        assert_eq!(media_type_for_format("mp4"), MediaType::Video);
        assert_eq!(media_type_for_format("webm"), MediaType::Video);
    }

    #[test]
    fn explicit_media_type_wins_over_format() {
        let raw = RawMedia {
            download_url: Some("https://cdn.example.com/clip".to_string()),
            media_type: Some(MediaType::Audio),
            format: Some("mp4".to_string()),
            ..Default::default()
        };
        let info = normalize(raw, "spotify").unwrap();
        assert_eq!(info.media_type, MediaType::Audio);
    }
}
