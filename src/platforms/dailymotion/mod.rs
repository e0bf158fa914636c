//! Dailymotion handler backed by the public player metadata endpoint.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;

use crate::core::normalize::{self, RawMedia};
use crate::core::stealth::FetchOptions;
use crate::error::ExtractError;
use crate::models::media::MediaType;
use crate::platforms::generic_ytdlp::YtdlpStrategy;
use crate::platforms::traits::{ExtractContext, SourceHandler, Strategy, StrategyOutcome};

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:dailymotion\.com/(?:video|embed/video)/|dai\.ly/)(\w+)")
        .expect("video id pattern must compile")
});

// Progressive qualities the player exposes, best first.
const QUALITY_LADDER: &[&str] = &["1080", "720", "480", "380", "240"];

pub fn handler() -> SourceHandler {
    SourceHandler::new(
        "dailymotion",
        &[
            r"^https?://(www\.)?dailymotion\.com/video/\w+",
            r"^https?://(www\.)?dailymotion\.com/embed/video/\w+",
            r"^https?://dai\.ly/\w+",
        ],
        r"(?:dailymotion\.com/(?:video|embed/video)/|dai\.ly/)(\w+)",
        vec![
            Box::new(MetadataStrategy),
            Box::new(YtdlpStrategy::new("dailymotion")),
        ],
    )
}

pub struct MetadataStrategy;

impl MetadataStrategy {
    fn parse_video_id(url: &str) -> Option<String> {
        VIDEO_ID_RE
            .captures(url)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn classify_metadata_error(error: &Value) -> ExtractError {
        let title = error
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_lowercase();
        if title.contains("age") {
            ExtractError::AgeRestricted
        } else if title.contains("password") || title.contains("private") {
            ExtractError::LoginRequired
        } else {
            ExtractError::NotFound
        }
    }

    /// Walk the quality ladder for the best progressive MP4, falling back to
    /// the adaptive HLS manifest when nothing progressive is offered.
    fn pick_stream(qualities: &Value) -> Option<(String, String, String)> {
        for quality in QUALITY_LADDER {
            let Some(entries) = qualities.get(*quality).and_then(|v| v.as_array()) else {
                continue;
            };
            for entry in entries {
                let entry_type = entry.get("type").and_then(|v| v.as_str()).unwrap_or_default();
                let url = entry.get("url").and_then(|v| v.as_str()).unwrap_or_default();
                if entry_type == "video/mp4" && !url.is_empty() {
                    return Some((url.to_string(), format!("{}p", quality), "mp4".to_string()));
                }
            }
        }

        let hls = qualities
            .pointer("/auto/0/url")
            .and_then(|v| v.as_str())
            .filter(|u| !u.is_empty())?;
        Some((hls.to_string(), "adaptive".to_string(), "m3u8".to_string()))
    }

    fn pick_poster(posters: &Value) -> Option<String> {
        for size in ["1080", "720", "480", "360", "240", "180", "120", "60"] {
            if let Some(url) = posters.get(size).and_then(|v| v.as_str()) {
                if !url.is_empty() {
                    return Some(url.to_string());
                }
            }
        }
        None
    }

    fn metadata_to_raw(data: &Value) -> Result<RawMedia, ExtractError> {
        if let Some(error) = data.get("error") {
            if !error.is_null() {
                return Err(Self::classify_metadata_error(error));
            }
        }

        let Some((download_url, quality, format)) =
            data.get("qualities").and_then(Self::pick_stream)
        else {
            return Err(ExtractError::ExtractionFailed);
        };

        Ok(RawMedia {
            title: data
                .get("title")
                .and_then(|v| v.as_str())
                .map(|t| t.to_string()),
            thumbnail: data.get("posters").and_then(Self::pick_poster),
            media_type: Some(MediaType::Video),
            format: Some(format),
            quality: Some(quality),
            download_url: Some(download_url),
            duration: data.get("duration").and_then(|v| v.as_u64()),
            author: data
                .pointer("/owner/screenname")
                .and_then(|v| v.as_str())
                .map(|a| a.to_string()),
            ..Default::default()
        })
    }
}

#[async_trait]
impl Strategy for MetadataStrategy {
    fn name(&self) -> &'static str {
        "player-metadata"
    }

    fn soft_timeout(&self) -> Duration {
        Duration::from_secs(10)
    }

    async fn attempt(&self, url: &str, ctx: &ExtractContext) -> StrategyOutcome {
        let Some(video_id) = Self::parse_video_id(url) else {
            return StrategyOutcome::Permanent(ExtractError::InvalidUrl);
        };

        let metadata_url = format!(
            "https://www.dailymotion.com/player/metadata/video/{}",
            video_id
        );
        let response = match ctx
            .stealth
            .fetch(
                &metadata_url,
                FetchOptions {
                    referer: Some(format!("https://www.dailymotion.com/video/{}", video_id)),
                    ..Default::default()
                },
            )
            .await
        {
            Ok(r) => r,
            Err(e) => return StrategyOutcome::Transient(e),
        };

        if response.status == 404 {
            return StrategyOutcome::Permanent(ExtractError::NotFound);
        }
        if response.status != 200 {
            return StrategyOutcome::Transient(anyhow::anyhow!(
                "metadata endpoint returned HTTP {}",
                response.status
            ));
        }

        let Ok(data) = response.json() else {
            return StrategyOutcome::NoResult;
        };

        match Self::metadata_to_raw(&data) {
            Ok(raw) => match normalize::normalize(raw, "dailymotion") {
                Ok(media) => StrategyOutcome::Success(media),
                Err(_) => StrategyOutcome::NoResult,
            },
            Err(ExtractError::ExtractionFailed) => StrategyOutcome::NoResult,
            Err(err) => StrategyOutcome::from_error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_video_ids() {
        for url in [
            "https://www.dailymotion.com/video/x8abc12",
            "https://www.dailymotion.com/embed/video/x8abc12",
            "https://dai.ly/x8abc12",
        ] {
            assert_eq!(
                MetadataStrategy::parse_video_id(url).as_deref(),
                Some("x8abc12"),
                "url: {}",
                url
            );
        }
    }

    #[test]
    fn picks_best_progressive_quality() {
        let data = json!({
            "title": "A clip",
            "duration": 95,
            "owner": {"screenname": "someone"},
            "qualities": {
                "480": [{"type": "video/mp4", "url": "https://cdn/480.mp4"}],
                "720": [
                    {"type": "application/x-mpegURL", "url": "https://cdn/720.m3u8"},
                    {"type": "video/mp4", "url": "https://cdn/720.mp4"},
                ],
            },
            "posters": {"720": "https://cdn/poster-720.jpg"},
        });
        let raw = MetadataStrategy::metadata_to_raw(&data).unwrap();
        assert_eq!(raw.download_url.as_deref(), Some("https://cdn/720.mp4"));
        assert_eq!(raw.quality.as_deref(), Some("720p"));
        assert_eq!(raw.format.as_deref(), Some("mp4"));
        assert_eq!(raw.thumbnail.as_deref(), Some("https://cdn/poster-720.jpg"));
        assert_eq!(raw.duration, Some(95));
        assert_eq!(raw.author.as_deref(), Some("someone"));
    }

    #[test]
    fn falls_back_to_hls_manifest() {
        let data = json!({
            "title": "Live-ish",
            "qualities": {
                "auto": [{"type": "application/x-mpegURL", "url": "https://cdn/master.m3u8"}],
            },
        });
        let raw = MetadataStrategy::metadata_to_raw(&data).unwrap();
        assert_eq!(raw.download_url.as_deref(), Some("https://cdn/master.m3u8"));
        assert_eq!(raw.format.as_deref(), Some("m3u8"));
        assert_eq!(raw.quality.as_deref(), Some("adaptive"));
    }

    #[test]
    fn classifies_embedded_errors() {
        let age = json!({"error": {"title": "Age-restricted content"}});
        assert_eq!(
            MetadataStrategy::metadata_to_raw(&age).unwrap_err(),
            ExtractError::AgeRestricted
        );

        let private = json!({"error": {"title": "Private video"}});
        assert_eq!(
            MetadataStrategy::metadata_to_raw(&private).unwrap_err(),
            ExtractError::LoginRequired
        );

        let gone = json!({"error": {"title": "Content rejected"}});
        assert_eq!(
            MetadataStrategy::metadata_to_raw(&gone).unwrap_err(),
            ExtractError::NotFound
        );
    }

    #[test]
    fn no_streams_is_extraction_failed() {
        let data = json!({"title": "empty", "qualities": {}});
        assert_eq!(
            MetadataStrategy::metadata_to_raw(&data).unwrap_err(),
            ExtractError::ExtractionFailed
        );
    }
}
