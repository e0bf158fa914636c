//! Broad fallback strategy delegating to yt-dlp.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::normalize::{self, RawMedia};
use crate::core::profiles;
use crate::core::ytdlp;
use crate::platforms::traits::{ExtractContext, Strategy, StrategyOutcome};

pub struct YtdlpStrategy {
    platform: &'static str,
    format_spec: &'static str,
    stealth_identity: bool,
    soft_timeout: Duration,
}

impl YtdlpStrategy {
    /// Plain invocation, yt-dlp's own default identity.
    pub fn new(platform: &'static str) -> Self {
        Self {
            platform,
            format_spec: "best[ext=mp4]/best",
            stealth_identity: false,
            soft_timeout: Duration::from_secs(20),
        }
    }

    /// Invocation carrying a rotated browser identity, for platforms that
    /// fingerprint their callers.
    pub fn with_stealth(platform: &'static str) -> Self {
        Self {
            stealth_identity: true,
            ..Self::new(platform)
        }
    }

    pub fn soft_timeout_secs(mut self, secs: u64) -> Self {
        self.soft_timeout = Duration::from_secs(secs);
        self
    }

    /// Map a yt-dlp info document onto the raw metadata bag.
    fn info_to_raw(info: &Value) -> RawMedia {
        let ext = info
            .get("ext")
            .and_then(|v| v.as_str())
            .unwrap_or("mp4")
            .to_string();

        let title = info
            .get("title")
            .and_then(|v| v.as_str())
            .filter(|t| !t.is_empty())
            .or_else(|| info.get("description").and_then(|v| v.as_str()))
            .map(|t| t.to_string());

        let height = info.get("height").and_then(|v| v.as_u64()).unwrap_or(0);
        let quality = if height > 0 {
            Some(format!("{}p", height))
        } else {
            None
        };

        let file_size = info
            .get("filesize")
            .or_else(|| info.get("filesize_approx"))
            .and_then(|v| v.as_u64());

        let author = info
            .get("uploader")
            .or_else(|| info.get("creator"))
            .or_else(|| info.get("uploader_id"))
            .and_then(|v| v.as_str())
            .map(|a| a.to_string());

        RawMedia {
            title,
            thumbnail: info
                .get("thumbnail")
                .and_then(|v| v.as_str())
                .map(|t| t.to_string()),
            media_type: Some(normalize::media_type_for_format(&ext)),
            format: Some(ext),
            quality,
            file_size,
            download_url: info
                .get("url")
                .and_then(|v| v.as_str())
                .map(|u| u.to_string()),
            duration: info
                .get("duration")
                .and_then(|v| v.as_f64())
                .map(|d| d as u64),
            author,
        }
    }
}

#[async_trait]
impl Strategy for YtdlpStrategy {
    fn name(&self) -> &'static str {
        "generic-ytdlp"
    }

    fn soft_timeout(&self) -> Duration {
        self.soft_timeout
    }

    async fn attempt(&self, url: &str, ctx: &ExtractContext) -> StrategyOutcome {
        let profile = self.stealth_identity.then(profiles::random_profile);

        let info = match ytdlp::dump_info(&ctx.config.ytdlp_path, url, self.format_spec, profile)
            .await
        {
            Ok(info) => info,
            Err(err) => return StrategyOutcome::from_error(err),
        };

        let raw = Self::info_to_raw(&info);
        if raw.download_url.is_none() {
            return StrategyOutcome::NoResult;
        }

        match normalize::normalize(raw, self.platform) {
            Ok(media) => StrategyOutcome::Success(media),
            Err(_) => StrategyOutcome::NoResult,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media::MediaType;
    use serde_json::json;

    #[test]
    fn maps_info_document() {
        let info = json!({
            "title": "A clip",
            "ext": "mp4",
            "height": 720,
            "filesize": 1048576,
            "url": "https://cdn.example.com/clip.mp4",
            "thumbnail": "https://cdn.example.com/thumb.jpg",
            "duration": 12.7,
            "uploader": "someone",
        });
        let raw = YtdlpStrategy::info_to_raw(&info);
        assert_eq!(raw.title.as_deref(), Some("A clip"));
        assert_eq!(raw.quality.as_deref(), Some("720p"));
        assert_eq!(raw.file_size, Some(1048576));
        assert_eq!(raw.duration, Some(12));
        assert_eq!(raw.media_type, Some(MediaType::Video));
        assert_eq!(raw.author.as_deref(), Some("someone"));
    }

    #[test]
    fn image_extension_becomes_image_kind() {
        let info = json!({
            "title": "A picture",
            "ext": "jpg",
            "url": "https://cdn.example.com/pic.jpg",
        });
        let raw = YtdlpStrategy::info_to_raw(&info);
        assert_eq!(raw.media_type, Some(MediaType::Image));
        assert!(raw.quality.is_none());
    }

    #[test]
    fn missing_url_maps_to_none() {
        let info = json!({"title": "no stream", "ext": "mp4"});
        let raw = YtdlpStrategy::info_to_raw(&info);
        assert!(raw.download_url.is_none());
    }

    #[test]
    fn falls_back_to_filesize_approx_and_description() {
        let info = json!({
            "description": "described only",
            "ext": "mp4",
            "filesize_approx": 2048,
            "url": "https://cdn.example.com/v.mp4",
        });
        let raw = YtdlpStrategy::info_to_raw(&info);
        assert_eq!(raw.title.as_deref(), Some("described only"));
        assert_eq!(raw.file_size, Some(2048));
    }
}
