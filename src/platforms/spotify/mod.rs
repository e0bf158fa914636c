//! Spotify handler: podcast episode previews via the oEmbed and embed pages.
//!
//! Music tracks carry no publicly fetchable audio at all, so only episodes
//! are serviceable, and only their preview clip.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;

use crate::core::normalize::{self, RawMedia};
use crate::core::stealth::FetchOptions;
use crate::error::ExtractError;
use crate::models::media::MediaType;
use crate::platforms::traits::{ExtractContext, SourceHandler, Strategy, StrategyOutcome};

static RESOURCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"open\.spotify\.com/(episode|track|album|playlist|show)/([A-Za-z0-9]+)")
        .expect("resource pattern must compile")
});
static AUDIO_PREVIEW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""audioPreview"\s*:\s*\{\s*"url"\s*:\s*"([^"]+)""#)
        .expect("audio preview pattern must compile")
});
static PREVIEW_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""audio_preview_url"\s*:\s*"([^"]+)""#)
        .expect("preview url pattern must compile")
});
static NEXT_DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<script id="__NEXT_DATA__" type="application/json">(.*?)</script>"#)
        .expect("next data pattern must compile")
});
static ANY_MP3_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https://[^"'\s]+\.mp3[^"'\s]*"#).expect("mp3 pattern must compile")
});

pub fn handler() -> SourceHandler {
    SourceHandler::new(
        "spotify",
        &[r"^https?://open\.spotify\.com/(episode|track|album|playlist|show)/[A-Za-z0-9]+"],
        r"open\.spotify\.com/(?:episode|track|album|playlist|show)/([A-Za-z0-9]+)",
        vec![Box::new(EpisodeStrategy)],
    )
}

pub struct EpisodeStrategy;

impl EpisodeStrategy {
    fn parse_resource(url: &str) -> Option<(String, String)> {
        let caps = RESOURCE_RE.captures(url)?;
        Some((caps[1].to_string(), caps[2].to_string()))
    }

    /// Recursively search a JSON document for an audio preview URL.
    fn find_preview_in_json(value: &Value) -> Option<String> {
        match value {
            Value::Object(map) => {
                for key in ["audioPreview", "audio_preview_url"] {
                    match map.get(key) {
                        Some(Value::String(url)) if !url.is_empty() => {
                            return Some(url.clone())
                        }
                        Some(Value::Object(inner)) => {
                            if let Some(Value::String(url)) = inner.get("url") {
                                if !url.is_empty() {
                                    return Some(url.clone());
                                }
                            }
                        }
                        _ => {}
                    }
                }
                map.values().find_map(Self::find_preview_in_json)
            }
            Value::Array(items) => items.iter().find_map(Self::find_preview_in_json),
            _ => None,
        }
    }

    fn find_preview_in_page(html: &str) -> Option<String> {
        if let Some(caps) = AUDIO_PREVIEW_RE.captures(html) {
            return Some(caps[1].to_string());
        }
        if let Some(caps) = PREVIEW_URL_RE.captures(html) {
            return Some(caps[1].to_string());
        }
        if let Some(caps) = NEXT_DATA_RE.captures(html) {
            if let Ok(data) = serde_json::from_str::<Value>(&caps[1]) {
                if let Some(url) = Self::find_preview_in_json(&data) {
                    return Some(url);
                }
            }
        }
        ANY_MP3_RE.find(html).map(|m| m.as_str().to_string())
    }
}

#[async_trait]
impl Strategy for EpisodeStrategy {
    fn name(&self) -> &'static str {
        "episode-preview"
    }

    fn soft_timeout(&self) -> Duration {
        Duration::from_secs(12)
    }

    async fn attempt(&self, url: &str, ctx: &ExtractContext) -> StrategyOutcome {
        let Some((resource_type, resource_id)) = Self::parse_resource(url) else {
            return StrategyOutcome::Permanent(ExtractError::InvalidUrl);
        };
        if resource_type != "episode" {
            tracing::debug!("spotify {} resources carry no fetchable audio", resource_type);
            return StrategyOutcome::Permanent(ExtractError::NotFound);
        }

        let oembed_url = format!(
            "https://open.spotify.com/oembed?url={}",
            urlencoding::encode(url)
        );
        let oembed = match ctx.stealth.get(&oembed_url).await {
            Ok(r) if r.status == 404 => {
                return StrategyOutcome::Permanent(ExtractError::NotFound)
            }
            Ok(r) if r.status == 200 => r.json().ok(),
            Ok(_) | Err(_) => None,
        };

        let embed_url = format!("https://open.spotify.com/embed/episode/{}", resource_id);
        let page = match ctx
            .stealth
            .fetch(
                &embed_url,
                FetchOptions {
                    referer: Some("https://open.spotify.com/".to_string()),
                    ..Default::default()
                },
            )
            .await
        {
            Ok(r) => r,
            Err(e) => return StrategyOutcome::Transient(e),
        };
        if page.status != 200 {
            return StrategyOutcome::Transient(anyhow::anyhow!(
                "embed page returned HTTP {}",
                page.status
            ));
        }

        let Some(preview_url) = Self::find_preview_in_page(&page.body) else {
            return StrategyOutcome::Permanent(ExtractError::NotFound);
        };

        let oembed = oembed.unwrap_or_default();
        let raw = RawMedia {
            title: oembed
                .get("title")
                .and_then(|v| v.as_str())
                .map(|t| t.to_string()),
            thumbnail: oembed
                .get("thumbnail_url")
                .and_then(|v| v.as_str())
                .map(|t| t.to_string()),
            media_type: Some(MediaType::Audio),
            format: Some("mp3".to_string()),
            quality: Some("preview".to_string()),
            download_url: Some(preview_url),
            author: oembed
                .get("provider_name")
                .and_then(|v| v.as_str())
                .map(|a| a.to_string()),
            ..Default::default()
        };

        match normalize::normalize(raw, "spotify") {
            Ok(media) => StrategyOutcome::Success(media),
            Err(err) => StrategyOutcome::from_error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_resource_kinds() {
        assert_eq!(
            EpisodeStrategy::parse_resource("https://open.spotify.com/episode/4rOoJ6Egrf8K2IrywzwOMk"),
            Some(("episode".to_string(), "4rOoJ6Egrf8K2IrywzwOMk".to_string()))
        );
        assert_eq!(
            EpisodeStrategy::parse_resource("https://open.spotify.com/track/abc123DEF")
                .map(|(t, _)| t),
            Some("track".to_string())
        );
        assert!(EpisodeStrategy::parse_resource("https://open.spotify.com/user/foo").is_none());
    }

    #[test]
    fn finds_camel_case_preview_blob() {
        let html = r#"{"episode":{"audioPreview":{"url":"https://p.scdn.co/mp3-preview/abc"}}}"#;
        assert_eq!(
            EpisodeStrategy::find_preview_in_page(html).as_deref(),
            Some("https://p.scdn.co/mp3-preview/abc")
        );
    }

    #[test]
    fn finds_snake_case_preview_field() {
        let html = r#"{"audio_preview_url":"https://p.scdn.co/mp3-preview/def"}"#;
        assert_eq!(
            EpisodeStrategy::find_preview_in_page(html).as_deref(),
            Some("https://p.scdn.co/mp3-preview/def")
        );
    }

    #[test]
    fn walks_next_data_payload() {
        let html = concat!(
            r#"<script id="__NEXT_DATA__" type="application/json">"#,
            r#"{"props":{"pageProps":{"state":{"data":{"entity":{"preview":{"audio_preview_url":"https://p.scdn.co/mp3-preview/ghi"}}}}}}}"#,
            "</script>",
        );
        assert_eq!(
            EpisodeStrategy::find_preview_in_page(html).as_deref(),
            Some("https://p.scdn.co/mp3-preview/ghi")
        );
    }

    #[test]
    fn falls_back_to_any_mp3_url() {
        let html = r#"<audio src="https://cdn.example.com/clip.mp3?sig=x"></audio>"#;
        assert_eq!(
            EpisodeStrategy::find_preview_in_page(html).as_deref(),
            Some("https://cdn.example.com/clip.mp3?sig=x")
        );
    }

    #[test]
    fn pages_without_audio_yield_none() {
        assert!(EpisodeStrategy::find_preview_in_page("<html></html>").is_none());
    }

    #[test]
    fn nested_json_walk_handles_arrays() {
        let data = json!({"items": [{"other": 1}, {"audioPreview": {"url": "https://p/x"}}]});
        assert_eq!(
            EpisodeStrategy::find_preview_in_json(&data).as_deref(),
            Some("https://p/x")
        );
    }
}
