//! Reddit handler using the public `.json` comment listing.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::normalize::{self, RawMedia};
use crate::core::stealth::FetchOptions;
use crate::error::ExtractError;
use crate::models::media::MediaType;
use crate::platforms::generic_ytdlp::YtdlpStrategy;
use crate::platforms::traits::{ExtractContext, SourceHandler, Strategy, StrategyOutcome};

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

pub fn handler() -> SourceHandler {
    SourceHandler::new(
        "reddit",
        &[
            r"^https?://(www\.|old\.|new\.)?reddit\.com/r/\w+/comments/\w+",
            r"^https?://(www\.)?reddit\.com/r/\w+/s/\w+",
            r"^https?://(v\.)?redd\.it/\w+",
        ],
        r"(?:reddit\.com/r/\w+/comments/(\w+)|reddit\.com/r/\w+/s/(\w+)|redd\.it/(\w+))",
        vec![
            Box::new(JsonApiStrategy),
            Box::new(YtdlpStrategy::new("reddit")),
        ],
    )
}

pub struct JsonApiStrategy;

struct PostMedia {
    url: String,
    media_type: MediaType,
    format: &'static str,
}

impl JsonApiStrategy {
    /// Shortened share links need a redirect hop the JSON endpoint does not
    /// perform for us; yt-dlp resolves them instead.
    fn is_short_link(url: &str) -> bool {
        url.contains("redd.it/") || url.contains("/s/")
    }

    fn listing_url(url: &str) -> String {
        let clean = url.split(['?', '#']).next().unwrap_or(url);
        format!("{}.json", clean.trim_end_matches('/'))
    }

    /// Walk one post record (or its crosspost source) for playable media.
    fn post_media(post: &Value) -> Option<PostMedia> {
        if post.get("is_video").and_then(|v| v.as_bool()).unwrap_or(false) {
            if let Some(fallback) = post
                .pointer("/media/reddit_video/fallback_url")
                .and_then(|v| v.as_str())
            {
                let url = fallback.split('?').next().unwrap_or(fallback).to_string();
                return Some(PostMedia {
                    url,
                    media_type: MediaType::Video,
                    format: "mp4",
                });
            }
        }

        if let Some(url) = post.get("url").and_then(|v| v.as_str()) {
            let lower = url.to_lowercase();
            if IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
                || url.contains("i.redd.it/")
            {
                let format = if lower.ends_with(".gif") { "gif" } else { "jpg" };
                return Some(PostMedia {
                    url: url.to_string(),
                    media_type: MediaType::Image,
                    format,
                });
            }
        }

        // Galleries: serve the first item at source resolution.
        if let Some(first_id) = post
            .pointer("/gallery_data/items/0/media_id")
            .and_then(|v| v.as_str())
        {
            if let Some(source) = post
                .pointer(&format!("/media_metadata/{}/s/u", first_id))
                .and_then(|v| v.as_str())
            {
                return Some(PostMedia {
                    url: source.replace("&amp;", "&"),
                    media_type: MediaType::Image,
                    format: "jpg",
                });
            }
        }

        if let Some(parents) = post
            .get("crosspost_parent_list")
            .and_then(|v| v.as_array())
        {
            if let Some(parent) = parents.first() {
                return Self::post_media(parent);
            }
        }

        None
    }

    fn post_thumbnail(post: &Value) -> Option<String> {
        post.get("thumbnail")
            .and_then(|v| v.as_str())
            .filter(|t| {
                t.starts_with("http")
                    && !matches!(*t, "self" | "default" | "nsfw" | "spoiler")
            })
            .map(|t| t.replace("&amp;", "&"))
    }

    fn listing_to_raw(listing: &Value) -> Option<RawMedia> {
        let post = listing.pointer("/0/data/children/0/data")?;
        let media = Self::post_media(post)?;

        Some(RawMedia {
            title: post
                .get("title")
                .and_then(|v| v.as_str())
                .map(|t| t.to_string()),
            thumbnail: Self::post_thumbnail(post),
            media_type: Some(media.media_type),
            format: Some(media.format.to_string()),
            download_url: Some(media.url),
            author: post
                .get("author")
                .and_then(|v| v.as_str())
                .map(|a| format!("u/{}", a)),
            ..Default::default()
        })
    }
}

#[async_trait]
impl Strategy for JsonApiStrategy {
    fn name(&self) -> &'static str {
        "json-listing"
    }

    fn soft_timeout(&self) -> Duration {
        Duration::from_secs(10)
    }

    async fn attempt(&self, url: &str, ctx: &ExtractContext) -> StrategyOutcome {
        if Self::is_short_link(url) {
            return StrategyOutcome::NoResult;
        }

        let response = match ctx
            .stealth
            .fetch(&Self::listing_url(url), FetchOptions::default())
            .await
        {
            Ok(r) => r,
            Err(e) => return StrategyOutcome::Transient(e),
        };

        match response.status {
            200 => {}
            404 => return StrategyOutcome::Permanent(ExtractError::NotFound),
            403 => return StrategyOutcome::Permanent(ExtractError::LoginRequired),
            status => {
                return StrategyOutcome::Transient(anyhow::anyhow!(
                    "listing returned HTTP {}",
                    status
                ))
            }
        }

        let Ok(listing) = response.json() else {
            return StrategyOutcome::NoResult;
        };

        match Self::listing_to_raw(&listing) {
            Some(raw) => match normalize::normalize(raw, "reddit") {
                Ok(media) => StrategyOutcome::Success(media),
                Err(_) => StrategyOutcome::NoResult,
            },
            // Post loaded fine but holds no media worth serving.
            None => StrategyOutcome::Permanent(ExtractError::NotFound),
        }
    }
}
