//! Last-resort strategy: scrape the page's link-preview metadata.
//!
//! When no stream manifest is reachable, the `og:` tags most platforms emit
//! for link unfurling still point at a poster image or a progressive video.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::core::normalize::{self, RawMedia};
use crate::core::stealth::FetchOptions;
use crate::error::ExtractError;
use crate::models::media::MediaType;
use crate::platforms::traits::{ExtractContext, Strategy, StrategyOutcome};

pub struct LinkPreviewStrategy {
    platform: &'static str,
    /// Optional rewrite applied to a scraped image URL, e.g. swapping a
    /// thumbnail path segment for the full-resolution one.
    image_rewrite: Option<fn(&str) -> String>,
}

/// The interesting subset of a page's link-preview tags.
#[derive(Debug, Default, PartialEq)]
pub struct PreviewTags {
    pub video: Option<String>,
    pub image: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl LinkPreviewStrategy {
    pub fn new(platform: &'static str) -> Self {
        Self {
            platform,
            image_rewrite: None,
        }
    }

    pub fn with_image_rewrite(platform: &'static str, rewrite: fn(&str) -> String) -> Self {
        Self {
            platform,
            image_rewrite: Some(rewrite),
        }
    }

    pub fn parse_preview_tags(html: &str) -> PreviewTags {
        let doc = Html::parse_document(html);
        let content_of = |property: &str| -> Option<String> {
            let selector =
                Selector::parse(&format!("meta[property=\"{}\"]", property)).ok()?;
            doc.select(&selector)
                .next()
                .and_then(|el| el.value().attr("content"))
                .filter(|c| !c.is_empty())
                .map(|c| c.to_string())
        };

        PreviewTags {
            video: content_of("og:video").or_else(|| content_of("og:video:url")),
            image: content_of("og:image"),
            title: content_of("og:title"),
            description: content_of("og:description"),
        }
    }
}

#[async_trait]
impl Strategy for LinkPreviewStrategy {
    fn name(&self) -> &'static str {
        "link-preview"
    }

    fn soft_timeout(&self) -> Duration {
        Duration::from_secs(10)
    }

    async fn attempt(&self, url: &str, ctx: &ExtractContext) -> StrategyOutcome {
        let response = match ctx.stealth.fetch(url, FetchOptions::default()).await {
            Ok(r) => r,
            Err(e) => return StrategyOutcome::Transient(e),
        };

        if response.status == 404 {
            return StrategyOutcome::Permanent(ExtractError::NotFound);
        }
        if response.status != 200 {
            return StrategyOutcome::Transient(anyhow::anyhow!(
                "page fetch returned HTTP {}",
                response.status
            ));
        }

        let tags = Self::parse_preview_tags(&response.body);

        let (download_url, media_type, format) = if let Some(video) = tags.video {
            (video, MediaType::Video, "mp4")
        } else if let Some(image) = &tags.image {
            let rewritten = match self.image_rewrite {
                Some(rewrite) => rewrite(image),
                None => image.clone(),
            };
            (rewritten, MediaType::Image, "jpg")
        } else {
            // Page rendered but exposes no media: treat as gone/private.
            return StrategyOutcome::Permanent(ExtractError::NotFound);
        };

        let raw = RawMedia {
            title: tags.title.or(tags.description),
            thumbnail: tags.image,
            media_type: Some(media_type),
            format: Some(format.to_string()),
            download_url: Some(download_url),
            ..Default::default()
        };

        match normalize::normalize(raw, self.platform) {
            Ok(media) => StrategyOutcome::Success(media),
            Err(err) => StrategyOutcome::from_error(err),
        }
    }
}
