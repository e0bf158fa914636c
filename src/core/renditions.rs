//! Shared rendition-selection policy.
//!
//! Platforms offer the same clip in many shapes: muxed progressive files,
//! video-only adaptive streams, audio-only tracks. Every handler that has to
//! choose picks the same way: a muxed rendition beats anything that would need
//! stream merging, and height breaks ties within a class.

/// One offered rendition of a piece of media.
#[derive(Debug, Clone, Default)]
pub struct Rendition {
    pub url: Option<String>,
    pub height: u32,
    pub has_video: bool,
    pub has_audio: bool,
    pub format: Option<String>,
    pub file_size: u64,
}

impl Rendition {
    fn is_muxed(&self) -> bool {
        self.has_video && self.has_audio
    }

    fn has_usable_url(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

/// Pick the rendition to serve, or `None` when nothing exposes a fetchable
/// URL — in which case the calling strategy produces no result.
pub fn select(renditions: &[Rendition]) -> Option<&Rendition> {
    let best_muxed = renditions
        .iter()
        .filter(|r| r.is_muxed() && r.has_usable_url())
        .max_by_key(|r| r.height);
    if best_muxed.is_some() {
        return best_muxed;
    }

    renditions
        .iter()
        .filter(|r| r.has_video && r.has_usable_url())
        .max_by_key(|r| r.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendition(height: u32, muxed: bool, url: Option<&str>) -> Rendition {
        Rendition {
            url: url.map(|u| u.to_string()),
            height,
            has_video: true,
            has_audio: muxed,
            ..Default::default()
        }
    }

    #[test]
    fn muxed_beats_adaptive_at_same_height() {
        let candidates = vec![
            rendition(480, true, Some("https://cdn/480-muxed")),
            rendition(720, false, Some("https://cdn/720-adaptive")),
            rendition(1080, true, Some("https://cdn/1080-muxed")),
            rendition(1080, false, Some("https://cdn/1080-adaptive")),
        ];
        let picked = select(&candidates).unwrap();
        assert_eq!(picked.url.as_deref(), Some("https://cdn/1080-muxed"));
        assert!(picked.is_muxed());
    }

    #[test]
    fn falls_back_to_best_stream_only() {
        let candidates = vec![
            rendition(720, false, Some("https://cdn/720")),
            rendition(1080, false, Some("https://cdn/1080")),
        ];
        let picked = select(&candidates).unwrap();
        assert_eq!(picked.height, 1080);
    }

    #[test]
    fn muxed_without_url_is_skipped() {
        let candidates = vec![
            rendition(1080, true, None),
            rendition(720, false, Some("https://cdn/720")),
        ];
        let picked = select(&candidates).unwrap();
        assert_eq!(picked.height, 720);
    }

    #[test]
    fn nothing_usable_yields_none() {
        let candidates = vec![rendition(1080, true, None), rendition(720, false, None)];
        assert!(select(&candidates).is_none());
        assert!(select(&[]).is_none());
    }
}
