//! Static, ordered registry of source handlers.
//!
//! Handlers are assembled explicitly here, in registration order, so the
//! supported set is visible at a glance and checked at compile time.

use crate::platforms;
use crate::platforms::traits::SourceHandler;

pub struct SourceRegistry {
    handlers: Vec<SourceHandler>,
}

impl SourceRegistry {
    /// Build the full built-in handler set.
    pub fn builtin() -> Self {
        Self {
            handlers: vec![
                platforms::youtube::handler(),
                platforms::tiktok::handler(),
                platforms::instagram::handler(),
                platforms::twitter::handler(),
                platforms::facebook::handler(),
                platforms::reddit::handler(),
                platforms::pinterest::handler(),
                platforms::snapchat::handler(),
                platforms::linkedin::handler(),
                platforms::threads::handler(),
                platforms::twitch::handler(),
                platforms::dailymotion::handler(),
                platforms::spotify::handler(),
            ],
        }
    }

    #[cfg(test)]
    pub fn with_handlers(handlers: Vec<SourceHandler>) -> Self {
        Self { handlers }
    }

    /// First registered handler whose pattern set matches the URL, or `None`.
    pub fn resolve(&self, url: &str) -> Option<&SourceHandler> {
        self.handlers.iter().find(|h| h.matches(url))
    }

    /// Display names of every registered handler, in registration order.
    pub fn supported(&self) -> Vec<String> {
        self.handlers.iter().map(|h| h.name().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_each_platform() {
        let registry = SourceRegistry::builtin();
        let cases = [
            ("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "youtube"),
            ("https://youtu.be/dQw4w9WgXcQ", "youtube"),
            ("https://www.youtube.com/shorts/dQw4w9WgXcQ", "youtube"),
            ("https://www.tiktok.com/@user.name/video/7294857392847293847", "tiktok"),
            ("https://vm.tiktok.com/ZMabcdef/", "tiktok"),
            ("https://www.instagram.com/reel/Cx1yz_ab2cd/", "instagram"),
            ("https://www.instagram.com/p/Cx1yz_ab2cd/", "instagram"),
            ("https://x.com/someone/status/1755555555555555555", "twitter"),
            ("https://twitter.com/someone/status/1755555555555555555", "twitter"),
            ("https://www.facebook.com/watch?v=123456789", "facebook"),
            ("https://fb.watch/abc123/", "facebook"),
            ("https://www.reddit.com/r/videos/comments/1abcde/some_title/", "reddit"),
            ("https://v.redd.it/abc123", "reddit"),
            ("https://www.pinterest.com/pin/123456789/", "pinterest"),
            ("https://pin.it/abc123", "pinterest"),
            ("https://www.snapchat.com/spotlight/W7abcDEF", "snapchat"),
            ("https://www.linkedin.com/posts/someone_activity-abc", "linkedin"),
            ("https://www.threads.net/@someone/post/Cx1yz", "threads"),
            ("https://www.twitch.tv/streamer/clip/FunnyClip-abc123", "twitch"),
            ("https://clips.twitch.tv/FunnyClip-abc123", "twitch"),
            ("https://www.twitch.tv/videos/1234567890", "twitch"),
            ("https://www.dailymotion.com/video/x8abcde", "dailymotion"),
            ("https://dai.ly/x8abcde", "dailymotion"),
            ("https://open.spotify.com/episode/4rOoJ6Egrf8K2IrywzwOMk", "spotify"),
        ];
        for (url, expected) in cases {
            let handler = registry.resolve(url);
            assert_eq!(
                handler.map(|h| h.name()),
                Some(expected),
                "url: {}",
                url
            );
        }
    }

    #[test]
    fn unmatched_url_resolves_to_none() {
        let registry = SourceRegistry::builtin();
        assert!(registry.resolve("https://example.com/video/123").is_none());
        assert!(registry.resolve("not a url at all").is_none());
        // Matching is anchored: a supported URL embedded mid-string is no match.
        assert!(registry
            .resolve("https://evil.example/?u=https://youtu.be/dQw4w9WgXcQ")
            .is_none());
    }

    #[test]
    fn supported_lists_all_handlers_in_order() {
        let registry = SourceRegistry::builtin();
        let supported = registry.supported();
        assert_eq!(supported.len(), 13);
        assert_eq!(supported[0], "youtube");
        assert!(supported.contains(&"spotify".to_string()));
        assert!(supported.contains(&"dailymotion".to_string()));
    }

    #[test]
    fn resolution_is_deterministic() {
        let registry = SourceRegistry::builtin();
        let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
        let first = registry.resolve(url).map(|h| h.name());
        for _ in 0..5 {
            assert_eq!(registry.resolve(url).map(|h| h.name()), first);
        }
    }
}
