use crate::platforms::generic_ytdlp::YtdlpStrategy;
use crate::platforms::link_preview::LinkPreviewStrategy;
use crate::platforms::traits::SourceHandler;

pub fn handler() -> SourceHandler {
    SourceHandler::new(
        "instagram",
        &[
            r"^https?://(www\.)?instagram\.com/(p|reel|reels|tv)/[\w-]+",
            r"^https?://(www\.)?instagram\.com/stories/[\w.]+/\d+",
        ],
        r"instagram\.com/(?:p|reel|reels|tv)/([\w-]+)|instagram\.com/stories/[\w.]+/(\d+)",
        vec![
            Box::new(YtdlpStrategy::with_stealth("instagram").soft_timeout_secs(15)),
            Box::new(LinkPreviewStrategy::new("instagram")),
        ],
    )
}
