use crate::platforms::generic_ytdlp::YtdlpStrategy;
use crate::platforms::traits::SourceHandler;

pub fn handler() -> SourceHandler {
    SourceHandler::new(
        "tiktok",
        &[
            r"^https?://(www\.)?tiktok\.com/@[\w.-]+/video/\d+",
            r"^https?://(www\.)?tiktok\.com/@[\w.-]+/photo/\d+",
            r"^https?://(vm|vt)\.tiktok\.com/[\w-]+",
            r"^https?://(www\.)?tiktok\.com/t/[\w-]+",
        ],
        r"(?:tiktok\.com/@[\w.-]+/(?:video|photo)/(\d+)|(?:vm|vt)\.tiktok\.com/([\w-]+)|tiktok\.com/t/([\w-]+))",
        vec![Box::new(YtdlpStrategy::with_stealth("tiktok"))],
    )
}
