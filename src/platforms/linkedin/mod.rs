use crate::platforms::generic_ytdlp::YtdlpStrategy;
use crate::platforms::traits::SourceHandler;

pub fn handler() -> SourceHandler {
    SourceHandler::new(
        "linkedin",
        &[
            r"^https?://(www\.)?linkedin\.com/posts/[\w%-]+",
            r"^https?://(www\.)?linkedin\.com/feed/update/urn:li:activity:\d+",
        ],
        r"(?:linkedin\.com/posts/([\w%-]+)|linkedin\.com/feed/update/urn:li:activity:(\d+))",
        vec![Box::new(YtdlpStrategy::with_stealth("linkedin"))],
    )
}
