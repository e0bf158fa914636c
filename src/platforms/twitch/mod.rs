use crate::platforms::generic_ytdlp::YtdlpStrategy;
use crate::platforms::traits::SourceHandler;

pub fn handler() -> SourceHandler {
    SourceHandler::new(
        "twitch",
        &[
            r"^https?://(www\.)?twitch\.tv/videos/\d+",
            r"^https?://(www\.)?twitch\.tv/\w+/clip/[\w-]+",
            r"^https?://clips\.twitch\.tv/[\w-]+",
        ],
        r"(?:twitch\.tv/videos/(\d+)|twitch\.tv/\w+/clip/([\w-]+)|clips\.twitch\.tv/([\w-]+))",
        vec![Box::new(YtdlpStrategy::with_stealth("twitch"))],
    )
}
