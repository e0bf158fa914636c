use crate::platforms::generic_ytdlp::YtdlpStrategy;
use crate::platforms::traits::SourceHandler;

pub fn handler() -> SourceHandler {
    SourceHandler::new(
        "facebook",
        &[
            r"^https?://(www\.|m\.|web\.)?facebook\.com/.+/videos/\d+",
            r"^https?://(www\.|m\.)?facebook\.com/watch/?\?v=\d+",
            r"^https?://(www\.|m\.)?facebook\.com/reel/\d+",
            r"^https?://(www\.|m\.)?facebook\.com/share/(v|r)/[\w-]+",
            r"^https?://fb\.watch/[\w-]+",
        ],
        r"(?:facebook\.com/.+/videos/(\d+)|facebook\.com/watch/?\?v=(\d+)|facebook\.com/reel/(\d+)|facebook\.com/share/(?:v|r)/([\w-]+)|fb\.watch/([\w-]+))",
        vec![Box::new(YtdlpStrategy::new("facebook"))],
    )
}
