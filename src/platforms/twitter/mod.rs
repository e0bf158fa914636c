use crate::platforms::generic_ytdlp::YtdlpStrategy;
use crate::platforms::traits::SourceHandler;

pub fn handler() -> SourceHandler {
    SourceHandler::new(
        "twitter",
        &[
            r"^https?://(www\.|mobile\.)?(twitter|x)\.com/\w+/status/\d+",
            r"^https?://t\.co/\w+",
        ],
        r"(?:(?:twitter|x)\.com/\w+/status/(\d+)|t\.co/(\w+))",
        vec![Box::new(YtdlpStrategy::with_stealth("twitter"))],
    )
}
