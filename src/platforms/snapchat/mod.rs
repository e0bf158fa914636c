use crate::platforms::generic_ytdlp::YtdlpStrategy;
use crate::platforms::traits::SourceHandler;

pub fn handler() -> SourceHandler {
    SourceHandler::new(
        "snapchat",
        &[
            r"^https?://(www\.)?snapchat\.com/spotlight/[\w-]+",
            r"^https?://(www\.)?snapchat\.com/@[\w.-]+",
            r"^https?://(www\.)?snapchat\.com/add/[\w.-]+",
        ],
        r"(?:snapchat\.com/spotlight/([\w-]+)|snapchat\.com/@([\w.-]+)|snapchat\.com/add/([\w.-]+))",
        vec![Box::new(YtdlpStrategy::with_stealth("snapchat"))],
    )
}
