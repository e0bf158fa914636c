use crate::platforms::generic_ytdlp::YtdlpStrategy;
use crate::platforms::link_preview::LinkPreviewStrategy;
use crate::platforms::traits::SourceHandler;

pub fn handler() -> SourceHandler {
    SourceHandler::new(
        "threads",
        &[r"^https?://(www\.)?threads\.(net|com)/@[\w.]+/post/[\w-]+"],
        r"threads\.(?:net|com)/@[\w.]+/post/([\w-]+)",
        vec![
            Box::new(YtdlpStrategy::with_stealth("threads").soft_timeout_secs(15)),
            Box::new(LinkPreviewStrategy::new("threads")),
        ],
    )
}
