//! Pinterest handler: pin pages expose their media through preview tags.

use std::sync::LazyLock;

use regex::Regex;

use crate::platforms::link_preview::LinkPreviewStrategy;
use crate::platforms::traits::SourceHandler;

static SIZED_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+x/").expect("sized path pattern must compile"));

/// Pin images are served from sized variants like `/236x/`; the same path
/// under `/originals/` holds the full-resolution upload.
fn original_resolution(image_url: &str) -> String {
    SIZED_PATH_RE
        .replace(image_url, "/originals/")
        .into_owned()
}

pub fn handler() -> SourceHandler {
    SourceHandler::new(
        "pinterest",
        &[
            r"^https?://([a-z]+\.)?pinterest\.(com|ca|co\.uk|fr|de|es|it)/pin/\d+",
            r"^https?://pin\.it/\w+",
        ],
        r"(?:pinterest\.[a-z.]+/pin/(\d+)|pin\.it/(\w+))",
        vec![Box::new(LinkPreviewStrategy::with_image_rewrite(
            "pinterest",
            original_resolution,
        ))],
    )
}
