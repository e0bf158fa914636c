//! Black-box delegation to yt-dlp.
//!
//! yt-dlp covers hundreds of platforms and survives their format churn, which
//! makes it the robust fallback behind most handlers. It runs as a child
//! process awaited through tokio, so a slow invocation suspends only its own
//! task. Stderr from a failed run is fed through the error classifier.

use std::path::Path;
use std::process::Stdio;

use serde_json::Value;

use crate::core::classify::classify_upstream;
use crate::core::profiles::BrowserProfile;
use crate::error::ExtractError;

/// Ask yt-dlp for the info document of `url` without downloading anything.
///
/// The browser profile shapes the process's outbound identity the same way
/// the stealth layer shapes direct calls.
pub async fn dump_info(
    bin: &Path,
    url: &str,
    format_spec: &str,
    profile: Option<&BrowserProfile>,
) -> Result<Value, ExtractError> {
    let mut cmd = tokio::process::Command::new(bin);
    cmd.args([
        "--dump-json",
        "--no-warnings",
        "--no-playlist",
        "--socket-timeout",
        "15",
        "-f",
        format_spec,
    ]);

    if let Some(profile) = profile {
        cmd.args(["--user-agent", profile.user_agent()]);
        for (name, value) in profile.headers {
            if name.eq_ignore_ascii_case("User-Agent") {
                continue;
            }
            cmd.args(["--add-headers", &format!("{}:{}", name, value)]);
        }
    }

    cmd.arg(url).stdout(Stdio::piped()).stderr(Stdio::piped());

    let output = match cmd.output().await {
        Ok(out) => out,
        Err(e) => {
            tracing::warn!("failed to run yt-dlp at {:?}: {}", bin, e);
            return Err(ExtractError::ExtractionFailed);
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let err = classify_upstream(None, stderr.trim());
        tracing::debug!("yt-dlp failed ({}): {}", err.code(), stderr.trim());
        return Err(err);
    }

    match serde_json::from_slice(&output.stdout) {
        Ok(json) => Ok(json),
        Err(e) => {
            tracing::warn!("yt-dlp produced invalid JSON: {}", e);
            Err(ExtractError::ExtractionFailed)
        }
    }
}
