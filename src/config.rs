use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration. Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Config {
    /// Call-level hard deadline for one extraction. Must stay below the
    /// upstream request timeout of whatever is hosting the HTTP layer.
    pub hard_timeout: Duration,
    /// Minimum spacing between outbound requests to the same host.
    pub min_request_interval: Duration,
    /// Optional trusted forwarding endpoint; when set, all stealth requests
    /// are tunneled through it instead of dispatched directly.
    pub relay: Option<RelayConfig>,
    /// Path to the yt-dlp binary used by the generic extraction strategy.
    pub ytdlp_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub endpoint: String,
    pub secret: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hard_timeout: Duration::from_secs(25),
            min_request_interval: Duration::from_millis(300),
            relay: None,
            ytdlp_path: PathBuf::from("yt-dlp"),
        }
    }
}

impl Config {
    /// Build a config from the environment, falling back to defaults for
    /// anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Some(secs) = read_u64("LINKGRAB_HARD_TIMEOUT_SECS") {
            cfg.hard_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = read_u64("LINKGRAB_MIN_REQUEST_INTERVAL_MS") {
            cfg.min_request_interval = Duration::from_millis(ms);
        }
        if let Ok(path) = std::env::var("LINKGRAB_YTDLP_PATH") {
            if !path.is_empty() {
                cfg.ytdlp_path = PathBuf::from(path);
            }
        }

        let relay_url = std::env::var("LINKGRAB_RELAY_URL").unwrap_or_default();
        let relay_secret = std::env::var("LINKGRAB_RELAY_SECRET").unwrap_or_default();
        if !relay_url.is_empty() && !relay_secret.is_empty() {
            cfg.relay = Some(RelayConfig {
                endpoint: relay_url,
                secret: relay_secret,
            });
        } else if !relay_url.is_empty() {
            tracing::warn!("LINKGRAB_RELAY_URL set without LINKGRAB_RELAY_SECRET, relay disabled");
        }

        cfg
    }
}

fn read_u64(var: &str) -> Option<u64> {
    let raw = std::env::var(var).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("{} has non-numeric value {:?}, using default", var, raw);
            None
        }
    }
}
