use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;

use crate::config::Config;
use crate::core::stealth::StealthClient;
use crate::error::ExtractError;
use crate::models::media::MediaInfo;

pub const DEFAULT_STRATEGY_TIMEOUT: Duration = Duration::from_secs(15);

/// Shared, read-only machinery handed to every strategy attempt.
#[derive(Clone)]
pub struct ExtractContext {
    pub stealth: Arc<StealthClient>,
    pub config: Arc<Config>,
}

/// What one strategy attempt concluded.
///
/// The asymmetry matters: a permanent failure halts the whole chain because no
/// alternate upstream path can change a definitive platform-side rejection,
/// while a transient one just advances to the next strategy.
pub enum StrategyOutcome {
    Success(MediaInfo),
    /// Nothing definitive either way; try the next strategy.
    NoResult,
    Permanent(ExtractError),
    Transient(anyhow::Error),
}

impl StrategyOutcome {
    /// Route a classified error to the arm it belongs in.
    pub fn from_error(err: ExtractError) -> Self {
        if err.is_permanent() {
            StrategyOutcome::Permanent(err)
        } else {
            StrategyOutcome::Transient(anyhow::Error::new(err))
        }
    }
}

/// One ordered attempt at obtaining a canonical result via a specific
/// upstream access path.
#[async_trait]
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Soft budget for this strategy alone; the executor caps it further by
    /// whatever remains of the call-level hard budget.
    fn soft_timeout(&self) -> Duration {
        DEFAULT_STRATEGY_TIMEOUT
    }

    async fn attempt(&self, url: &str, ctx: &ExtractContext) -> StrategyOutcome;
}

/// A registered source platform: URL patterns plus its ordered strategy chain.
/// Built once at startup, read-only afterwards.
pub struct SourceHandler {
    name: &'static str,
    patterns: Vec<Regex>,
    id_pattern: Regex,
    strategies: Vec<Box<dyn Strategy>>,
}

impl SourceHandler {
    pub fn new(
        name: &'static str,
        patterns: &[&str],
        id_pattern: &str,
        strategies: Vec<Box<dyn Strategy>>,
    ) -> Self {
        Self {
            name,
            patterns: patterns
                .iter()
                .map(|p| Regex::new(p).expect("handler pattern must compile"))
                .collect(),
            id_pattern: Regex::new(id_pattern).expect("handler id pattern must compile"),
            strategies,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether any of this handler's patterns matches the URL from its start.
    pub fn matches(&self, url: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(url))
    }

    /// Extract the source-specific content identifier. `None` means the URL
    /// is malformed for this platform, reported before any network call.
    pub fn content_id(&self, url: &str) -> Option<String> {
        let caps = self.id_pattern.captures(url)?;
        (1..caps.len())
            .find_map(|i| caps.get(i))
            .map(|m| m.as_str().to_string())
    }

    pub fn strategies(&self) -> &[Box<dyn Strategy>] {
        &self.strategies
    }
}
