//! Public entry point tying routing, execution, and the outbound layer together.

use std::sync::Arc;

use crate::config::Config;
use crate::core::executor;
use crate::core::registry::SourceRegistry;
use crate::core::stealth::StealthClient;
use crate::error::ExtractError;
use crate::models::media::MediaInfo;
use crate::platforms::traits::ExtractContext;

/// Resolves a share URL to a canonical media record.
///
/// Construction is cheap enough for startup and the value is `Send + Sync`,
/// so one instance is shared across all concurrent calls.
pub struct Extractor {
    registry: SourceRegistry,
    ctx: ExtractContext,
}

impl Extractor {
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        Self {
            registry: SourceRegistry::builtin(),
            ctx: ExtractContext {
                stealth: Arc::new(StealthClient::new(&config)),
                config,
            },
        }
    }

    /// Platform names accepted by [`extract`](Self::extract), in registration
    /// order.
    pub fn supported_platforms(&self) -> Vec<String> {
        self.registry.supported()
    }

    /// Run the full pipeline for one URL: validate, route, then execute the
    /// platform's strategy chain under the call-level hard deadline.
    pub async fn extract(&self, url: &str) -> Result<MediaInfo, ExtractError> {
        let parsed = url::Url::parse(url).map_err(|_| ExtractError::InvalidUrl)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ExtractError::InvalidUrl);
        }

        let Some(handler) = self.registry.resolve(url) else {
            return Err(ExtractError::UnsupportedPlatform {
                supported: self.registry.supported(),
            });
        };

        if handler.content_id(url).is_none() {
            return Err(ExtractError::InvalidUrl);
        }

        tracing::info!("extracting {} via {}", url, handler.name());

        // The chain enforces its own per-strategy budgets; this outer timer is
        // the backstop for transports that ignore cancellation.
        match tokio::time::timeout(
            self.ctx.config.hard_timeout,
            executor::run_chain(handler, url, &self.ctx),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("{}: hard deadline elapsed for {}", handler.name(), url);
                Err(ExtractError::Timeout)
            }
        }
    }
}
