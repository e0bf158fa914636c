//! Runs one handler's strategy chain under nested deadlines.

use std::time::Instant;

use crate::error::ExtractError;
use crate::models::media::MediaInfo;
use crate::platforms::traits::{ExtractContext, SourceHandler, StrategyOutcome};

/// Execute the handler's strategies strictly in order.
///
/// Each attempt gets min(its soft timeout, what remains of the hard budget).
/// A success short-circuits; a permanent failure halts the chain; no-result
/// and transient failures advance it. Exhaustion yields extraction-failed,
/// unless every attempted strategy ran out its clock — then the truthful
/// answer is a timeout.
///
/// The caller additionally supervises the whole chain with an independent
/// hard-deadline timer, so a strategy whose transport ignores cancellation
/// cannot hold the call past its budget.
pub async fn run_chain(
    handler: &SourceHandler,
    url: &str,
    ctx: &ExtractContext,
) -> Result<MediaInfo, ExtractError> {
    let deadline = Instant::now() + ctx.config.hard_timeout;
    let mut attempts = 0usize;
    let mut timeouts = 0usize;

    for strategy in handler.strategies() {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            tracing::warn!("{}: hard budget exhausted mid-chain", handler.name());
            return Err(ExtractError::Timeout);
        }

        let budget = strategy.soft_timeout().min(remaining);
        attempts += 1;

        match tokio::time::timeout(budget, strategy.attempt(url, ctx)).await {
            Err(_) => {
                timeouts += 1;
                tracing::debug!(
                    "{}/{}: no answer within {:?}, advancing",
                    handler.name(),
                    strategy.name(),
                    budget
                );
            }
            Ok(StrategyOutcome::Success(info)) => {
                tracing::debug!("{}/{}: success", handler.name(), strategy.name());
                return Ok(info);
            }
            Ok(StrategyOutcome::NoResult) => {
                tracing::debug!("{}/{}: no result, advancing", handler.name(), strategy.name());
            }
            Ok(StrategyOutcome::Permanent(err)) => {
                tracing::debug!(
                    "{}/{}: definitive {}, halting chain",
                    handler.name(),
                    strategy.name(),
                    err.code()
                );
                return Err(err);
            }
            Ok(StrategyOutcome::Transient(cause)) => {
                tracing::debug!(
                    "{}/{}: transient failure: {:#}, advancing",
                    handler.name(),
                    strategy.name(),
                    cause
                );
            }
        }
    }

    if attempts > 0 && timeouts == attempts {
        Err(ExtractError::Timeout)
    } else {
        Err(ExtractError::ExtractionFailed)
    }
}
