//! Per-domain request pacing.
//!
//! Tracks the last dispatch time per destination host and sleeps out the
//! remainder of the minimum interval, plus a small random jitter, before
//! letting the next request through. The check-then-update is atomic per host
//! key: concurrent callers to the same host serialize on that host's slot,
//! while different hosts proceed independently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rand::Rng;

const JITTER_MIN_MS: u64 = 100;
const JITTER_MAX_MS: u64 = 500;

pub struct DomainPacer {
    min_interval: Duration,
    slots: Mutex<HashMap<String, Arc<tokio::sync::Mutex<Option<Instant>>>>>,
}

impl DomainPacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Wait until the destination host of `url` is clear to receive another
    /// request, then stamp the new dispatch time.
    pub async fn acquire(&self, url: &str) {
        let Some(host) = host_of(url) else {
            return;
        };

        // The outer map lock is never held across an await.
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            slots.entry(host.clone()).or_default().clone()
        };

        let mut last = slot.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                let jitter =
                    Duration::from_millis(rand::rng().random_range(JITTER_MIN_MS..=JITTER_MAX_MS));
                let wait = self.min_interval - elapsed + jitter;
                tracing::debug!("pacing {}: waiting {:?}", host, wait);
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }
}

fn host_of(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_extraction() {
        assert_eq!(
            host_of("https://www.YouTube.com/watch?v=abc"),
            Some("www.youtube.com".to_string())
        );
        assert_eq!(host_of("not a url"), None);
    }

    #[tokio::test]
    async fn consecutive_dispatches_are_spaced() {
        let pacer = DomainPacer::new(Duration::from_millis(80));
        pacer.acquire("https://example.com/a").await;
        let start = Instant::now();
        pacer.acquire("https://example.com/b").await;
        // Second dispatch must wait out the interval (jitter only adds).
        assert!(start.elapsed() >= Duration::from_millis(80));
    }

    #[tokio::test]
    async fn different_hosts_do_not_block_each_other() {
        let pacer = DomainPacer::new(Duration::from_secs(5));
        pacer.acquire("https://one.example.com/").await;
        let start = Instant::now();
        pacer.acquire("https://two.example.com/").await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn first_dispatch_is_immediate() {
        let pacer = DomainPacer::new(Duration::from_secs(5));
        let start = Instant::now();
        pacer.acquire("https://example.com/").await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
