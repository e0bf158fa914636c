//! Outbound request layer with a browser-shaped network fingerprint.
//!
//! Every upstream call goes through [`StealthClient::fetch`]: it picks one
//! browser profile for the whole request, paces per-destination-host, and
//! walks a transport chain — the profile's own fingerprint first, then a
//! known-safe fallback, then a plain client that at least still carries the
//! header bundle. When a relay endpoint is configured the request is instead
//! tunneled through it as a secret-authenticated POST.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{anyhow, Context};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::Value;

use crate::config::Config;
use crate::core::pacing::DomainPacer;
use crate::core::profiles::{self, BrowserProfile, Fingerprint};

/// Unified response shape, regardless of which transport path served it.
#[derive(Debug)]
pub struct StealthResponse {
    pub status: u16,
    pub body: String,
    pub headers: HashMap<String, String>,
}

impl StealthResponse {
    pub fn json(&self) -> anyhow::Result<Value> {
        serde_json::from_str(&self.body).context("response body is not valid JSON")
    }
}

pub struct FetchOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub json_body: Option<Value>,
    pub timeout: Duration,
    pub referer: Option<String>,
    pub rate_limit: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            json_body: None,
            timeout: Duration::from_secs(15),
            referer: None,
            rate_limit: true,
        }
    }
}

pub struct StealthClient {
    chromium: reqwest::Client,
    gecko: reqwest::Client,
    webkit: reqwest::Client,
    plain: reqwest::Client,
    pacer: DomainPacer,
    relay: Option<crate::config::RelayConfig>,
}

impl StealthClient {
    pub fn new(config: &Config) -> Self {
        let chromium = reqwest::Client::builder()
            .use_rustls_tls()
            .http2_adaptive_window(true)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .unwrap_or_default();

        let gecko = reqwest::Client::builder()
            .use_rustls_tls()
            .http1_title_case_headers()
            .gzip(true)
            .deflate(true)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .unwrap_or_default();

        let webkit = reqwest::Client::builder()
            .use_rustls_tls()
            .http1_only()
            .gzip(true)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .unwrap_or_default();

        Self {
            chromium,
            gecko,
            webkit,
            plain: reqwest::Client::new(),
            pacer: DomainPacer::new(config.min_request_interval),
            relay: config.relay.clone(),
        }
    }

    /// Convenience GET with default options.
    pub async fn get(&self, url: &str) -> anyhow::Result<StealthResponse> {
        self.fetch(url, FetchOptions::default()).await
    }

    pub async fn fetch(&self, url: &str, opts: FetchOptions) -> anyhow::Result<StealthResponse> {
        if opts.rate_limit {
            self.pacer.acquire(url).await;
        }

        let profile = profiles::random_profile();
        let headers = merged_headers(profile, &opts);

        if self.relay.is_some() {
            return self.dispatch_via_relay(url, &opts, &headers).await;
        }

        // Transport chain: profile fingerprint, safe fallback, plain client.
        let primary = self.transport_for(profile.fingerprint);
        match self.dispatch(primary, url, &opts, &headers).await {
            Ok(resp) => Ok(resp),
            Err(first_err) => {
                tracing::debug!(
                    "transport {:?} rejected for {}: {}; retrying on fallback",
                    profile.fingerprint,
                    url,
                    first_err
                );
                match self.dispatch(&self.chromium, url, &opts, &headers).await {
                    Ok(resp) => Ok(resp),
                    Err(_) => self.dispatch(&self.plain, url, &opts, &headers).await,
                }
            }
        }
    }

    fn transport_for(&self, fingerprint: Fingerprint) -> &reqwest::Client {
        match fingerprint {
            Fingerprint::Chromium => &self.chromium,
            Fingerprint::Gecko => &self.gecko,
            Fingerprint::Webkit => &self.webkit,
        }
    }

    async fn dispatch(
        &self,
        client: &reqwest::Client,
        url: &str,
        opts: &FetchOptions,
        headers: &HeaderMap,
    ) -> anyhow::Result<StealthResponse> {
        let mut request = client
            .request(opts.method.clone(), url)
            .headers(headers.clone())
            .timeout(opts.timeout);

        if let Some(body) = &opts.json_body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let resp_headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();
        let body = response.text().await?;

        Ok(StealthResponse {
            status,
            body,
            headers: resp_headers,
        })
    }

    /// Tunnel the request through the trusted forwarding endpoint instead of
    /// dispatching it directly. Selected per deployment, not per call.
    async fn dispatch_via_relay(
        &self,
        url: &str,
        opts: &FetchOptions,
        headers: &HeaderMap,
    ) -> anyhow::Result<StealthResponse> {
        let relay = self
            .relay
            .as_ref()
            .ok_or_else(|| anyhow!("relay not configured"))?;

        let header_map: HashMap<String, String> = headers
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();

        let envelope = serde_json::json!({
            "url": url,
            "method": opts.method.as_str(),
            "headers": header_map,
            "payload": opts.json_body,
        });

        let response = self
            .plain
            .post(&relay.endpoint)
            .header("Content-Type", "application/json")
            .header("X-Relay-Secret", &relay.secret)
            .json(&envelope)
            .timeout(opts.timeout)
            .send()
            .await?;

        let status = response.status().as_u16();
        let resp_headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();
        let body = response.text().await?;

        Ok(StealthResponse {
            status,
            body,
            headers: resp_headers,
        })
    }
}

/// Profile bundle first, then referer adjustments, then caller headers on top.
/// The profile's internal consistency is preserved: callers add or override
/// individual entries but never interleave a second profile.
fn merged_headers(profile: &BrowserProfile, opts: &FetchOptions) -> HeaderMap {
    let mut map = HeaderMap::new();

    for (name, value) in profile.headers {
        if let (Ok(n), Ok(v)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            map.insert(n, v);
        }
    }

    if let Some(referer) = &opts.referer {
        if let Ok(v) = HeaderValue::from_str(referer) {
            map.insert(reqwest::header::REFERER, v);
        }
        map.insert(
            HeaderName::from_static("sec-fetch-site"),
            HeaderValue::from_static("same-origin"),
        );
    }

    for (name, value) in &opts.headers {
        if let (Ok(n), Ok(v)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            map.insert(n, v);
        }
    }

    map
}
