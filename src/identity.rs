//! Anti-detection identity management.
//!
//! An [`IdentityPool`] holds the user agents, referrers and proxies a session
//! may present. Every session draws one [`Fingerprint`] from the pool with a
//! caller-supplied random source, so retries re-randomize the identity and
//! tests can pin it with a seeded RNG.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::config::pools::{DEFAULT_REFERRER, PROXIES, REFERRERS, USER_AGENTS};

/// User-Agent presented when the pool has been emptied
const FALLBACK_USER_AGENT: &str = concat!("site-harvest/", env!("CARGO_PKG_VERSION"));

/// The identity one session presents: user agent, referrer and optional proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    pub user_agent: String,
    pub referer: String,
    pub proxy: Option<String>,
}

/// Pools the session fingerprint is drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityPool {
    user_agents: Vec<String>,
    referrers: Vec<String>,
    proxies: Vec<String>,
}

impl Default for IdentityPool {
    fn default() -> Self {
        Self {
            user_agents: USER_AGENTS.iter().map(|s| s.to_string()).collect(),
            referrers: REFERRERS.iter().map(|s| s.to_string()).collect(),
            proxies: PROXIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl IdentityPool {
    /// Builds a pool from explicit lists.
    pub fn new(user_agents: Vec<String>, referrers: Vec<String>, proxies: Vec<String>) -> Self {
        Self {
            user_agents,
            referrers,
            proxies,
        }
    }

    /// Replaces the proxy pool.
    pub fn with_proxies(mut self, proxies: Vec<String>) -> Self {
        self.proxies = proxies;
        self
    }

    /// Replaces the referrer pool.
    pub fn with_referrers(mut self, referrers: Vec<String>) -> Self {
        self.referrers = referrers;
        self
    }

    pub fn user_agents(&self) -> &[String] {
        &self.user_agents
    }

    pub fn referrers(&self) -> &[String] {
        &self.referrers
    }

    pub fn proxies(&self) -> &[String] {
        &self.proxies
    }

    /// Draws a fingerprint uniformly from the pools.
    ///
    /// The referrer falls back to a generic search-engine URL when the
    /// referrer pool is empty. A proxy is drawn only when `use_proxy` is set
    /// and the proxy pool is non-empty.
    ///
    /// # Arguments
    ///
    /// * `rng` - Random source (seeded in tests)
    /// * `use_proxy` - Whether the session routes through a proxy
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R, use_proxy: bool) -> Fingerprint {
        let user_agent = self
            .user_agents
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| FALLBACK_USER_AGENT.to_string());
        let referer = self
            .referrers
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| DEFAULT_REFERRER.to_string());
        let proxy = if use_proxy {
            self.proxies.choose(rng).cloned()
        } else {
            None
        };

        Fingerprint {
            user_agent,
            referer,
            proxy,
        }
    }
}
