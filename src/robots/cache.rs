//! Per-origin robots.txt rule cache
//!
//! Each origin's robots.txt is fetched and parsed on first use and kept for
//! the lifetime of the cache. There is no expiry. Failed fetches are not
//! cached, so the next lookup for that origin tries again.

use crate::fetcher::Fetcher;
use crate::robots::parser::{parse, RuleSet};
use crate::url::Origin;
use crate::{RobotsError, Result};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Parsed robots.txt rules for an origin, with the time they were fetched
#[derive(Debug, Clone)]
pub struct CachedRuleSet {
    /// The parsed rules
    pub rules: Arc<RuleSet>,

    /// When the robots.txt was fetched
    pub fetched_at: DateTime<Utc>,
}

impl CachedRuleSet {
    /// Wraps freshly parsed rules, stamped with the current time
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self {
            rules,
            fetched_at: Utc::now(),
        }
    }

    /// Returns how long ago the robots.txt was fetched
    pub fn age(&self) -> Duration {
        Utc::now() - self.fetched_at
    }
}

/// Maps origins to their parsed robots.txt rules
///
/// Lookups for an origin that is already cached never touch the network.
/// The map is guarded by a mutex that is never held across a fetch, so two
/// concurrent first lookups for the same origin may both fetch; the first
/// result stored wins.
pub struct OriginRuleCache<F> {
    fetcher: F,
    entries: Mutex<HashMap<Origin, CachedRuleSet>>,
}

impl<F: Fetcher> OriginRuleCache<F> {
    /// Creates an empty cache that fetches through `fetcher`
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the fetcher used on cache misses
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Returns the rules for an origin, fetching its robots.txt on a miss
    ///
    /// # Arguments
    ///
    /// * `origin` - The origin whose robots.txt applies
    /// * `user_agent` - The User-Agent sent if a fetch is needed
    ///
    /// # Returns
    ///
    /// * `Ok(Arc<RuleSet>)` - The cached or freshly parsed rules
    /// * `Err(RobotsError::MissingRobotsTxt)` - The robots.txt could not be retrieved
    pub async fn get_rule_set(&self, origin: &Origin, user_agent: &str) -> Result<Arc<RuleSet>> {
        if let Some(cached) = self.get_cached(origin) {
            tracing::debug!("robots.txt cache hit for {}", origin);
            return Ok(cached.rules);
        }

        tracing::debug!("robots.txt cache miss for {}", origin);
        let robots_url = origin.robots_txt_url()?;

        let content = match self.fetcher.fetch(&robots_url, user_agent).await {
            Ok(content) => content,
            Err(source) => {
                tracing::warn!("Failed to fetch {}: {}", robots_url, source);
                return Err(RobotsError::MissingRobotsTxt {
                    url: robots_url.to_string(),
                    source,
                });
            }
        };

        let rules = Arc::new(parse(&content));
        tracing::info!(
            "Cached robots.txt for {} ({} bytes, {} user-agent group(s))",
            origin,
            content.len(),
            rules.len()
        );

        let mut entries = self.lock();
        let entry = entries
            .entry(origin.clone())
            .or_insert_with(|| CachedRuleSet::new(rules));
        Ok(Arc::clone(&entry.rules))
    }

    /// Returns the cached entry for an origin without fetching
    pub fn get_cached(&self, origin: &Origin) -> Option<CachedRuleSet> {
        self.lock().get(origin).cloned()
    }

    /// Returns true if the origin has cached rules
    pub fn contains(&self, origin: &Origin) -> bool {
        self.lock().contains_key(origin)
    }

    /// Returns the number of cached origins
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Origin, CachedRuleSet>> {
        // Entries are inserted whole, so a poisoned map is still consistent
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
