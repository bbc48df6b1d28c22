//! Robots.txt handling module
//!
//! This module provides the rule engine: parsing robots.txt into per-agent
//! rule sets, compiling path patterns, caching rule sets per origin, and
//! deciding whether a URL may be fetched.
//!
//! Evaluation is first-match-wins over the Disallow patterns in file order.
//! There is no longest-match precedence, and Allow patterns only take part
//! when [`RobotsTxt::set_honor_allow`] is switched on.

mod cache;
mod parser;
mod pattern;

pub use cache::{CachedRuleSet, OriginRuleCache};
pub use parser::{parse, Directive, RuleSet, UserAgentRules};
pub use pattern::{compile, Pattern};

use crate::config::{validate, Config, EvaluationConfig};
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::url::{normalize_request_path, parse_target, Origin};
use crate::Result;
use std::sync::Arc;
use url::Url;

/// The robots.txt gate
///
/// Owns an [`OriginRuleCache`], so rule sets live exactly as long as the
/// engine does.
pub struct RobotsTxt<F = HttpFetcher> {
    cache: OriginRuleCache<F>,
    user_agent: String,
    default_agent: String,
    honor_allow: bool,
}

impl RobotsTxt<HttpFetcher> {
    /// Creates an engine backed by [`HttpFetcher`] with default settings
    pub fn with_http_fetcher() -> Result<Self> {
        Self::from_config(&Config::default())
    }

    /// Creates an engine backed by [`HttpFetcher`] from a configuration
    ///
    /// The configuration is validated first, so a hand-built [`Config`] is
    /// held to the same rules as one loaded from a file.
    pub fn from_config(config: &Config) -> Result<Self> {
        validate(config)?;
        let fetcher = HttpFetcher::new(&config.fetcher)?;
        let mut robots = RobotsTxt::new(fetcher).with_evaluation(&config.evaluation);
        robots.set_user_agent(config.user_agent.token.as_str());
        Ok(robots)
    }
}

impl<F: Fetcher> RobotsTxt<F> {
    /// Creates an engine that retrieves robots.txt through `fetcher`
    pub fn new(fetcher: F) -> Self {
        let evaluation = EvaluationConfig::default();
        Self {
            cache: OriginRuleCache::new(fetcher),
            user_agent: String::new(),
            default_agent: evaluation.default_agent,
            honor_allow: evaluation.honor_allow,
        }
    }

    /// Applies the `[evaluation]` settings
    pub fn with_evaluation(mut self, config: &EvaluationConfig) -> Self {
        self.default_agent = config.default_agent.clone();
        self.honor_allow = config.honor_allow;
        self
    }

    /// Sets the User-Agent sent when fetching robots.txt
    ///
    /// This identifies the crawler to the site; it does not choose which
    /// rule group is evaluated (see [`RobotsTxt::is_allowed_for`]).
    pub fn set_user_agent(&mut self, token: impl Into<String>) -> &mut Self {
        self.user_agent = token.into();
        self
    }

    /// Returns the User-Agent sent when fetching robots.txt
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Lets a matching Allow pattern override a matching Disallow pattern
    pub fn set_honor_allow(&mut self, honor_allow: bool) -> &mut Self {
        self.honor_allow = honor_allow;
        self
    }

    /// Returns the rule group consulted by [`RobotsTxt::is_allowed`]
    pub fn default_agent(&self) -> &str {
        &self.default_agent
    }

    /// Returns the per-origin rule cache
    pub fn cache(&self) -> &OriginRuleCache<F> {
        &self.cache
    }

    /// Checks if a URL may be crawled under the default agent's rules (`*`)
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - No Disallow pattern matches the URL's path
    /// * `Ok(false)` - A Disallow pattern matches
    /// * `Err(RobotsError::InvalidUrl)` - The URL is not an http(s) URL with a host
    /// * `Err(RobotsError::MissingRobotsTxt)` - The origin's robots.txt could not be fetched
    pub async fn is_allowed(&self, url: &str) -> Result<bool> {
        self.is_allowed_for(url, &self.default_agent).await
    }

    /// Checks if a URL may be crawled under a specific agent's rules
    ///
    /// An agent without a group in the robots.txt is allowed everywhere.
    pub async fn is_allowed_for(&self, url: &str, agent: &str) -> Result<bool> {
        let target = parse_target(url)?;
        let rules = self.rules_for(&target).await?;

        let Some(group) = rules.agent(agent) else {
            tracing::debug!("No rules for agent '{}' at {}, allowing", agent, url);
            return Ok(true);
        };

        let path = normalize_request_path(&target);
        Ok(evaluate(group, &path, self.honor_allow))
    }

    /// Returns the default agent's Disallow patterns for the URL's origin
    pub async fn get_disallowed(&self, url: &str) -> Result<Vec<String>> {
        self.get_disallowed_for(url, &self.default_agent).await
    }

    /// Returns an agent's Disallow patterns for the URL's origin, in file order
    ///
    /// Empty if the agent has no group.
    pub async fn get_disallowed_for(&self, url: &str, agent: &str) -> Result<Vec<String>> {
        let rules = self.rule_set(url).await?;
        Ok(rules
            .agent(agent)
            .map(UserAgentRules::disallowed_patterns)
            .unwrap_or_default())
    }

    /// Returns an agent's Allow patterns for the URL's origin, in file order
    pub async fn get_allowed_for(&self, url: &str, agent: &str) -> Result<Vec<String>> {
        let rules = self.rule_set(url).await?;
        Ok(rules
            .agent(agent)
            .map(UserAgentRules::allowed_patterns)
            .unwrap_or_default())
    }

    /// Returns the complete rule set for the URL's origin
    pub async fn rule_set(&self, url: &str) -> Result<Arc<RuleSet>> {
        let target = parse_target(url)?;
        self.rules_for(&target).await
    }

    async fn rules_for(&self, target: &Url) -> Result<Arc<RuleSet>> {
        let origin = Origin::from_url(target)?;
        self.cache.get_rule_set(&origin, &self.user_agent).await
    }
}

/// Decides a normalized path against one agent's rules
fn evaluate(group: &UserAgentRules, path: &str, honor_allow: bool) -> bool {
    let Some(disallow) = group.first_disallow_match(path) else {
        return true;
    };

    if honor_allow {
        if let Some(allow) = group.first_allow_match(path) {
            tracing::trace!("'{}' allowed by '{}' over '{}'", path, allow, disallow);
            return true;
        }
    }

    tracing::trace!("'{}' disallowed by '{}'", path, disallow);
    false
}
