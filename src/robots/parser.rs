//! Robots.txt parser implementation
//!
//! This module turns raw robots.txt text into a [`RuleSet`]: Allow and
//! Disallow patterns grouped by user-agent token, in file order. Parsing is
//! line oriented and permissive; anything that is not a recognized directive
//! is skipped.

use crate::robots::pattern::{compile, Pattern};
use std::collections::HashMap;

/// A single Allow/Disallow rule line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Allow(String),
    Disallow(String),
}

/// The Allow and Disallow patterns of one user-agent group, in file order
#[derive(Debug, Clone, Default)]
pub struct UserAgentRules {
    allowed: Vec<Pattern>,
    disallowed: Vec<Pattern>,
}

impl UserAgentRules {
    /// Compiled Allow patterns
    pub fn allowed(&self) -> &[Pattern] {
        &self.allowed
    }

    /// Compiled Disallow patterns
    pub fn disallowed(&self) -> &[Pattern] {
        &self.disallowed
    }

    /// Allow patterns as they appear in the file
    pub fn allowed_patterns(&self) -> Vec<String> {
        self.allowed.iter().map(|p| p.as_str().to_string()).collect()
    }

    /// Disallow patterns as they appear in the file
    pub fn disallowed_patterns(&self) -> Vec<String> {
        self.disallowed.iter().map(|p| p.as_str().to_string()).collect()
    }

    /// Returns the first Disallow pattern matching a normalized path
    ///
    /// Empty Disallow values never match: `Disallow:` on its own line means
    /// nothing is disallowed.
    pub fn first_disallow_match(&self, path: &str) -> Option<&Pattern> {
        first_match(&self.disallowed, path)
    }

    /// Returns the first Allow pattern matching a normalized path
    pub fn first_allow_match(&self, path: &str) -> Option<&Pattern> {
        first_match(&self.allowed, path)
    }

    fn push(&mut self, directive: Directive) {
        match directive {
            Directive::Allow(pattern) => self.allowed.push(compile(&pattern)),
            Directive::Disallow(pattern) => self.disallowed.push(compile(&pattern)),
        }
    }
}

fn first_match<'a>(patterns: &'a [Pattern], path: &str) -> Option<&'a Pattern> {
    patterns.iter().find(|p| !p.is_empty() && p.matches(path))
}

/// All directives of one robots.txt, grouped by lowercase user-agent token
///
/// Directives that appear before any `User-agent:` line are kept under the
/// empty token.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    groups: HashMap<String, UserAgentRules>,
}

impl RuleSet {
    /// Looks up the rules for a user-agent token, ignoring case
    pub fn agent(&self, agent: &str) -> Option<&UserAgentRules> {
        self.groups.get(&agent.trim().to_lowercase())
    }

    /// Returns the user-agent tokens that have rules, sorted
    pub fn agents(&self) -> Vec<&str> {
        let mut agents: Vec<&str> = self.groups.keys().map(String::as_str).collect();
        agents.sort_unstable();
        agents
    }

    /// Returns the number of user-agent groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if no directive was parsed
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn push(&mut self, agent: &str, directive: Directive) {
        self.groups
            .entry(agent.to_string())
            .or_default()
            .push(directive);
    }
}

/// A recognized robots.txt line
#[derive(Debug, PartialEq, Eq)]
enum Line {
    UserAgent(String),
    Rule(Directive),
}

/// Parses robots.txt content into a [`RuleSet`]
///
/// Never fails: content without a recognizable directive yields an empty
/// rule set, which allows everything.
///
/// # Examples
///
/// ```
/// use robots_gate::robots::parse;
///
/// let rules = parse("User-agent: *\nDisallow: /backend\nDisallow: /stats\n");
/// let group = rules.agent("*").unwrap();
/// assert_eq!(group.disallowed_patterns(), vec!["backend", "stats"]);
/// ```
pub fn parse(content: &str) -> RuleSet {
    let mut rules = RuleSet::default();
    let mut current_agent = String::new();

    for line in content.lines() {
        match parse_line(line) {
            Some(Line::UserAgent(agent)) => current_agent = agent,
            Some(Line::Rule(directive)) => rules.push(&current_agent, directive),
            None => {}
        }
    }

    tracing::debug!(
        "Parsed robots.txt: {} user-agent group(s) from {} line(s)",
        rules.len(),
        content.lines().count()
    );

    rules
}

/// Recognizes a single line, after comment removal and case folding
fn parse_line(line: &str) -> Option<Line> {
    let line = strip_comment(line).to_lowercase();
    let line = line.trim_start();

    if let Some(argument) = directive_argument(line, "disallow") {
        return Some(Line::Rule(Directive::Disallow(normalize_pattern(argument))));
    }

    if let Some(argument) = directive_argument(line, "allow") {
        return Some(Line::Rule(Directive::Allow(normalize_pattern(argument))));
    }

    line.find("user-agent:").map(|idx| {
        let agent = &line[idx + "user-agent:".len()..];
        Line::UserAgent(agent.trim().to_string())
    })
}

/// Removes everything from the first `#` onward
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Extracts the trimmed argument of `name:`, also accepting `name :`
fn directive_argument<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(name)?;
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    rest.strip_prefix(':').map(str::trim)
}

/// Strips one leading and one trailing `/`, except from the `/` sentinel
fn normalize_pattern(argument: &str) -> String {
    if argument == "/" {
        return argument.to_string();
    }
    let argument = argument.strip_prefix('/').unwrap_or(argument);
    let argument = argument.strip_suffix('/').unwrap_or(argument);
    argument.to_string()
}
