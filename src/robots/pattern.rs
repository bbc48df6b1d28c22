//! Robots.txt path pattern compilation
//!
//! Patterns are translated character by character into an anchored regular
//! expression and matched against normalized request paths (see
//! [`crate::url::normalize_path`]): lowercase, no leading slash, exactly one
//! trailing slash.
//!
//! | Pattern char | Meaning |
//! |--------------|---------|
//! | leading `/`  | anchors at the start of the path (always implied) |
//! | `/`          | literal path separator |
//! | `*`          | zero or more of letters, digits, `_`, `-`, `/` |
//! | `$`          | end of path |
//! | anything else | itself, escaped |
//!
//! Without `$` a pattern matches as a prefix that ends on a segment boundary,
//! so `/source.php` blocks `/source.php` and `/source.php/x` but not
//! `/sources.php`. A trailing `*` removes that boundary and is otherwise
//! dropped. Percent escapes in a pattern are decoded first, the same way
//! request paths are.

use percent_encoding::percent_decode_str;
use regex::Regex;
use std::fmt;

/// Characters a `*` wildcard may stand for
const WILDCARD: &str = r"[\w\-/]*";

/// A compiled robots.txt path pattern
#[derive(Debug, Clone)]
pub struct Pattern {
    /// The pattern as it was handed to [`compile`]
    source: String,
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    /// The `/` sentinel: everything under the origin
    Everything,
    /// The empty pattern: a degenerate prefix of every path
    Empty,
    Regex(Regex),
    /// The generated expression was rejected by the regex engine; fails closed
    Invalid,
}

/// Compiles a robots.txt path pattern into a predicate over normalized paths
///
/// # Examples
///
/// ```
/// use robots_gate::robots::compile;
///
/// let pattern = compile("/manual/vote-note.php");
/// assert!(pattern.matches("manual/vote-note.php/"));
/// assert!(!pattern.matches("manual/other.php/"));
///
/// let pattern = compile("*/account");
/// assert!(pattern.matches("user/account/other-stuff/"));
/// ```
pub fn compile(pattern: &str) -> Pattern {
    let matcher = match pattern {
        "/" => Matcher::Everything,
        "" => Matcher::Empty,
        _ => {
            let decoded = percent_decode_str(pattern).decode_utf8_lossy();
            build_matcher(&translate(&decoded.to_lowercase()), pattern)
        }
    };

    Pattern {
        source: pattern.to_string(),
        matcher,
    }
}

impl Pattern {
    /// Returns the pattern exactly as it was compiled
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true for the `/` sentinel, which covers a whole origin
    pub fn is_everything(&self) -> bool {
        matches!(self.matcher, Matcher::Everything)
    }

    /// Returns true for the empty pattern
    pub fn is_empty(&self) -> bool {
        matches!(self.matcher, Matcher::Empty)
    }

    /// Tests a normalized request path against the pattern
    pub fn matches(&self, path: &str) -> bool {
        match &self.matcher {
            Matcher::Everything | Matcher::Empty | Matcher::Invalid => true,
            Matcher::Regex(regex) => regex.is_match(path),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Translates a lowercase, non-sentinel pattern into a regular expression
fn translate(pattern: &str) -> String {
    let body = pattern.strip_prefix('/').unwrap_or(pattern);
    let mut expression = String::from("^");
    let mut ends_with_slash = false;
    let mut chars = body.chars().peekable();
    let mut buf = [0u8; 4];

    while let Some(ch) = chars.next() {
        match ch {
            '*' => {
                while chars.peek() == Some(&'*') {
                    chars.next();
                }
                if chars.peek().is_none() {
                    // Trailing wildcard: the open-ended prefix match covers it
                    return expression;
                }
                expression.push_str(WILDCARD);
                ends_with_slash = false;
            }
            '$' => {
                // Normalized paths always end in '/', which is where `$` lands
                expression.push_str(if ends_with_slash { "$" } else { "/$" });
                return expression;
            }
            '/' => {
                expression.push('/');
                ends_with_slash = true;
            }
            other => {
                expression.push_str(&regex::escape(other.encode_utf8(&mut buf)));
                ends_with_slash = false;
            }
        }
    }

    if !ends_with_slash {
        expression.push('/');
    }
    expression
}

/// Builds the matcher for a translated expression
///
/// An expression the regex engine rejects yields a matcher that covers
/// every path, so a Disallow that cannot be compiled blocks.
fn build_matcher(expression: &str, pattern: &str) -> Matcher {
    match Regex::new(expression) {
        Ok(regex) => Matcher::Regex(regex),
        Err(e) => {
            tracing::warn!(
                "Pattern '{}' produced an invalid expression ({}), matching every path",
                pattern,
                e
            );
            Matcher::Invalid
        }
    }
}
