//! URL handling module for Robots-Gate
//!
//! This module parses target URLs, derives their robots.txt origin, and
//! normalizes request paths into the form robots patterns are matched against.

mod domain;
mod normalize;

pub use domain::Origin;
pub use normalize::{normalize_path, normalize_request_path, parse_target};
