// Location matching - structured suffix checks against the current URL
//
// Matching is over path segments, not general regex. A rule either matches
// a suffix of the location's path (with the subject bound at resolution
// time) or delegates to a descriptor-supplied predicate. Predicates take
// precedence over the category default when both exist.

use crate::descriptor::PageType;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// One element of a suffix pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches this exact path segment.
    Literal(String),
    /// Matches the resolved subject.
    Subject,
    /// Matches any non-empty segment (e.g. a record id).
    Wildcard,
}

impl Segment {
    pub fn literal(value: impl Into<String>) -> Self {
        Segment::Literal(value.into())
    }
}

/// How a page object decides whether a location belongs to it.
#[derive(Clone)]
pub enum LocationRule {
    /// The location's path must end with these segments.
    Suffix(Vec<Segment>),
    /// Custom check: `(subject, location) -> bool`.
    Predicate(Arc<dyn Fn(&str, &str) -> bool + Send + Sync>),
}

impl LocationRule {
    /// Builds a suffix rule.
    pub fn suffix(segments: Vec<Segment>) -> Self {
        LocationRule::Suffix(segments)
    }

    /// Builds a custom predicate rule.
    pub fn predicate<F>(check: F) -> Self
    where
        F: Fn(&str, &str) -> bool + Send + Sync + 'static,
    {
        LocationRule::Predicate(Arc::new(check))
    }

    /// Checks `location` against this rule with `subject` bound.
    ///
    /// Pure and read-only; safe to call repeatedly and concurrently.
    pub fn matches(&self, subject: &str, location: &str) -> bool {
        match self {
            LocationRule::Suffix(segments) => {
                let path = path_segments(location);
                if path.len() < segments.len() {
                    return false;
                }
                let tail = &path[path.len() - segments.len()..];
                segments.iter().zip(tail).all(|(pattern, actual)| match pattern {
                    Segment::Literal(expected) => actual == expected,
                    Segment::Subject => actual == subject,
                    Segment::Wildcard => !actual.is_empty(),
                })
            }
            LocationRule::Predicate(check) => check(subject, location),
        }
    }
}

impl fmt::Debug for LocationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationRule::Suffix(segments) => f.debug_tuple("Suffix").field(segments).finish(),
            LocationRule::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// The builtin pattern for a page type, or `None` for custom types.
pub(crate) fn default_rule(page_type: &PageType) -> Option<LocationRule> {
    let segments = match page_type {
        PageType::Home => vec![
            Segment::literal("o"),
            Segment::Subject,
            Segment::literal("home"),
        ],
        PageType::Listing => vec![
            Segment::literal("o"),
            Segment::Subject,
            Segment::literal("list"),
        ],
        PageType::Detail => vec![
            Segment::literal("r"),
            Segment::Subject,
            Segment::Wildcard,
            Segment::literal("view"),
        ],
        PageType::Custom(_) => return None,
    };
    Some(LocationRule::Suffix(segments))
}

/// Checks `location` against the builtin pattern for `page_type`.
///
/// Unknown (custom) page types match nothing; descriptor-level overrides are
/// applied by the resolver, not here.
pub fn matches(page_type: &PageType, subject: &str, location: &str) -> bool {
    default_rule(page_type)
        .map(|rule| rule.matches(subject, location))
        .unwrap_or(false)
}

/// Splits a location into its path segments, ignoring query and fragment.
///
/// Falls back to raw splitting for strings that are not absolute URLs
/// (relative paths show up in host environments that report locations
/// without an origin).
fn path_segments(location: &str) -> Vec<String> {
    match Url::parse(location) {
        Ok(url) => url
            .path()
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect(),
        Err(_) => {
            let path = location.split(['?', '#']).next().unwrap_or_default();
            path.split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect()
        }
    }
}
