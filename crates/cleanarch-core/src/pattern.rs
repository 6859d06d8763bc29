//! Package-path wildcard matching.
//!
//! Patterns are dotted segment sequences where `..` matches zero or more
//! arbitrary segments and `*` matches exactly one. This is implemented as a
//! small recursive matcher over parsed segments rather than a regex
//! translation, so the matching semantics stay exact and testable.
//!
//! Examples: `com.example.core..`, `..request..`, `app.*.order`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One parsed pattern segment.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Matches the identical package segment.
    Literal(String),
    /// `*` — matches exactly one arbitrary segment.
    AnySingle,
    /// `..` — matches zero or more arbitrary segments.
    AnyDepth,
}

/// A validated package-path pattern.
///
/// Compiled once at construction and reused for all match calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackagePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PackagePattern {
    /// Creates a new package pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is empty or malformed (e.g., three
    /// consecutive dots, or an empty segment like `a..b.`).
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }

        let mut segments = Vec::new();
        for (i, part) in pattern.split("..").enumerate() {
            if i > 0 {
                segments.push(Segment::AnyDepth);
            }
            if part.is_empty() {
                continue;
            }
            for seg in part.split('.') {
                if seg.is_empty() {
                    return Err(PatternError::Malformed {
                        pattern: pattern.to_string(),
                    });
                }
                if seg == "*" {
                    segments.push(Segment::AnySingle);
                } else {
                    segments.push(Segment::Literal(seg.to_string()));
                }
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// Compiles a list of pattern strings.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub fn compile_all(patterns: &[&str]) -> Result<Vec<Self>, PatternError> {
        patterns.iter().map(|p| Self::new(p)).collect()
    }

    /// Tests whether a dotted package path matches this pattern.
    #[must_use]
    pub fn matches(&self, package: &str) -> bool {
        if package.is_empty() {
            return false;
        }
        let parts: Vec<&str> = package.split('.').collect();
        match_segments(&self.segments, &parts)
    }

    /// Returns the pattern as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for PackagePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl TryFrom<String> for PackagePattern {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<PackagePattern> for String {
    fn from(pattern: PackagePattern) -> Self {
        pattern.raw
    }
}

fn match_segments(pattern: &[Segment], path: &[&str]) -> bool {
    let Some((first, rest)) = pattern.split_first() else {
        return path.is_empty();
    };

    match first {
        Segment::AnyDepth => {
            // Zero or more segments, tried shortest-first.
            (0..=path.len()).any(|i| match_segments(rest, &path[i..]))
        }
        Segment::AnySingle => !path.is_empty() && match_segments(rest, &path[1..]),
        Segment::Literal(literal) => {
            path.first() == Some(&literal.as_str()) && match_segments(rest, &path[1..])
        }
    }
}

/// Tests whether a package resides in at least one of the given patterns.
///
/// An empty pattern set never matches.
#[must_use]
pub fn resides_in_any(package: &str, patterns: &[PackagePattern]) -> bool {
    patterns.iter().any(|p| p.matches(package))
}

/// Tests whether `prefix` is a segment-wise prefix of `package`.
///
/// True on exact equality or when the package continues past the prefix at
/// a segment boundary; `com.example.order` is not a prefix of
/// `com.example.orders`.
#[must_use]
pub fn is_prefix_of(prefix: &str, package: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }
    package == prefix
        || (package.starts_with(prefix) && package.as_bytes().get(prefix.len()) == Some(&b'.'))
}

/// Returns the last dotted segment of a package or unit name.
#[must_use]
pub fn last_segment(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

/// Errors constructing a package pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// Pattern string is empty.
    #[error("package pattern must not be empty")]
    Empty,

    /// Pattern contains an empty segment.
    #[error("malformed package pattern `{pattern}`")]
    Malformed {
        /// The offending pattern.
        pattern: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(raw: &str) -> PackagePattern {
        PackagePattern::new(raw).unwrap()
    }

    #[test]
    fn literal_pattern_matches_exactly_one_path() {
        let p = pattern("com.example.core");
        assert!(p.matches("com.example.core"));
        assert!(!p.matches("com.example.core.order"));
        assert!(!p.matches("com.example"));
    }

    #[test]
    fn trailing_wildcard_matches_subpackages() {
        let p = pattern("com.example.core..");
        assert!(p.matches("com.example.core"));
        assert!(p.matches("com.example.core.order"));
        assert!(p.matches("com.example.core.order.item"));
        assert!(!p.matches("com.example.app"));
    }

    #[test]
    fn surrounding_wildcards_find_segment_at_any_depth() {
        let p = pattern("..request..");
        assert!(p.matches("app.usecase.order.request"));
        assert!(p.matches("request"));
        assert!(p.matches("app.request.enums"));
        assert!(!p.matches("app.usecase.order.response"));
        assert!(!p.matches("app.requests"));
    }

    #[test]
    fn inner_wildcard_spans_arbitrary_depth() {
        let p = pattern("app..order");
        assert!(p.matches("app.usecase.order"));
        assert!(p.matches("app.order"));
        assert!(p.matches("app.a.b.c.order"));
        assert!(!p.matches("app.usecase.payment"));
    }

    #[test]
    fn single_wildcard_matches_one_segment() {
        let p = pattern("app.*.order");
        assert!(p.matches("app.usecase.order"));
        assert!(!p.matches("app.order"));
        assert!(!p.matches("app.a.b.order"));
    }

    #[test]
    fn multiple_any_depth_tokens() {
        let p = pattern("..usecase..request..");
        assert!(p.matches("app.usecase.order.request"));
        assert!(p.matches("usecase.request"));
        assert!(!p.matches("app.request.usecase"));
    }

    #[test]
    fn empty_pattern_rejected() {
        assert_eq!(PackagePattern::new(""), Err(PatternError::Empty));
    }

    #[test]
    fn malformed_patterns_rejected() {
        assert!(matches!(
            PackagePattern::new("a...b"),
            Err(PatternError::Malformed { .. })
        ));
        assert!(matches!(
            PackagePattern::new("a.b."),
            Err(PatternError::Malformed { .. })
        ));
        assert!(matches!(
            PackagePattern::new(".a.b"),
            Err(PatternError::Malformed { .. })
        ));
    }

    #[test]
    fn empty_package_never_matches() {
        assert!(!pattern("..").matches(""));
        assert!(!pattern("a..").matches(""));
    }

    #[test]
    fn resides_in_any_requires_nonempty_set() {
        assert!(!resides_in_any("com.example.core", &[]));
        let patterns = vec![pattern("com.example.app.."), pattern("com.example.core..")];
        assert!(resides_in_any("com.example.core.order", &patterns));
        assert!(!resides_in_any("org.other", &patterns));
    }

    #[test]
    fn prefix_respects_segment_boundaries() {
        assert!(is_prefix_of("app.usecase.order", "app.usecase.order"));
        assert!(is_prefix_of("app.usecase.order", "app.usecase.order.request"));
        assert!(!is_prefix_of("app.usecase.order", "app.usecase.orders"));
        assert!(!is_prefix_of("", "app"));
    }

    #[test]
    fn last_segment_of_dotted_path() {
        assert_eq!(last_segment("app.usecase.order.OrderHandler"), "OrderHandler");
        assert_eq!(last_segment("OrderHandler"), "OrderHandler");
    }

    #[test]
    fn serde_round_trip_through_raw_string() {
        let p = pattern("com.example.core..");
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"com.example.core..\"");
        let back: PackagePattern = serde_json::from_str(&json).unwrap();
        assert!(back.matches("com.example.core.order"));
    }
}
