//! Version token parsing and wildcard resolution.
//!
//! A version token is either an exact tag, used verbatim, or one of three
//! wildcard shapes that resolve against the release catalog:
//!
//! - `MAJOR.MINOR.*` - latest patch of an exact major and minor
//! - `MAJOR.*.*` - latest release of an exact major
//! - `*` - latest release overall
//!
//! Drafts and prereleases are never selected. Among the qualifying releases
//! the greatest tag under [`compare_tags`] wins, and ties keep the release
//! that appears first in the catalog.

use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use crate::release::Release;
use crate::{Error, Result};

/// Character that marks a token as a wildcard pattern.
pub const WILDCARD: char = '*';

/// A parsed version token.
///
/// Major and minor components keep the digit text exactly as written so the
/// prefix test matches what the caller typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionPattern {
    /// A concrete tag, used as-is.
    Exact(String),
    /// `MAJOR.MINOR.*`
    MajorMinor {
        /// Major component digits
        major: String,
        /// Minor component digits
        minor: String,
    },
    /// `MAJOR.*.*`
    Major {
        /// Major component digits
        major: String,
    },
    /// `*`
    Any,
}

impl VersionPattern {
    /// Parse a version token.
    ///
    /// Tokens without a `*` are exact. Tokens with a `*` must match one of the
    /// three wildcard shapes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] for a wildcard token of any other
    /// shape, such as `1.*.2`, `*.3.*` or `x.y.*`.
    pub fn parse(token: &str) -> Result<Self> {
        let token = token.trim();
        if !is_wildcard(token) {
            return Ok(Self::Exact(token.to_string()));
        }
        if token == "*" {
            return Ok(Self::Any);
        }

        match token.split('.').collect::<Vec<_>>().as_slice() {
            [major, minor, "*"] if is_digits(major) && is_digits(minor) => Ok(Self::MajorMinor {
                major: (*major).to_string(),
                minor: (*minor).to_string(),
            }),
            [major, "*", "*"] if is_digits(major) => Ok(Self::Major {
                major: (*major).to_string(),
            }),
            _ => Err(Error::invalid_pattern(token)),
        }
    }

    /// Whether resolution needs the release catalog.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        !matches!(self, Self::Exact(_))
    }

    /// Whether a release satisfies this pattern's shape and eligibility rules.
    #[must_use]
    pub fn matches(&self, release: &Release) -> bool {
        if !release.is_eligible() {
            return false;
        }
        match self {
            Self::Exact(tag) => release.tag == *tag,
            Self::MajorMinor { major, minor } => strip_component(&release.tag, major)
                .and_then(|rest| strip_component(rest, minor))
                .is_some(),
            Self::Major { major } => strip_component(&release.tag, major).is_some(),
            Self::Any => true,
        }
    }

    /// Resolve this pattern to one concrete tag.
    ///
    /// Exact tokens resolve to themselves without looking at `releases`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoMatch`] when no eligible release qualifies.
    pub fn resolve(&self, releases: &[Release]) -> Result<String> {
        if let Self::Exact(tag) = self {
            return Ok(tag.clone());
        }

        let latest = releases
            .iter()
            .filter(|release| self.matches(release))
            .fold(None::<&Release>, |best, candidate| match best {
                Some(current) if compare_tags(&candidate.tag, &current.tag) != Ordering::Greater => {
                    Some(current)
                }
                _ => Some(candidate),
            });

        match latest {
            Some(release) => {
                debug!(pattern = %self, tag = %release.tag, "Resolved version pattern");
                Ok(release.tag.clone())
            }
            None => Err(Error::no_match(self.to_string())),
        }
    }
}

impl fmt::Display for VersionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(tag) => write!(f, "{tag}"),
            Self::MajorMinor { major, minor } => write!(f, "{major}.{minor}.*"),
            Self::Major { major } => write!(f, "{major}.*.*"),
            Self::Any => write!(f, "*"),
        }
    }
}

impl std::str::FromStr for VersionPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Whether a raw token contains the wildcard marker.
#[must_use]
pub fn is_wildcard(token: &str) -> bool {
    token.contains(WILDCARD)
}

/// Parse `token` and resolve it against `releases`.
///
/// # Errors
///
/// Returns [`Error::InvalidPattern`] or [`Error::NoMatch`].
pub fn resolve_version(token: &str, releases: &[Release]) -> Result<String> {
    VersionPattern::parse(token)?.resolve(releases)
}

/// Compare two tags segment by segment as unsigned integers.
///
/// Tags are split on `.` and compared left to right; the first differing
/// segment decides. A missing trailing segment counts as `0`, so `1.2` and
/// `1.2.0` are equal. A segment that is not a decimal integer also counts as
/// `0`. Segments are compared by digit text, so values of any size keep
/// their numeric order.
#[must_use]
pub fn compare_tags(a: &str, b: &str) -> Ordering {
    let left: Vec<&str> = a.split('.').map(segment_digits).collect();
    let right: Vec<&str> = b.split('.').map(segment_digits).collect();
    let len = left.len().max(right.len());

    (0..len)
        .map(|i| {
            let l = left.get(i).copied().unwrap_or("");
            let r = right.get(i).copied().unwrap_or("");
            l.len().cmp(&r.len()).then_with(|| l.cmp(r))
        })
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// Significant digits of a segment; empty stands for zero.
fn segment_digits(segment: &str) -> &str {
    if is_digits(segment) {
        segment.trim_start_matches('0')
    } else {
        ""
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Strip `"{component}."` from the front of `tag`.
fn strip_component<'a>(tag: &'a str, component: &str) -> Option<&'a str> {
    tag.strip_prefix(component)?.strip_prefix('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn releases(tags: &[&str]) -> Vec<Release> {
        tags.iter().map(|t| Release::new(*t)).collect()
    }

    #[test]
    fn test_parse_exact() {
        assert_eq!(
            VersionPattern::parse("1.2.3").unwrap(),
            VersionPattern::Exact("1.2.3".into())
        );
        assert_eq!(
            VersionPattern::parse("  1.0.87 ").unwrap(),
            VersionPattern::Exact("1.0.87".into())
        );
    }

    #[test]
    fn test_parse_wildcard_shapes() {
        assert_eq!(
            VersionPattern::parse("2.1.*").unwrap(),
            VersionPattern::MajorMinor {
                major: "2".into(),
                minor: "1".into()
            }
        );
        assert_eq!(
            VersionPattern::parse("3.*.*").unwrap(),
            VersionPattern::Major { major: "3".into() }
        );
        assert_eq!(VersionPattern::parse("*").unwrap(), VersionPattern::Any);
    }

    #[test]
    fn test_parse_malformed_wildcards() {
        for token in ["x.y.*", "1.*.2", "*.3.*", "1.*", "1.2.3.*", "**", "1.2*", "v1.*.*", ".*.*"] {
            let err = VersionPattern::parse(token).unwrap_err();
            assert!(
                matches!(err, Error::InvalidPattern { ref pattern } if pattern == token),
                "{token} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_round_trips_wildcards() {
        for token in ["*", "3.*.*", "12.04.*"] {
            assert_eq!(VersionPattern::parse(token).unwrap().to_string(), token);
        }
    }

    #[test]
    fn test_major_minor_picks_greatest_patch() {
        let catalog = vec![
            Release::new("2.1.0"),
            Release::new("2.1.5"),
            Release::new("2.1.3").prerelease(),
            Release::new("2.2.0"),
        ];
        assert_eq!(resolve_version("2.1.*", &catalog).unwrap(), "2.1.5");
    }

    #[test]
    fn test_major_picks_greatest_minor() {
        let catalog = releases(&["3.0.1", "3.2.0", "4.0.0"]);
        assert_eq!(resolve_version("3.*.*", &catalog).unwrap(), "3.2.0");
    }

    #[test]
    fn test_any_picks_greatest_overall() {
        let catalog = vec![
            Release::new("1.0.9"),
            Release::new("9.9.9"),
            Release::new("10.0.0"),
            Release::new("11.0.0").draft(),
        ];
        assert_eq!(resolve_version("*", &catalog).unwrap(), "10.0.0");
    }

    #[test]
    fn test_exact_passes_through_without_catalog() {
        assert_eq!(resolve_version("1.2.3", &[]).unwrap(), "1.2.3");
    }

    #[test]
    fn test_no_match_for_missing_major() {
        let catalog = releases(&["1.0.0", "4.5.6", "50.0.0"]);
        let err = resolve_version("5.*.*", &catalog).unwrap_err();
        assert!(matches!(err, Error::NoMatch { pattern } if pattern == "5.*.*"));
    }

    #[test]
    fn test_prefix_requires_dot_boundary() {
        let catalog = releases(&["21.0.0", "2.0.1"]);
        assert_eq!(resolve_version("2.*.*", &catalog).unwrap(), "2.0.1");

        let catalog = releases(&["1.10.4", "1.1.2"]);
        assert_eq!(resolve_version("1.1.*", &catalog).unwrap(), "1.1.2");
    }

    #[test]
    fn test_drafts_and_prereleases_never_selected() {
        let catalog = vec![
            Release::new("1.0.0").draft(),
            Release::new("1.0.1").prerelease(),
        ];
        assert!(matches!(
            resolve_version("*", &catalog),
            Err(Error::NoMatch { .. })
        ));
    }

    #[test]
    fn test_empty_catalog_is_no_match() {
        assert!(matches!(
            resolve_version("1.0.*", &[]),
            Err(Error::NoMatch { .. })
        ));
    }

    #[test]
    fn test_ties_keep_first_encountered() {
        // "1.2" and "1.2.0" compare equal; the first one in catalog order wins.
        let catalog = releases(&["1.2", "1.2.0"]);
        assert_eq!(resolve_version("1.*.*", &catalog).unwrap(), "1.2");

        let catalog = releases(&["1.2.0", "1.2"]);
        assert_eq!(resolve_version("1.*.*", &catalog).unwrap(), "1.2.0");
    }

    #[test]
    fn test_catalog_order_does_not_matter_for_distinct_tags() {
        let forward = releases(&["1.0.1", "1.0.10", "1.0.2"]);
        let mut backward = forward.clone();
        backward.reverse();
        assert_eq!(resolve_version("1.0.*", &forward).unwrap(), "1.0.10");
        assert_eq!(resolve_version("1.0.*", &backward).unwrap(), "1.0.10");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let catalog = releases(&["1.0.80", "1.0.87", "1.0.9"]);
        let pattern = VersionPattern::parse("1.0.*").unwrap();
        assert_eq!(
            pattern.resolve(&catalog).unwrap(),
            pattern.resolve(&catalog).unwrap()
        );
    }

    #[test]
    fn test_compare_numeric_not_lexicographic() {
        assert_eq!(compare_tags("10.0.0", "9.9.9"), Ordering::Greater);
        assert_eq!(compare_tags("1.0.9", "1.0.10"), Ordering::Less);
        assert_eq!(compare_tags("2.1.5", "2.1.5"), Ordering::Equal);
    }

    #[test]
    fn test_compare_missing_segments_are_zero() {
        assert_eq!(compare_tags("1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare_tags("1.2", "1.2.1"), Ordering::Less);
        assert_eq!(compare_tags("1.3", "1.2.9"), Ordering::Greater);
    }

    #[test]
    fn test_compare_non_numeric_segment_is_zero() {
        assert_eq!(compare_tags("1.0.rc", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_tags("1.0.rc", "1.0.1"), Ordering::Less);
    }

    #[test]
    fn test_compare_leading_zeros() {
        assert_eq!(compare_tags("1.01.0", "1.1.0"), Ordering::Equal);
        assert_eq!(compare_tags("1.0.010", "1.0.9"), Ordering::Greater);
    }

    #[test]
    fn test_compare_segments_beyond_u64() {
        assert_eq!(
            compare_tags("1.0.99999999999999999999", "1.0.5"),
            Ordering::Greater
        );
        let catalog = vec![Release::new("1.0.5"), Release::new("1.0.99999999999999999999")];
        assert_eq!(
            resolve_version("1.0.*", &catalog).unwrap(),
            "1.0.99999999999999999999"
        );
    }

    #[test]
    fn test_matches_checks_eligibility() {
        let pattern = VersionPattern::Any;
        assert!(pattern.matches(&Release::new("1.0.0")));
        assert!(!pattern.matches(&Release::new("1.0.0").draft()));
    }

    #[test]
    fn test_is_wildcard() {
        assert!(is_wildcard("1.*.*"));
        assert!(!is_wildcard("1.2.3"));
        assert!(VersionPattern::Any.is_wildcard());
        assert!(!VersionPattern::Exact("1.2.3".into()).is_wildcard());
    }

    #[test]
    fn test_from_str() {
        let pattern: VersionPattern = "4.2.*".parse().unwrap();
        assert!(matches!(pattern, VersionPattern::MajorMinor { .. }));
    }
}
