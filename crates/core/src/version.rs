//! Semantic version gates for post-install actions.

use semver::Version;
use serde::{Deserialize, Serialize};

/// Parse a version tag leniently, tolerating one leading `v`.
///
/// Returns `None` when the remainder is not valid semver. Gating MUST
/// use semantic ordering rather than string comparison: lexically,
/// `"1.10.0"` sorts below `"1.9.0"`.
#[must_use]
pub fn parse_lenient(tag: &str) -> Option<Version> {
    Version::parse(tag.strip_prefix('v').unwrap_or(tag)).ok()
}

/// Predicate over a resolved version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionGate {
    /// Satisfied when the resolved version is strictly greater than
    /// the threshold.
    After(Version),
}

impl VersionGate {
    /// Gate on versions strictly newer than `threshold`.
    ///
    /// # Panics
    ///
    /// Panics when `threshold` is not valid semver. Gates are built
    /// from static catalog entries, so this is a programming error.
    #[must_use]
    #[allow(clippy::panic, clippy::expect_used)]
    pub fn after(threshold: &str) -> Self {
        Self::After(
            parse_lenient(threshold).expect("version gate threshold must be valid semver"),
        )
    }

    /// Evaluate the gate against a resolved version tag.
    ///
    /// A tag that does not parse as semver never satisfies the gate;
    /// the caller is expected to log that case.
    #[must_use]
    pub fn allows(&self, resolved: &str) -> bool {
        match self {
            Self::After(threshold) => {
                parse_lenient(resolved).is_some_and(|version| version > *threshold)
            }
        }
    }
}

impl std::fmt::Display for VersionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::After(threshold) => write!(f, "> {threshold}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient_strips_leading_v() {
        assert_eq!(parse_lenient("v1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(parse_lenient("1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(parse_lenient("nightly"), None);
    }

    #[test]
    fn test_gate_uses_semantic_ordering() {
        // Lexical comparison would wrongly rank 1.2.0 above 1.10.0.
        let gate = VersionGate::after("1.2.0");
        assert!(gate.allows("1.10.0"));
        assert!(gate.allows("v1.10.0"));
        assert!(!gate.allows("1.2.0"));
        assert!(!gate.allows("1.1.9"));
    }

    #[test]
    fn test_gate_is_strict() {
        let gate = VersionGate::after("v0.1.0");
        assert!(!gate.allows("v0.1.0"));
        assert!(gate.allows("v0.1.1"));
    }

    #[test]
    fn test_gate_rejects_unparseable_versions() {
        let gate = VersionGate::after("1.0.0");
        assert!(!gate.allows("latest"));
        assert!(!gate.allows(""));
    }

    #[test]
    fn test_gate_display() {
        assert_eq!(VersionGate::after("v1.2.0").to_string(), "> 1.2.0");
    }
}
