//! Tool versioning and the startup version gate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::RuntimeError;

/// A `major.minor.patch` version triple.
///
/// The running tool's version is the process-wide constant
/// [`Version::CURRENT`]. Compatibility against a caller-declared minimum
/// requires major and minor to match exactly and patch to be at least the
/// requested one.
///
/// # Examples
///
/// ```
/// use forgekit_runtime::Version;
///
/// let version: Version = "1.4.2".parse().unwrap();
/// assert_eq!(version, Version::new(1, 4, 2));
/// assert_eq!(version.to_string(), "1.4.2");
/// assert!(version.is_compatible_with(&Version::new(1, 4, 0)));
/// assert!(!version.is_compatible_with(&Version::new(1, 5, 0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Version {
    /// Major component.
    pub major: u32,
    /// Minor component.
    pub minor: u32,
    /// Patch component.
    pub patch: u32,
}

impl Version {
    /// The version of the running tool.
    ///
    /// Kept in lockstep with `CARGO_PKG_VERSION` by a unit test.
    pub const CURRENT: Version = Version::new(0, 1, 0);

    /// Creates a version triple.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Whether this version satisfies the given minimum: major and minor
    /// match exactly, patch is at least the requested one.
    pub fn is_compatible_with(&self, min: &Version) -> bool {
        self.major == min.major && self.minor == min.minor && self.patch >= min.patch
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Error parsing a `major.minor.patch` string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version `{0}`, expected MAJOR.MINOR.PATCH")]
pub struct ParseVersionError(pub String);

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.split('.');
        let mut component = || {
            parts
                .next()
                .and_then(|part| part.parse::<u32>().ok())
                .ok_or_else(|| ParseVersionError(raw.to_string()))
        };
        let major = component()?;
        let minor = component()?;
        let patch = component()?;
        if parts.next().is_some() {
            return Err(ParseVersionError(raw.to_string()));
        }
        Ok(Version::new(major, minor, patch))
    }
}

/// The startup version gate.
///
/// Embedders declare the minimum tool version they were written against;
/// anything below it is a hard stop with
/// [`RuntimeError::VersionMismatch`], never partial operation.
///
/// # Examples
///
/// ```
/// use forgekit_runtime::{Version, ensure};
///
/// assert!(ensure(Version::CURRENT).is_ok());
/// assert!(ensure(Version::new(99, 0, 0)).is_err());
/// ```
pub fn ensure(min: Version) -> crate::error::Result<()> {
    if Version::CURRENT.is_compatible_with(&min) {
        return Ok(());
    }
    Err(RuntimeError::VersionMismatch {
        required: min,
        running: Version::CURRENT,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_matches_package_version() {
        assert_eq!(Version::CURRENT.to_string(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_compatibility_requires_exact_major_minor() {
        let running = Version::new(1, 4, 2);
        assert!(running.is_compatible_with(&Version::new(1, 4, 2)));
        assert!(running.is_compatible_with(&Version::new(1, 4, 0)));
        assert!(!running.is_compatible_with(&Version::new(1, 4, 3)));
        assert!(!running.is_compatible_with(&Version::new(1, 3, 2)));
        assert!(!running.is_compatible_with(&Version::new(2, 4, 2)));
        assert!(!running.is_compatible_with(&Version::new(0, 4, 2)));
    }

    #[test]
    fn test_ensure_reports_both_versions() {
        let err = ensure(Version::new(9, 9, 9)).unwrap_err();
        match err {
            RuntimeError::VersionMismatch { required, running } => {
                assert_eq!(required, Version::new(9, 9, 9));
                assert_eq!(running, Version::CURRENT);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_round_trip() {
        let version: Version = "12.0.34".parse().unwrap();
        assert_eq!(version, Version::new(12, 0, 34));
        assert_eq!(version.to_string(), "12.0.34");
    }

    #[test]
    fn test_parse_rejects_malformed_strings() {
        assert!("1.2".parse::<Version>().is_err());
        assert!("1.2.3.4".parse::<Version>().is_err());
        assert!("1.2.x".parse::<Version>().is_err());
        assert!("".parse::<Version>().is_err());
    }
}
