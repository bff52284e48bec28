use crate::error::{ReleaseBumpError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Semantic version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemanticVersion {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string such as "1.2.3" or "v1.2.3-rc.1".
    ///
    /// Only the leading `v?<major>.<minor>.<patch>` is read. Anything after it
    /// (pre-release or build metadata) is dropped.
    pub fn parse(input: &str) -> Result<Self> {
        static VERSION_RE: OnceLock<Regex> = OnceLock::new();
        let re = VERSION_RE
            .get_or_init(|| Regex::new(r"^v?(\d+)\.(\d+)\.(\d+)").expect("valid version regex"));

        let captures = re
            .captures(input)
            .ok_or_else(|| ReleaseBumpError::invalid_version(input))?;

        let component = |index: usize| -> Result<u64> {
            captures
                .get(index)
                .and_then(|m| m.as_str().parse::<u64>().ok())
                .ok_or_else(|| ReleaseBumpError::invalid_version(input))
        };

        Ok(SemanticVersion {
            major: component(1)?,
            minor: component(2)?,
            patch: component(3)?,
        })
    }

    /// Bump version according to the bump level.
    ///
    /// Fails when the incremented component does not fit in a `u64`.
    pub fn bump(&self, level: BumpLevel) -> Result<Self> {
        let next = |component: u64| {
            component
                .checked_add(1)
                .ok_or_else(|| ReleaseBumpError::VersionOverflow(self.to_string()))
        };

        Ok(match level {
            BumpLevel::Major => SemanticVersion::new(next(self.major)?, 0, 0),
            BumpLevel::Minor => SemanticVersion::new(self.major, next(self.minor)?, 0),
            BumpLevel::Patch => SemanticVersion::new(self.major, self.minor, next(self.patch)?),
            BumpLevel::None => *self,
        })
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for SemanticVersion {
    type Err = ReleaseBumpError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

impl From<SemanticVersion> for semver::Version {
    fn from(version: SemanticVersion) -> Self {
        semver::Version::new(version.major, version.minor, version.patch)
    }
}

/// Version bump level, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum BumpLevel {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl BumpLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpLevel::None => "none",
            BumpLevel::Patch => "patch",
            BumpLevel::Minor => "minor",
            BumpLevel::Major => "major",
        }
    }
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpLevel {
    type Err = ReleaseBumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "major" => Ok(BumpLevel::Major),
            "minor" => Ok(BumpLevel::Minor),
            "patch" => Ok(BumpLevel::Patch),
            "none" => Ok(BumpLevel::None),
            other => Err(ReleaseBumpError::usage(format!(
                "unknown bump level '{}': expected major, minor, patch or none",
                other
            ))),
        }
    }
}

/// Parse `version` and apply `level` to it.
///
/// # Example
/// ```
/// use release_bump::domain::{apply_bump, BumpLevel, SemanticVersion};
///
/// assert_eq!(apply_bump("2.3.4", BumpLevel::Minor).unwrap(), SemanticVersion::new(2, 4, 0));
/// assert!(apply_bump("not-a-version", BumpLevel::Patch).is_err());
/// ```
pub fn apply_bump(version: &str, level: BumpLevel) -> Result<SemanticVersion> {
    SemanticVersion::parse(version)?.bump(level)
}
