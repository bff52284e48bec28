use std::fmt;

/// Warnings that occur when a release is computed near history boundaries.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No commits since the last release point
    NoCommitsSinceRelease { release_point: Option<String> },
    /// No release tag exists, the whole history is analyzed
    NoReleasePoint { scope: String },
    /// History could not be read and was treated as empty
    HistoryUnavailable { reason: String },
    /// Commits exist but none requires a version bump
    NothingToBump { commits: usize },
    /// A requested version lost its pre-release or build suffix
    VersionSuffixDropped { input: String, version: String },
    /// The changelog already has a section for the version being rendered
    ReleaseAlreadyDocumented { version: String, path: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoCommitsSinceRelease { release_point } => match release_point {
                Some(tag) => write!(f, "No commits found since release '{}'", tag),
                None => write!(f, "No commits found in history"),
            },
            BoundaryWarning::NoReleasePoint { scope } => {
                write!(
                    f,
                    "No release tag found for {}, analyzing the entire history",
                    scope
                )
            }
            BoundaryWarning::HistoryUnavailable { reason } => {
                write!(f, "Could not read commit history: {}", reason)
            }
            BoundaryWarning::NothingToBump { commits } => {
                write!(
                    f,
                    "No version bump needed: none of {} commit(s) is a feature, fix or breaking change",
                    commits
                )
            }
            BoundaryWarning::VersionSuffixDropped { input, version } => {
                write!(
                    f,
                    "Version '{}' is recorded as {}: pre-release and build suffixes are not kept",
                    input, version
                )
            }
            BoundaryWarning::ReleaseAlreadyDocumented { version, path } => {
                write!(f, "{} already has a section for {}", path, version)
            }
        }
    }
}

impl BoundaryWarning {
    /// Whether the warning ends the workflow with nothing to do
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BoundaryWarning::NoCommitsSinceRelease { .. } | BoundaryWarning::NothingToBump { .. }
        )
    }
}
