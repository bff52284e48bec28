//! Commit history abstraction layer
//!
//! The engine never talks to git directly: it consumes [`CommitRecord`]s
//! handed over by a [`CommitSource`]. The concrete implementations include:
//!
//! - [repository::Git2Repository]: reads a real repository through `git2`
//! - [mock::MockRepository]: an in-memory history for tests
//! - [Unavailable]: stands in when no repository could be opened
//!
//! # Usage
//!
//! ```rust
//! # use release_bump::git::{CommitSource, MockRepository};
//! # fn example() -> release_bump::Result<()> {
//! let repo = MockRepository::new().with_commit("feat: first").with_tag("v0.1.0");
//! let commits = repo.commits_since(Some("v0.1.0"), None)?;
//! assert!(commits.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::CommitRecord;
use crate::error::{ReleaseBumpError, Result};
use std::path::Path;

/// Source of tags and commit history
pub trait CommitSource {
    /// All tag names in the repository, in no particular order
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Commits reachable from HEAD but not from `since_tag`, oldest first.
    ///
    /// With `since_tag = None` the whole history is returned. When `path` is
    /// given, only commits touching that path are kept.
    fn commits_since(&self, since_tag: Option<&str>, path: Option<&Path>) -> Result<Vec<CommitRecord>>;
}

/// History source used when the repository cannot be opened.
///
/// Every call fails with the original reason; workflows treat that as an
/// empty history.
#[derive(Debug, Clone)]
pub struct Unavailable {
    reason: String,
}

impl Unavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Unavailable {
            reason: reason.into(),
        }
    }

    fn error(&self) -> ReleaseBumpError {
        ReleaseBumpError::Git(git2::Error::from_str(&self.reason))
    }
}

impl CommitSource for Unavailable {
    fn list_tags(&self) -> Result<Vec<String>> {
        Err(self.error())
    }

    fn commits_since(&self, _since_tag: Option<&str>, _path: Option<&Path>) -> Result<Vec<CommitRecord>> {
        Err(self.error())
    }
}
