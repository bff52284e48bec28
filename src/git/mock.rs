use crate::domain::CommitRecord;
use crate::error::{ReleaseBumpError, Result};
use crate::git::CommitSource;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mock repository for testing without actual git operations.
///
/// Commits form a single linear history in insertion order. A tag marks the
/// commit that was last added when the tag was created.
#[derive(Debug, Default)]
pub struct MockRepository {
    commits: Vec<(CommitRecord, Vec<PathBuf>)>,
    tags: HashMap<String, usize>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a commit record touching no particular path
    pub fn add_commit(&mut self, commit: CommitRecord) {
        self.commits.push((commit, Vec::new()));
    }

    /// Append a commit record touching the given paths
    pub fn add_commit_touching(&mut self, commit: CommitRecord, paths: &[&str]) {
        self.commits
            .push((commit, paths.iter().map(PathBuf::from).collect()));
    }

    /// Tag the most recently added commit
    pub fn add_tag(&mut self, name: impl Into<String>) {
        let position = self.commits.len();
        self.tags.insert(name.into(), position);
    }

    /// Builder form of [`MockRepository::add_commit`] taking a subject line
    pub fn with_commit(mut self, subject: &str) -> Self {
        self.add_commit(CommitRecord::from_subject(subject));
        self
    }

    /// Builder form of [`MockRepository::add_tag`]
    pub fn with_tag(mut self, name: &str) -> Self {
        self.add_tag(name);
        self
    }
}

impl CommitSource for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.keys().cloned().collect())
    }

    fn commits_since(&self, since_tag: Option<&str>, path: Option<&Path>) -> Result<Vec<CommitRecord>> {
        let start = match since_tag {
            Some(tag) => *self.tags.get(tag).ok_or_else(|| {
                ReleaseBumpError::Git(git2::Error::from_str(&format!("tag not found: {}", tag)))
            })?,
            None => 0,
        };

        Ok(self.commits[start..]
            .iter()
            .filter(|(_, touched)| match path {
                Some(path) => touched.iter().any(|p| p.starts_with(path)),
                None => true,
            })
            .map(|(commit, _)| commit.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_tags() {
        let repo = MockRepository::new()
            .with_commit("chore: init")
            .with_tag("v1.0.0");

        assert_eq!(repo.list_tags().unwrap(), vec!["v1.0.0".to_string()]);
    }

    #[test]
    fn test_mock_commits_since_tag() {
        let repo = MockRepository::new()
            .with_commit("chore: init")
            .with_tag("v1.0.0")
            .with_commit("feat: one")
            .with_commit("fix: two");

        let since = repo.commits_since(Some("v1.0.0"), None).unwrap();
        let subjects: Vec<&str> = since.iter().map(|c| c.subject.as_str()).collect();
        assert_eq!(subjects, vec!["feat: one", "fix: two"]);
        assert_eq!(repo.commits_since(None, None).unwrap().len(), 3);
    }

    #[test]
    fn test_mock_path_filter() {
        let mut repo = MockRepository::new();
        repo.add_commit_touching(CommitRecord::from_subject("feat: q"), &["queue/src/lib.rs"]);
        repo.add_commit_touching(CommitRecord::from_subject("fix: s"), &["streams/src/lib.rs"]);

        let commits = repo.commits_since(None, Some(Path::new("queue"))).unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].subject, "feat: q");
    }
}
