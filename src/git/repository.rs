use crate::domain::CommitRecord;
use crate::error::{ReleaseBumpError, Result};
use chrono::{DateTime, NaiveDate};
use git2::{Commit, DiffOptions, Repository as Git2Repo, Sort};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Wrapper around git2::Repository implementing [`super::CommitSource`]
pub struct Git2Repository {
    repo: Git2Repo,
    /// Directory relative path filters are resolved against
    base: PathBuf,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path.as_ref())?;

        Ok(Git2Repository {
            repo,
            base: path.as_ref().to_path_buf(),
        })
    }

    /// Express `path` relative to the working directory, as git pathspecs expect
    fn pathspec(&self, path: &Path) -> Result<PathBuf> {
        let path = if path.is_relative() {
            self.base.join(path)
        } else {
            path.to_path_buf()
        };

        let workdir = self
            .repo
            .workdir()
            .ok_or_else(|| ReleaseBumpError::Git(git2::Error::from_str("bare repository")))?;
        let workdir = workdir.canonicalize()?;
        let path = path.canonicalize()?;

        path.strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .map_err(|_| {
                ReleaseBumpError::usage(format!(
                    "{} is outside the repository at {}",
                    path.display(),
                    workdir.display()
                ))
            })
    }

    /// Whether `commit` changes anything under `pathspec` relative to its first parent
    fn touches(&self, commit: &Commit<'_>, pathspec: &Path) -> Result<bool> {
        let tree = commit.tree()?;
        let parent_tree = match commit.parent(0) {
            Ok(parent) => Some(parent.tree()?),
            Err(_) => None,
        };

        let mut options = DiffOptions::new();
        options.pathspec(pathspec);

        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut options))?;
        Ok(diff.deltas().len() > 0)
    }

    fn to_record(commit: &Commit<'_>) -> CommitRecord {
        let author = commit.author();
        let when = commit.time();
        let local_seconds = when.seconds() + i64::from(when.offset_minutes()) * 60;
        let date = DateTime::from_timestamp(local_seconds, 0)
            .map(|dt| dt.date_naive())
            .unwrap_or(NaiveDate::MIN);

        CommitRecord::from_message(
            commit.id().to_string(),
            author.name().unwrap_or("unknown"),
            date,
            commit.message().unwrap_or(""),
        )
    }
}

impl super::CommitSource for Git2Repository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn commits_since(&self, since_tag: Option<&str>, path: Option<&Path>) -> Result<Vec<CommitRecord>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push_head()?;

        if let Some(tag) = since_tag {
            let tagged = self
                .repo
                .revparse_single(&format!("refs/tags/{}", tag))?
                .peel_to_commit()?;
            revwalk.hide(tagged.id())?;
        }

        let pathspec = path.map(|p| self.pathspec(p)).transpose()?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;

            if let Some(spec) = &pathspec {
                if !self.touches(&commit, spec)? {
                    continue;
                }
            }

            commits.push(Self::to_record(&commit));
        }

        debug!(
            tag = since_tag.unwrap_or("<none>"),
            count = commits.len(),
            "collected commits"
        );

        // Oldest first
        commits.reverse();
        Ok(commits)
    }
}
