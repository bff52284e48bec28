use crate::classifier::Classification;
use crate::domain::{Category, CommitRecord, SemanticVersion};
use chrono::NaiveDate;

/// How commit references are rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Link target for a commit; `{hash}` is replaced by the short hash
    pub commit_url: String,
    pub short_hash_len: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            commit_url: "../../commit/{hash}".to_string(),
            short_hash_len: 7,
        }
    }
}

/// Renders release sections from classified commits
#[derive(Debug, Clone, Default)]
pub struct ChangelogRenderer {
    options: RenderOptions,
}

impl ChangelogRenderer {
    pub fn new(options: RenderOptions) -> Self {
        ChangelogRenderer { options }
    }

    /// Format a single commit as a Markdown list item (no trailing newline)
    pub fn format_commit_line(&self, commit: &CommitRecord) -> String {
        match commit.short_hash(self.options.short_hash_len) {
            Some(short) => format!(
                "- {} ([{}]({}))",
                commit.description(),
                short,
                self.options.commit_url.replace("{hash}", short)
            ),
            None => format!("- {}", commit.description()),
        }
    }

    /// Render the `## [version] - date` section for one release.
    ///
    /// Subsections follow [`Category::CHANGELOG_ORDER`]; empty buckets and the
    /// chore/other buckets produce nothing.
    pub fn assemble(
        &self,
        version: &SemanticVersion,
        date: NaiveDate,
        buckets: &Classification,
    ) -> String {
        let mut out = format!("## [{}] - {}\n\n", version, date.format("%Y-%m-%d"));

        for category in Category::CHANGELOG_ORDER {
            let commits = buckets.get(category);
            if commits.is_empty() {
                continue;
            }

            out.push_str(&format!("### {}\n\n", category.changelog_title()));
            for commit in commits {
                out.push_str(&self.format_commit_line(commit));
                out.push('\n');
            }
            out.push('\n');
        }

        out
    }
}

/// Render a release section with default options
pub fn assemble(version: &SemanticVersion, date: NaiveDate, buckets: &Classification) -> String {
    ChangelogRenderer::default().assemble(version, date, buckets)
}
