use crate::domain::SemanticVersion;
use crate::error::{ReleaseBumpError, Result};
use std::cmp::Ordering;

/// Tag naming pattern (e.g., "v{version}", "{crate}/v{version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    pub pattern: String,
}

impl TagPattern {
    /// Create a new tag pattern
    pub fn new(pattern: impl Into<String>) -> Self {
        TagPattern {
            pattern: pattern.into(),
        }
    }

    /// Substitute the crate name, leaving `{version}` in place
    pub fn for_crate(&self, crate_name: &str) -> Self {
        TagPattern::new(self.pattern.replace("{crate}", crate_name))
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version="1.2.3" -> "v1.2.3"
    pub fn format(&self, version: &SemanticVersion) -> String {
        self.pattern.replace("{version}", &version.to_string())
    }

    /// Literal text around the `{version}` placeholder
    fn affixes(&self) -> Result<(&str, &str)> {
        self.pattern.split_once("{version}").ok_or_else(|| {
            ReleaseBumpError::config(format!(
                "tag pattern '{}' must contain a {{version}} placeholder",
                self.pattern
            ))
        })
    }

    /// Whether `tag` has this pattern's shape, whatever its version text
    pub fn matches(&self, tag: &str) -> Result<bool> {
        let (prefix, suffix) = self.affixes()?;
        Ok(tag.len() >= prefix.len() + suffix.len()
            && tag.starts_with(prefix)
            && tag.ends_with(suffix))
    }

    /// Version encoded in a tag of this pattern, e.g. "release-{version}" on
    /// "release-1.2.3" -> 1.2.3
    pub fn version_of(&self, tag: &str) -> Option<semver::Version> {
        let (prefix, suffix) = self.affixes().ok()?;
        let text = tag.strip_prefix(prefix)?.strip_suffix(suffix)?;
        semver::Version::parse(text)
            .ok()
            .or_else(|| SemanticVersion::parse(text).ok().map(Into::into))
    }
}

/// What a release is cut for: one crate of the workspace, or the workspace itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseScope {
    Crate(String),
    Workspace,
}

impl ReleaseScope {
    pub fn crate_name(&self) -> Option<&str> {
        match self {
            ReleaseScope::Crate(name) => Some(name),
            ReleaseScope::Workspace => None,
        }
    }

    /// Human readable label used in summaries and commit messages
    pub fn label(&self) -> &str {
        self.crate_name().unwrap_or("workspace")
    }
}

/// Configured tag patterns for workspace and per-crate releases
#[derive(Debug, Clone)]
pub struct TagScheme {
    pub workspace: TagPattern,
    pub krate: TagPattern,
}

impl TagScheme {
    pub fn new(workspace: impl Into<String>, krate: impl Into<String>) -> Self {
        TagScheme {
            workspace: TagPattern::new(workspace),
            krate: TagPattern::new(krate),
        }
    }

    /// Tag name a new release of `scope` should receive
    pub fn tag_for(&self, scope: &ReleaseScope, version: &SemanticVersion) -> String {
        match scope {
            ReleaseScope::Crate(name) => self.krate.for_crate(name).format(version),
            ReleaseScope::Workspace => self.workspace.format(version),
        }
    }

    /// Find the newest tag marking the last release of `scope`.
    ///
    /// Crate releases look for tags of the crate pattern first and fall back
    /// to the newest workspace tag. Workspace tags match the workspace pattern
    /// and contain no `/` unless the pattern itself does. `None` means no
    /// release point exists and the whole history applies.
    pub fn find_release_point(&self, tags: &[String], scope: &ReleaseScope) -> Result<Option<String>> {
        if let ReleaseScope::Crate(name) = scope {
            let crate_pattern = self.krate.for_crate(name);
            if let Some(tag) = newest_tag(tags, &crate_pattern, |_| true)? {
                return Ok(Some(tag));
            }
        }

        let nested = self.workspace.pattern.contains('/');
        newest_tag(tags, &self.workspace, |tag| nested || !tag.contains('/'))
    }
}

/// Newest tag of `pattern` by embedded version.
///
/// Tags whose version text does not parse rank below every parsed one, in
/// reverse name order.
fn newest_tag(
    tags: &[String],
    pattern: &TagPattern,
    keep: impl Fn(&str) -> bool,
) -> Result<Option<String>> {
    let mut candidates: Vec<(Option<semver::Version>, &String)> = Vec::new();
    for tag in tags {
        if pattern.matches(tag)? && keep(tag) {
            candidates.push((pattern.version_of(tag), tag));
        }
    }

    candidates.sort_by(|(va, a), (vb, b)| match (va, vb) {
        (Some(va), Some(vb)) => vb.cmp(va).then_with(|| b.cmp(a)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.cmp(a),
    });

    Ok(candidates.first().map(|(_, tag)| (*tag).clone()))
}

impl Default for TagScheme {
    fn default() -> Self {
        TagScheme::new("v{version}", "{crate}/v{version}")
    }
}
