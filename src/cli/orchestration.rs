//! Main workflow orchestration logic
//!
//! The bump and changelog workflows live here rather than in main.rs so they
//! can run against any [`CommitSource`] and be exercised without a terminal.
//! Nothing in this module prints; results come back as outcome values that
//! the binary renders through [`crate::ui`].

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::analyzer::{BumpReport, VersionAnalyzer};
use crate::boundary::BoundaryWarning;
use crate::changelog::{
    plan_insertion, update_changelog_file, ChangelogDocument, ChangelogRenderer, Insertion,
};
use crate::classifier::{Classification, Classifier, RuleSet};
use crate::config::Config;
use crate::domain::{BumpLevel, CommitRecord, ReleaseScope, SemanticVersion};
use crate::error::{ReleaseBumpError, Result};
use crate::git::CommitSource;
use crate::manifest::{self, CARGO_MANIFEST};

/// Arguments for the bump workflow
///
/// Mirrors the CLI arguments but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpArgs {
    /// Crate directory name under `root`
    pub crate_name: Option<String>,

    /// Bump the workspace version instead of one crate
    pub workspace: bool,

    /// Write the new version into the manifest
    pub apply: bool,

    /// Override the computed bump level
    pub forced: Option<BumpLevel>,

    /// Workspace root
    pub root: PathBuf,
}

/// Arguments for the changelog workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ChangelogArgs {
    pub crate_name: Option<String>,
    pub workspace: bool,

    /// Version the new section is titled with
    pub version: String,

    /// Show the rendered section
    pub preview: bool,

    /// Merge the rendered section into the changelog file
    pub update: bool,

    pub root: PathBuf,
}

/// Pick the release scope from the mutually exclusive `--crate`/`--workspace` flags
pub fn resolve_scope(crate_name: Option<&str>, workspace: bool) -> Result<ReleaseScope> {
    match (crate_name, workspace) {
        (Some(_), true) => Err(ReleaseBumpError::usage(
            "--crate and --workspace cannot be used together",
        )),
        (None, false) => Err(ReleaseBumpError::usage(
            "either --crate NAME or --workspace is required",
        )),
        (Some(name), false) if name.trim().is_empty() => {
            Err(ReleaseBumpError::usage("crate name must not be empty"))
        }
        (Some(name), false) => Ok(ReleaseScope::Crate(name.to_string())),
        (None, true) => Ok(ReleaseScope::Workspace),
    }
}

/// Directory a scope lives in: `<root>/<crate>` or `<root>`
pub fn scope_dir(root: &Path, scope: &ReleaseScope) -> Result<PathBuf> {
    let dir = match scope {
        ReleaseScope::Crate(name) => root.join(name),
        ReleaseScope::Workspace => root.to_path_buf(),
    };

    if !dir.is_dir() {
        return Err(ReleaseBumpError::usage(format!(
            "directory not found: {}",
            dir.display()
        )));
    }
    Ok(dir)
}

/// Manifest of a scope, which must exist
pub fn scope_manifest(root: &Path, scope: &ReleaseScope) -> Result<PathBuf> {
    let manifest = scope_dir(root, scope)?.join(CARGO_MANIFEST);
    if !manifest.is_file() {
        return Err(ReleaseBumpError::usage(format!(
            "manifest not found: {}",
            manifest.display()
        )));
    }
    Ok(manifest)
}

/// Commits since the last release of a scope, plus what was noticed on the way
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    pub scope: ReleaseScope,
    pub release_point: Option<String>,
    pub commits: Vec<CommitRecord>,
    pub warnings: Vec<BoundaryWarning>,
}

impl History {
    /// Whether a terminal warning was raised while collecting
    pub fn nothing_to_do(&self) -> bool {
        self.warnings.iter().any(BoundaryWarning::is_terminal)
    }
}

/// Collect the commits since the last release of `scope`.
///
/// A source that fails is treated as an empty history with a
/// [`BoundaryWarning::HistoryUnavailable`] warning; only a malformed tag
/// pattern in the configuration is an error.
pub fn collect_history(
    source: &dyn CommitSource,
    config: &Config,
    scope: &ReleaseScope,
) -> Result<History> {
    let mut warnings = Vec::new();
    let scheme = config.tags.scheme();

    let tags = source.list_tags().unwrap_or_else(|e| {
        warn!(error = %e, "cannot list tags");
        warnings.push(BoundaryWarning::HistoryUnavailable {
            reason: e.to_string(),
        });
        Vec::new()
    });

    let release_point = scheme.find_release_point(&tags, scope)?;
    if release_point.is_none() && warnings.is_empty() {
        warnings.push(BoundaryWarning::NoReleasePoint {
            scope: scope.label().to_string(),
        });
    }

    let path = scope.crate_name().map(Path::new);
    let commits = match source.commits_since(release_point.as_deref(), path) {
        Ok(commits) => commits,
        Err(e) => {
            warn!(error = %e, "cannot read commit history, treating it as empty");
            if warnings.is_empty() {
                warnings.push(BoundaryWarning::HistoryUnavailable {
                    reason: e.to_string(),
                });
            }
            Vec::new()
        }
    };

    info!(
        scope = scope.label(),
        release_point = release_point.as_deref().unwrap_or("<none>"),
        commits = commits.len(),
        "collected history"
    );

    if commits.is_empty() {
        warnings.push(BoundaryWarning::NoCommitsSinceRelease {
            release_point: release_point.clone(),
        });
    }

    Ok(History {
        scope: scope.clone(),
        release_point,
        commits,
        warnings,
    })
}

/// A computed version bump
#[derive(Debug, Clone, PartialEq)]
pub struct BumpPlan {
    pub history: History,
    pub manifest: PathBuf,
    pub report: BumpReport,
    /// Tag the new release should receive
    pub next_tag: String,
    /// Whether the manifest was rewritten
    pub applied: bool,
}

/// Result of the bump workflow
#[derive(Debug, Clone, PartialEq)]
pub enum BumpOutcome {
    /// No commits since the last release
    NothingToDo(History),
    Planned(BumpPlan),
}

/// Compute the next version of a crate or the workspace and optionally write it.
///
/// When the commits call for no bump the plan is returned with
/// `applied == false` and a [`BoundaryWarning::NothingToBump`] warning, even
/// when `apply` was requested.
pub fn run_bump(args: &BumpArgs, config: &Config, source: &dyn CommitSource) -> Result<BumpOutcome> {
    let scope = resolve_scope(args.crate_name.as_deref(), args.workspace)?;
    let manifest_path = scope_manifest(&args.root, &scope)?;

    let mut history = collect_history(source, config, &scope)?;
    if history.nothing_to_do() {
        return Ok(BumpOutcome::NothingToDo(history));
    }

    let current = manifest::read_version(&manifest_path)?;
    let report = VersionAnalyzer::new().report(&current, &history.commits, args.forced)?;
    let next_tag = config.tags.scheme().tag_for(&scope, &report.next);

    debug!(
        computed = %report.decision.computed,
        effective = %report.decision.effective(),
        current = %report.current,
        next = %report.next,
        "bump decided"
    );

    let mut applied = false;
    if !report.needs_bump() {
        history.warnings.push(BoundaryWarning::NothingToBump {
            commits: history.commits.len(),
        });
    } else if args.apply {
        manifest::write_version(&manifest_path, &report.next)?;
        info!(manifest = %manifest_path.display(), version = %report.next, "manifest updated");
        applied = true;
    }

    Ok(BumpOutcome::Planned(BumpPlan {
        history,
        manifest: manifest_path,
        report,
        next_tag,
        applied,
    }))
}

/// A rendered changelog section
#[derive(Debug, Clone, PartialEq)]
pub struct ChangelogPlan {
    pub history: History,
    pub version: SemanticVersion,
    pub path: PathBuf,
    pub classification: Classification,
    pub section: String,
    /// Where the section goes in the current file
    pub insertion: Insertion,
    /// Whether the file was rewritten
    pub written: bool,
}

/// Result of the changelog workflow
#[derive(Debug, Clone, PartialEq)]
pub enum ChangelogOutcome {
    NothingToDo(History),
    Generated(ChangelogPlan),
}

/// Render the changelog section for `args.version` dated `today` and
/// optionally merge it into the scope's changelog file.
pub fn run_changelog(
    args: &ChangelogArgs,
    config: &Config,
    source: &dyn CommitSource,
    today: NaiveDate,
) -> Result<ChangelogOutcome> {
    let scope = resolve_scope(args.crate_name.as_deref(), args.workspace)?;
    let version = SemanticVersion::parse(&args.version)?;
    let path = scope_dir(&args.root, &scope)?.join(&config.changelog.file_name);

    let mut history = collect_history(source, config, &scope)?;
    if history.nothing_to_do() {
        return Ok(ChangelogOutcome::NothingToDo(history));
    }

    let normalized = version.to_string();
    if args.version != normalized && args.version != format!("v{}", normalized) {
        warn!(input = %args.version, version = %normalized, "version suffix dropped");
        history.warnings.push(BoundaryWarning::VersionSuffixDropped {
            input: args.version.clone(),
            version: normalized.clone(),
        });
    }

    let classification = Classifier::new(RuleSet::Full).partition(&history.commits);
    let section = ChangelogRenderer::new(config.changelog.render_options()).assemble(
        &version,
        today,
        &classification,
    );

    let existing = if path.exists() {
        Some(fs::read_to_string(&path)?)
    } else {
        None
    };
    let insertion = plan_insertion(existing.as_deref());

    if let Some(text) = existing.as_deref() {
        if ChangelogDocument::parse(text).find(&normalized).is_some() {
            history.warnings.push(BoundaryWarning::ReleaseAlreadyDocumented {
                version: normalized,
                path: path.display().to_string(),
            });
        }
    }

    let written = if args.update {
        update_changelog_file(&path, &section)?;
        info!(path = %path.display(), version = %version, "changelog updated");
        true
    } else {
        false
    };

    Ok(ChangelogOutcome::Generated(ChangelogPlan {
        history,
        version,
        path,
        classification,
        section,
        insertion,
        written,
    }))
}
