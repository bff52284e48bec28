//! Pure formatting functions for UI output.
//!
//! Every `format_*` function returns the text to show; the `display_*`
//! wrappers in this module and in [`super`] only print it. Colors come from
//! the static palette below and are dropped by `console` when the output is
//! not a terminal.

use console::{style, StyledObject};

use crate::analyzer::BumpReport;
use crate::boundary::BoundaryWarning;
use crate::classifier::Classification;
use crate::config::DisplayConfig;
use crate::domain::{BumpLevel, Category, CommitRecord};

mod palette {
    use super::*;

    pub fn heading<D>(text: D) -> StyledObject<D> {
        style(text).bold()
    }

    pub fn old<D>(text: D) -> StyledObject<D> {
        style(text).red()
    }

    pub fn new<D>(text: D) -> StyledObject<D> {
        style(text).green().bold()
    }

    pub fn command<D>(text: D) -> StyledObject<D> {
        style(text).cyan()
    }

    pub fn muted<D>(text: D) -> StyledObject<D> {
        style(text).dim()
    }

    pub fn category<D>(text: D, category: Category) -> StyledObject<D> {
        match category {
            Category::Breaking => style(text).red().bold(),
            Category::Feature => style(text).green(),
            Category::Fix => style(text).yellow(),
            _ => style(text).blue(),
        }
    }

    pub fn level<D>(text: D, level: BumpLevel) -> StyledObject<D> {
        match level {
            BumpLevel::Major => style(text).red().bold(),
            BumpLevel::Minor => style(text).green().bold(),
            BumpLevel::Patch => style(text).yellow().bold(),
            BumpLevel::None => style(text).dim(),
        }
    }
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

fn category_limit(category: Category, display: &DisplayConfig) -> usize {
    match category {
        Category::Breaking | Category::Feature | Category::Fix => display.breakdown_limit,
        _ => display.other_limit,
    }
}

fn breakdown_label(category: Category) -> &'static str {
    match category {
        Category::Breaking => "Breaking changes",
        Category::Feature => "Features",
        Category::Fix => "Bug fixes",
        Category::Performance => "Performance",
        Category::Refactor => "Refactoring",
        Category::Docs => "Documentation",
        Category::Test => "Tests",
        Category::Build => "Build",
        Category::Ci => "CI/CD",
        Category::Chore => "Chores",
        Category::Other => "Other changes",
    }
}

fn breakdown_line(commit: &CommitRecord) -> String {
    match commit.short_hash(7) {
        Some(hash) => format!("    - {} {}", palette::muted(hash), commit.subject),
        None => format!("    - {}", commit.subject),
    }
}

/// Format the per-category commit breakdown.
///
/// Breaking changes, features and fixes list up to `breakdown_limit`
/// commits, every other category up to `other_limit`. Hidden commits are
/// summarized as `... and N more`.
pub fn format_breakdown(classification: &Classification, display: &DisplayConfig) -> String {
    let mut out = format!(
        "{}\n",
        palette::heading(format!(
            "Analyzed {} commit(s):",
            classification.len()
        ))
    );

    for (category, commits) in classification.iter() {
        out.push_str(&format!(
            "  {} ({})\n",
            palette::category(breakdown_label(category), category),
            commits.len()
        ));

        let limit = category_limit(category, display);
        for commit in commits.iter().take(limit) {
            out.push_str(&breakdown_line(commit));
            out.push('\n');
        }
        if commits.len() > limit {
            out.push_str(&format!(
                "    {}\n",
                palette::muted(format!("... and {} more", commits.len() - limit))
            ));
        }
    }

    out
}

/// Format the current/new version block of a bump report
pub fn format_version_change(report: &BumpReport) -> String {
    let level = report.decision.effective();
    let mut bump = palette::level(level.as_str().to_uppercase(), level).to_string();
    if report.decision.is_forced() {
        bump.push_str(&format!(
            " {}",
            palette::muted(format!("(forced, commits suggest {})", report.decision.computed))
        ));
    }

    format!(
        "{}\n  Current: {}\n  New:     {}\n  Bump:    {}\n",
        palette::heading("Version change:"),
        palette::old(report.current),
        palette::new(report.next),
        bump
    )
}

/// Format the note shown when no bump is required
pub fn format_no_bump_needed(current: &str) -> String {
    format!(
        "{} No version bump needed, staying at {}",
        style("✓").green(),
        palette::heading(current)
    )
}

/// Inputs for the post-bump hints
#[derive(Debug, Clone, PartialEq)]
pub struct NextSteps<'a> {
    pub label: &'a str,
    pub manifest: &'a str,
    pub changelog: &'a str,
    pub version: String,
    pub tag: &'a str,
    /// Whether the manifest was already rewritten
    pub applied: bool,
}

/// Format the commands to run after a version bump
pub fn format_next_steps(steps: &NextSteps<'_>) -> String {
    let mut lines: Vec<String> = Vec::new();

    if !steps.applied {
        lines.push(format!(
            "Re-run with {} to write {} to {}",
            palette::command("--apply"),
            steps.version,
            steps.manifest
        ));
    }
    lines.push(format!(
        "Review the change: {}",
        palette::command(format!("git diff {}", steps.manifest))
    ));
    lines.push(format!("Update {} with the release notes", steps.changelog));
    lines.push(format!(
        "Commit: {}",
        palette::command(format!(
            "git commit -am \"release({}): bump to v{}\"",
            steps.label, steps.version
        ))
    ));
    lines.push(format!(
        "Tag: {}",
        palette::command(format!("git tag {}", steps.tag))
    ));
    lines.push(format!(
        "Push: {}",
        palette::command(format!("git push && git push origin {}", steps.tag))
    ));

    let mut out = format!("{}\n", palette::heading("Next steps:"));
    for (i, line) in lines.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, line));
    }
    out
}

/// Frame a rendered changelog section for preview
pub fn format_changelog_preview(path: &str, section: &str) -> String {
    let rule = palette::muted("─".repeat(60));
    format!(
        "{}\n{}\n{}{}\n",
        palette::heading(format!("Changelog preview for {}:", path)),
        rule,
        section,
        rule
    )
}

/// Format a boundary warning with a yellow marker
pub fn format_boundary_warning(warning: &BoundaryWarning) -> String {
    format!("{} {}", style("⚠ WARNING:").yellow(), warning)
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{}", format_boundary_warning(warning));
}
