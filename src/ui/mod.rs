//! User interface module - console output for the bump and changelog commands.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions and the color palette
//! - This module - Printing formatted output to the terminal

pub mod formatter;

use crate::analyzer::BumpReport;
use crate::classifier::Classification;
use crate::config::DisplayConfig;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_status, display_success,
    format_boundary_warning, format_breakdown, format_changelog_preview, format_next_steps,
    format_no_bump_needed, format_version_change, NextSteps,
};

/// Print the per-category commit breakdown
pub fn display_breakdown(classification: &Classification, display: &DisplayConfig) {
    println!("\n{}", format_breakdown(classification, display));
}

/// Print the version change block of a bump report
pub fn display_version_change(report: &BumpReport) {
    println!("{}", format_version_change(report));
}

pub fn display_no_bump_needed(current: &str) {
    println!("{}", format_no_bump_needed(current));
}

/// Print the commands to run after a bump
pub fn display_next_steps(steps: &NextSteps<'_>) {
    println!("\n{}", format_next_steps(steps));
}

pub fn display_changelog_preview(path: &str, section: &str) {
    println!("\n{}", format_changelog_preview(path, section));
}
