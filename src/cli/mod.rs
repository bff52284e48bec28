//! Command-line workflows, independent of argument parsing

pub mod orchestration;

pub use orchestration::{
    collect_history, resolve_scope, run_bump, run_changelog, scope_dir, scope_manifest, BumpArgs,
    BumpOutcome, BumpPlan, ChangelogArgs, ChangelogOutcome, ChangelogPlan, History,
};
