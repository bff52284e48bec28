use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use release_bump::boundary::BoundaryWarning;
use release_bump::cli::{
    run_bump, run_changelog, BumpArgs, BumpOutcome, ChangelogArgs, ChangelogOutcome, History,
};
use release_bump::config::{self, Config};
use release_bump::domain::{BumpLevel, ReleaseScope};
use release_bump::git::{CommitSource, Git2Repository, Unavailable};
use release_bump::ui;

#[derive(clap::Parser)]
#[command(
    name = "release-bump",
    about = "Compute semantic version bumps and changelogs from conventional commits"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Print version information")]
    version: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the next version from commits since the last release
    Bump {
        #[arg(long = "crate", value_name = "NAME", help = "Crate directory to release")]
        krate: Option<String>,

        #[arg(long, help = "Release the whole workspace")]
        workspace: bool,

        #[arg(long, help = "Write the new version into Cargo.toml")]
        apply: bool,

        #[arg(
            long,
            value_name = "LEVEL",
            value_parser = ["major", "minor", "patch"],
            help = "Force a bump level instead of the computed one"
        )]
        bump: Option<String>,

        #[arg(long, default_value = ".", help = "Workspace root")]
        root: PathBuf,
    },

    /// Render the changelog section for a release
    Changelog {
        #[arg(long = "crate", value_name = "NAME", help = "Crate directory to release")]
        krate: Option<String>,

        #[arg(long, help = "Release the whole workspace")]
        workspace: bool,

        #[arg(long, value_name = "VERSION", help = "Version of the new section")]
        version: String,

        #[arg(long, help = "Print the rendered section")]
        preview: bool,

        #[arg(long, help = "Insert the section into CHANGELOG.md")]
        update: bool,

        #[arg(long, default_value = ".", help = "Workspace root")]
        root: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    if args.version {
        println!("release-bump {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let Some(command) = args.command else {
        Args::command().print_help()?;
        anyhow::bail!("a subcommand is required");
    };

    let config =
        config::load_config(args.config.as_deref()).context("Error loading config")?;

    match command {
        Command::Bump {
            krate,
            workspace,
            apply,
            bump,
            root,
        } => {
            let forced = bump.map(|level| level.parse::<BumpLevel>()).transpose()?;
            let args = BumpArgs {
                crate_name: krate,
                workspace,
                apply,
                forced,
                root,
            };
            bump_command(&args, &config)
        }
        Command::Changelog {
            krate,
            workspace,
            version,
            preview,
            update,
            root,
        } => {
            let args = ChangelogArgs {
                crate_name: krate,
                workspace,
                version,
                preview,
                update,
                root,
            };
            changelog_command(&args, &config)
        }
    }
}

/// Open the repository at `root`, or a source that reports why it could not be opened
fn open_history(root: &Path) -> Box<dyn CommitSource> {
    match Git2Repository::open(root) {
        Ok(repo) => Box::new(repo),
        Err(e) => {
            warn!(root = %root.display(), error = %e, "no git repository");
            Box::new(Unavailable::new(e.to_string()))
        }
    }
}

fn display_warnings(history: &History) {
    for warning in &history.warnings {
        if !matches!(warning, BoundaryWarning::NothingToBump { .. }) {
            ui::display_boundary_warning(warning);
        }
    }
}

/// Path shown to the user, relative to the workspace root when possible
fn shown(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

fn changelog_hint(scope: &ReleaseScope, config: &Config) -> String {
    match scope.crate_name() {
        Some(name) => format!("{}/{}", name, config.changelog.file_name),
        None => config.changelog.file_name.clone(),
    }
}

fn bump_command(args: &BumpArgs, config: &Config) -> Result<()> {
    let source = open_history(&args.root);

    let plan = match run_bump(args, config, source.as_ref())? {
        BumpOutcome::NothingToDo(history) => {
            display_warnings(&history);
            ui::display_status("Nothing to release");
            return Ok(());
        }
        BumpOutcome::Planned(plan) => plan,
    };

    display_warnings(&plan.history);
    if let Some(tag) = &plan.history.release_point {
        ui::display_status(&format!("Changes since {}", tag));
    }
    ui::display_breakdown(&plan.report.breakdown, &config.display);
    ui::display_version_change(&plan.report);

    if !plan.report.needs_bump() {
        ui::display_no_bump_needed(&plan.report.current.to_string());
        return Ok(());
    }

    let manifest = shown(&plan.manifest, &args.root);
    if plan.applied {
        ui::display_success(&format!("Updated {} to {}", manifest, plan.report.next));
    }

    let changelog = changelog_hint(&plan.history.scope, config);
    ui::display_next_steps(&ui::NextSteps {
        label: plan.history.scope.label(),
        manifest: &manifest,
        changelog: &changelog,
        version: plan.report.next.to_string(),
        tag: &plan.next_tag,
        applied: plan.applied,
    });

    Ok(())
}

fn changelog_command(args: &ChangelogArgs, config: &Config) -> Result<()> {
    let source = open_history(&args.root);
    let today = chrono::Local::now().date_naive();

    let plan = match run_changelog(args, config, source.as_ref(), today)? {
        ChangelogOutcome::NothingToDo(history) => {
            display_warnings(&history);
            ui::display_status("Nothing to add to the changelog");
            return Ok(());
        }
        ChangelogOutcome::Generated(plan) => plan,
    };

    display_warnings(&plan.history);
    let path = shown(&plan.path, &args.root);

    if args.preview || !args.update {
        ui::display_changelog_preview(&path, &plan.section);
    }

    if plan.written {
        ui::display_success(&format!("Added {} to {}", plan.version, path));
    } else {
        ui::display_status(&format!("Re-run with --update to write {}", path));
    }

    Ok(())
}
