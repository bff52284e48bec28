// tests/integration_test.rs
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use git2::{Commit, Repository, Signature};
use release_bump::changelog::{insert_section, ChangelogDocument};
use release_bump::classifier::{Classifier, RuleSet};
use release_bump::domain::{CommitRecord, SemanticVersion};
use release_bump::manifest;
use tempfile::TempDir;

fn release_bump(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_release-bump"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    console::strip_ansi_codes(&String::from_utf8_lossy(&output.stdout)).into_owned()
}

fn commit_file(repo: &Repository, dir: &Path, file: &str, contents: &str, message: &str) {
    let full = dir.join(file);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(&full, contents).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(file)).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = Signature::now("Test User", "test@example.com").unwrap();

    let parents: Vec<Commit<'_>> = repo
        .head()
        .ok()
        .and_then(|h| h.peel_to_commit().ok())
        .into_iter()
        .collect();
    let parent_refs: Vec<&Commit<'_>> = parents.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .unwrap();
}

fn tag_head(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.tag_lightweight(name, head.as_object(), false).unwrap();
}

/// A workspace with one `queue` crate released as `queue/v0.1.0`
fn released_workspace() -> (TempDir, Repository) {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();

    commit_file(
        &repo,
        dir.path(),
        "Cargo.toml",
        "[workspace]\nmembers = [\"queue\"]\n\n[workspace.package]\nversion = \"1.0.0\"\n",
        "chore: workspace setup",
    );
    commit_file(
        &repo,
        dir.path(),
        "queue/Cargo.toml",
        "[package]\nname = \"queue\"\nversion = \"0.1.0\"\nedition = \"2021\"\n",
        "feat(queue): initial queue",
    );
    tag_head(&repo, "queue/v0.1.0");
    tag_head(&repo, "v1.0.0");

    (dir, repo)
}

#[test]
fn test_release_bump_help() {
    let dir = TempDir::new().unwrap();
    let output = release_bump(dir.path(), &["--help"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("release-bump"));
    assert!(out.contains("conventional commits"));
    assert!(out.contains("bump"));
    assert!(out.contains("changelog"));
}

#[test]
fn test_release_bump_version() {
    let dir = TempDir::new().unwrap();
    let output = release_bump(dir.path(), &["-v"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        format!("release-bump {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_missing_scope_exits_with_error() {
    let (dir, _repo) = released_workspace();
    let output = release_bump(dir.path(), &["bump", "--root", "."]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--workspace"));
}

#[test]
fn test_bump_crate_apply() {
    let (dir, repo) = released_workspace();
    commit_file(
        &repo,
        dir.path(),
        "queue/src/lib.rs",
        "pub fn push() {}\n",
        "feat(queue): add push",
    );
    commit_file(
        &repo,
        dir.path(),
        "README.md",
        "# workspace\n",
        "fix: readme typo",
    );

    let output = release_bump(dir.path(), &["bump", "--crate", "queue", "--apply"]);
    assert!(output.status.success(), "{:?}", output);

    let out = stdout(&output);
    assert!(out.contains("Changes since queue/v0.1.0"));
    assert!(out.contains("Analyzed 1 commit(s):"));
    assert!(out.contains("Current: 0.1.0"));
    assert!(out.contains("New:     0.2.0"));
    assert!(out.contains("git tag queue/v0.2.0"));
    assert_eq!(
        manifest::read_version(&dir.path().join("queue/Cargo.toml")).unwrap(),
        "0.2.0"
    );
}

#[test]
fn test_bump_with_nothing_new_is_success() {
    let (dir, _repo) = released_workspace();
    let output = release_bump(dir.path(), &["bump", "--workspace"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Nothing to release"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No commits found since release 'v1.0.0'"));
}

#[test]
fn test_changelog_update_writes_parsable_section() {
    let (dir, repo) = released_workspace();
    commit_file(&repo, dir.path(), "src/a.rs", "a\n", "feat: add a");
    commit_file(&repo, dir.path(), "src/b.rs", "b\n", "fix(core): handle b");
    commit_file(&repo, dir.path(), "src/c.rs", "c\n", "chore: tidy");

    let output = release_bump(
        dir.path(),
        &["changelog", "--workspace", "--version", "v1.1.0", "--update"],
    );
    assert!(output.status.success(), "{:?}", output);
    assert!(stdout(&output).contains("Added 1.1.0 to CHANGELOG.md"));

    let text = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    let doc = ChangelogDocument::parse(&text);
    let section = doc.latest().unwrap();
    assert_eq!(section.version, "1.1.0");

    let titles: Vec<&str> = section.groups.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, vec!["✨ Features", "🐛 Bug Fixes"]);
    let lines: Vec<&str> = section.lines().collect();
    assert!(lines[0].starts_with("- add a (["));
    assert!(lines[1].starts_with("- handle b (["));
    assert!(!text.contains("tidy"));
}

#[test]
fn test_changelog_preview_does_not_write() {
    let (dir, repo) = released_workspace();
    commit_file(&repo, dir.path(), "queue/src/lib.rs", "x\n", "perf(queue): faster pop");

    let output = release_bump(
        dir.path(),
        &["changelog", "--crate", "queue", "--version", "0.1.1"],
    );
    assert!(output.status.success(), "{:?}", output);

    let out = stdout(&output);
    assert!(out.contains("Changelog preview for queue/CHANGELOG.md:"));
    assert!(out.contains("### 🚀 Performance"));
    assert!(out.contains("- faster pop"));
    assert!(!dir.path().join("queue/CHANGELOG.md").exists());
}

#[test]
fn test_changelog_sections_stack_newest_first() {
    let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let classifier = Classifier::new(RuleSet::Full);

    let first = release_bump::changelog::assemble(
        &SemanticVersion::new(1, 0, 0),
        date,
        &classifier.partition(&[CommitRecord::from_subject("feat: first")]),
    );
    let second = release_bump::changelog::assemble(
        &SemanticVersion::new(1, 0, 1),
        date,
        &classifier.partition(&[CommitRecord::from_subject("fix: second")]),
    );

    let text = insert_section(None, &first);
    let text = insert_section(Some(&text), &second);

    let doc = ChangelogDocument::parse(&text);
    let versions: Vec<&str> = doc.sections.iter().map(|s| s.version.as_str()).collect();
    assert_eq!(versions, vec!["1.0.1", "1.0.0"]);
    assert_eq!(doc.find("1.0.0").unwrap().date.as_deref(), Some("2024-06-01"));
    assert_eq!(doc.find("1.0.1").unwrap().lines().collect::<Vec<_>>(), vec!["- second"]);
}

#[test]
fn test_changelog_round_trip_keeps_every_line() {
    let date = chrono::NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
    let commits = vec![
        CommitRecord::from_subject("feat(api)!: drop v1 endpoints").with_hash("1111111aaaa"),
        CommitRecord::from_subject("feat: add batching").with_hash("2222222bbbb"),
        CommitRecord::from_subject("fix: handle empty queue").with_hash("3333333cccc"),
        CommitRecord::from_subject("feat(cli): add --json").with_hash("4444444dddd"),
        CommitRecord::from_subject("docs: explain batching").with_hash("5555555eeee"),
        CommitRecord::from_subject("chore: bump deps").with_hash("6666666ffff"),
        CommitRecord::from_subject("fix(io): retry on EINTR"),
    ];
    let section = release_bump::changelog::assemble(
        &SemanticVersion::new(2, 0, 0),
        date,
        &Classifier::new(RuleSet::Full).partition(&commits),
    );

    let rendered: Vec<&str> = section.lines().filter(|l| l.starts_with("- ")).collect();
    assert_eq!(
        rendered,
        vec![
            "- drop v1 endpoints ([1111111](../../commit/1111111))",
            "- add batching ([2222222](../../commit/2222222))",
            "- add --json ([4444444](../../commit/4444444))",
            "- handle empty queue ([3333333](../../commit/3333333))",
            "- retry on EINTR",
            "- explain batching ([5555555](../../commit/5555555))",
        ]
    );

    let doc = ChangelogDocument::parse(&insert_section(None, &section));
    assert_eq!(doc.sections.len(), 1);
    let parsed = doc.latest().unwrap();
    assert_eq!(parsed.version, "2.0.0");
    assert_eq!(parsed.date.as_deref(), Some("2024-07-15"));

    let titles: Vec<&str> = parsed.groups.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["💥 Breaking Changes", "✨ Features", "🐛 Bug Fixes", "📚 Documentation"]
    );
    assert_eq!(parsed.lines().collect::<Vec<_>>(), rendered);
}

#[test]
fn test_changelog_without_cargo_manifest() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    commit_file(&repo, dir.path(), "docs/guide.md", "guide\n", "docs: write guide");

    let output = release_bump(
        dir.path(),
        &["changelog", "--workspace", "--version", "1.0.0", "--update"],
    );
    assert!(output.status.success(), "{:?}", output);
    assert!(dir.path().join("CHANGELOG.md").exists());

    let output = release_bump(
        dir.path(),
        &["changelog", "--crate", "docs", "--version", "1.0.0", "--update"],
    );
    assert!(output.status.success(), "{:?}", output);
    let text = fs::read_to_string(dir.path().join("docs/CHANGELOG.md")).unwrap();
    assert!(text.contains("- write guide ("));
}
