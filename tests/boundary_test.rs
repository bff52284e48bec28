use release_bump::boundary::BoundaryWarning;
use release_bump::ui;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_no_commits_since_release_display() {
    let warning = BoundaryWarning::NoCommitsSinceRelease {
        release_point: Some("queue/v0.3.1".to_string()),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("No commits found since release"),
        "Message should mention missing commits, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("queue/v0.3.1"),
        "Message should contain the release tag, got: {}",
        display_msg
    );
}

#[test]
fn test_no_commits_without_release_point_display() {
    let warning = BoundaryWarning::NoCommitsSinceRelease {
        release_point: None,
    };
    assert_eq!(warning.to_string(), "No commits found in history");
}

#[test]
fn test_no_release_point_display() {
    let warning = BoundaryWarning::NoReleasePoint {
        scope: "queue".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("queue"),
        "Message should contain the scope, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("entire history"),
        "Message should explain the fallback, got: {}",
        display_msg
    );
}

#[test]
fn test_history_unavailable_display() {
    let warning = BoundaryWarning::HistoryUnavailable {
        reason: "could not find repository".to_string(),
    };
    assert_eq!(
        warning.to_string(),
        "Could not read commit history: could not find repository"
    );
}

#[test]
fn test_nothing_to_bump_display() {
    let warning = BoundaryWarning::NothingToBump { commits: 4 };
    let display_msg = warning.to_string();
    assert!(display_msg.starts_with("No version bump needed"));
    assert!(display_msg.contains("4 commit(s)"));
}

#[test]
fn test_version_suffix_dropped_display() {
    let warning = BoundaryWarning::VersionSuffixDropped {
        input: "1.1.0-rc.1".to_string(),
        version: "1.1.0".to_string(),
    };
    assert_eq!(
        warning.to_string(),
        "Version '1.1.0-rc.1' is recorded as 1.1.0: pre-release and build suffixes are not kept"
    );
    assert!(!warning.is_terminal());
}

#[test]
fn test_release_already_documented_display() {
    let warning = BoundaryWarning::ReleaseAlreadyDocumented {
        version: "1.0.0".to_string(),
        path: "queue/CHANGELOG.md".to_string(),
    };
    assert_eq!(
        warning.to_string(),
        "queue/CHANGELOG.md already has a section for 1.0.0"
    );
    assert!(!warning.is_terminal());
}

// ============================================================================
// Terminal Warnings
// ============================================================================

#[test]
fn test_terminal_warnings() {
    assert!(BoundaryWarning::NoCommitsSinceRelease {
        release_point: None
    }
    .is_terminal());
    assert!(BoundaryWarning::NothingToBump { commits: 1 }.is_terminal());
    assert!(!BoundaryWarning::NoReleasePoint {
        scope: "workspace".to_string()
    }
    .is_terminal());
    assert!(!BoundaryWarning::HistoryUnavailable {
        reason: "x".to_string()
    }
    .is_terminal());
}

#[test]
fn test_warning_formatting_includes_message() {
    let warning = BoundaryWarning::NoReleasePoint {
        scope: "workspace".to_string(),
    };
    let formatted = console::strip_ansi_codes(&ui::format_boundary_warning(&warning)).into_owned();
    assert!(formatted.starts_with("⚠ WARNING:"));
    assert!(formatted.ends_with(&warning.to_string()));
}
