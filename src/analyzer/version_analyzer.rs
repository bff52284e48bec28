use crate::classifier::{Classification, Classifier, RuleSet};
use crate::domain::{BumpLevel, Category, CommitRecord, SemanticVersion};
use crate::error::Result;

/// Bump level reached by the most severe non-empty bucket
pub fn level_for(classification: &Classification) -> BumpLevel {
    if classification.contains(Category::Breaking) {
        BumpLevel::Major
    } else if classification.contains(Category::Feature) {
        BumpLevel::Minor
    } else if classification.contains(Category::Fix) {
        BumpLevel::Patch
    } else {
        BumpLevel::None
    }
}

/// Minimal bump level covering every commit
pub fn decide_bump(commits: &[CommitRecord]) -> BumpLevel {
    level_for(&Classifier::new(RuleSet::Reduced).partition(commits))
}

/// Computed bump level plus an optional caller override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BumpDecision {
    pub computed: BumpLevel,
    pub forced: Option<BumpLevel>,
}

impl BumpDecision {
    /// The level that is actually applied: the override if present
    pub fn effective(&self) -> BumpLevel {
        self.forced.unwrap_or(self.computed)
    }

    pub fn is_forced(&self) -> bool {
        self.forced.is_some()
    }
}

/// Everything a caller needs to present or apply a version bump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpReport {
    pub decision: BumpDecision,
    pub current: SemanticVersion,
    pub next: SemanticVersion,
    pub breakdown: Classification,
}

impl BumpReport {
    /// Whether applying the report changes the version
    pub fn needs_bump(&self) -> bool {
        self.decision.effective() != BumpLevel::None
    }
}

/// Analyzes commits to determine version bump type
#[derive(Debug, Clone, Copy)]
pub struct VersionAnalyzer {
    classifier: Classifier,
}

impl VersionAnalyzer {
    pub fn new() -> Self {
        VersionAnalyzer {
            classifier: Classifier::new(RuleSet::Reduced),
        }
    }

    /// Classify commits and decide the bump, honoring a forced level
    pub fn analyze(&self, commits: &[CommitRecord], forced: Option<BumpLevel>) -> (BumpDecision, Classification) {
        let breakdown = self.classifier.partition(commits);
        let decision = BumpDecision {
            computed: level_for(&breakdown),
            forced,
        };
        (decision, breakdown)
    }

    /// Build a full report against the version string read from a manifest
    pub fn report(
        &self,
        current_version: &str,
        commits: &[CommitRecord],
        forced: Option<BumpLevel>,
    ) -> Result<BumpReport> {
        let current = SemanticVersion::parse(current_version)?;
        let (decision, breakdown) = self.analyze(commits, forced);

        Ok(BumpReport {
            decision,
            current,
            next: current.bump(decision.effective())?,
            breakdown,
        })
    }
}

impl Default for VersionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseBumpError;

    fn commits(subjects: &[&str]) -> Vec<CommitRecord> {
        subjects.iter().map(|s| CommitRecord::from_subject(*s)).collect()
    }

    #[test]
    fn test_decide_empty() {
        assert_eq!(decide_bump(&[]), BumpLevel::None);
    }

    #[test]
    fn test_decide_fix_only() {
        assert_eq!(
            decide_bump(&commits(&["fix: bug 1", "fix(db): bug 2"])),
            BumpLevel::Patch
        );
    }

    #[test]
    fn test_decide_fix_and_feature() {
        assert_eq!(
            decide_bump(&commits(&["fix: bug", "feat: thing"])),
            BumpLevel::Minor
        );
    }

    #[test]
    fn test_decide_fix_feature_breaking() {
        assert_eq!(
            decide_bump(&commits(&["fix: bug", "feat: thing", "feat!: rewrite"])),
            BumpLevel::Major
        );
    }

    #[test]
    fn test_decide_breaking_via_footer() {
        let commit = CommitRecord::from_subject("fix: rename API field")
            .with_body("BREAKING CHANGE: field changed from X to Y");
        assert_eq!(decide_bump(&[commit]), BumpLevel::Major);
    }

    #[test]
    fn test_decide_ignores_docs_and_chore() {
        assert_eq!(
            decide_bump(&commits(&[
                "docs: update readme",
                "chore: update deps",
                "perf: faster",
                "refactor: cleanup",
                "Updated stuff",
            ])),
            BumpLevel::None
        );
    }

    #[test]
    fn test_decide_is_order_independent() {
        let forward = commits(&["chore: a", "fix: b", "feat: c", "docs: d"]);
        let mut backward = forward.clone();
        backward.reverse();
        assert_eq!(decide_bump(&forward), decide_bump(&backward));
    }

    #[test]
    fn test_low_severity_never_lowers_result() {
        let mut history = commits(&["feat: big thing"]);
        for i in 0..50 {
            history.push(CommitRecord::from_subject(format!("fix: bug {}", i)));
        }
        assert_eq!(decide_bump(&history), BumpLevel::Minor);
    }

    #[test]
    fn test_forced_level_wins() {
        let analyzer = VersionAnalyzer::new();
        let (decision, _) = analyzer.analyze(&commits(&["fix: bug"]), Some(BumpLevel::Major));
        assert_eq!(decision.computed, BumpLevel::Patch);
        assert_eq!(decision.effective(), BumpLevel::Major);
        assert!(decision.is_forced());
    }

    #[test]
    fn test_report_computes_next_version() {
        let analyzer = VersionAnalyzer::new();
        let report = analyzer
            .report("1.4.2", &commits(&["feat(api): add endpoint", "fix: typo"]), None)
            .unwrap();
        assert_eq!(report.current, SemanticVersion::new(1, 4, 2));
        assert_eq!(report.next, SemanticVersion::new(1, 5, 0));
        assert_eq!(report.breakdown.count(Category::Feature), 1);
        assert_eq!(report.breakdown.count(Category::Fix), 1);
        assert!(report.needs_bump());
    }

    #[test]
    fn test_report_none_keeps_version() {
        let report = VersionAnalyzer::new()
            .report("0.3.0", &commits(&["docs: readme"]), None)
            .unwrap();
        assert_eq!(report.next, report.current);
        assert!(!report.needs_bump());
        assert_eq!(report.breakdown.count(Category::Other), 1);
    }

    #[test]
    fn test_report_invalid_version() {
        let err = VersionAnalyzer::new()
            .report("not-a-version", &commits(&["fix: a"]), None)
            .unwrap_err();
        assert!(matches!(err, ReleaseBumpError::InvalidVersionFormat(_)));
    }
}
