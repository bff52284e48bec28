//! Conventional commit classification.
//!
//! A single rule table drives both call sites: the bump decision only needs to
//! tell breaking changes, features and fixes apart ([`RuleSet::Reduced`]),
//! while changelog generation distinguishes every conventional type
//! ([`RuleSet::Full`]). Breaking change detection is shared by both.

use crate::domain::{Category, CommitRecord};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Which categories a classifier may produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSet {
    /// breaking / feature / fix / other
    Reduced,
    /// every category
    Full,
}

impl RuleSet {
    /// Categories this rule set can produce, in presentation order
    pub fn categories(&self) -> &'static [Category] {
        match self {
            RuleSet::Reduced => &[
                Category::Breaking,
                Category::Feature,
                Category::Fix,
                Category::Other,
            ],
            RuleSet::Full => &Category::ALL,
        }
    }

    fn covers(&self, category: Category) -> bool {
        self.categories().contains(&category)
    }
}

struct TypeRule {
    category: Category,
    pattern: Regex,
}

/// Type rules in priority order, one per category with a commit type keyword
fn type_rules() -> &'static [TypeRule] {
    static RULES: OnceLock<Vec<TypeRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        Category::ALL
            .iter()
            .filter_map(|category| {
                category.commit_type().map(|keyword| TypeRule {
                    category: *category,
                    pattern: Regex::new(&format!(r"(?i)^{}(?:\([^)]+\))?:", keyword))
                        .expect("valid commit type regex"),
                })
            })
            .collect()
    })
}

/// Whether a commit announces a breaking change.
///
/// True for a `type(scope)!:` subject, a `BREAKING CHANGE:` token anywhere in
/// the subject (both case-insensitive), or `BREAKING CHANGE` in the body.
pub fn is_breaking(commit: &CommitRecord) -> bool {
    static BREAKING_RE: OnceLock<Regex> = OnceLock::new();
    let re = BREAKING_RE.get_or_init(|| {
        Regex::new(r"(?i)^\w+(?:\([^)]+\))?!:|BREAKING CHANGE:").expect("valid breaking regex")
    });

    re.is_match(&commit.subject) || commit.body.contains("BREAKING CHANGE")
}

/// Maps commits to categories under one rule set
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    rule_set: RuleSet,
}

impl Classifier {
    pub fn new(rule_set: RuleSet) -> Self {
        Classifier { rule_set }
    }

    pub fn rule_set(&self) -> RuleSet {
        self.rule_set
    }

    /// Classify a single commit. First matching rule wins.
    pub fn classify(&self, commit: &CommitRecord) -> Category {
        if is_breaking(commit) {
            return Category::Breaking;
        }

        type_rules()
            .iter()
            .filter(|rule| self.rule_set.covers(rule.category))
            .find(|rule| rule.pattern.is_match(&commit.subject))
            .map(|rule| rule.category)
            .unwrap_or(Category::Other)
    }

    /// Partition commits into category buckets, keeping input order per bucket
    pub fn partition(&self, commits: &[CommitRecord]) -> Classification {
        let mut buckets: BTreeMap<Category, Vec<CommitRecord>> = BTreeMap::new();
        for commit in commits {
            buckets
                .entry(self.classify(commit))
                .or_default()
                .push(commit.clone());
        }

        Classification {
            rule_set: self.rule_set,
            buckets,
        }
    }
}

/// Classify a commit with the full rule set
pub fn classify(commit: &CommitRecord) -> Category {
    Classifier::new(RuleSet::Full).classify(commit)
}

/// Commits grouped by category.
///
/// Every input commit lands in exactly one bucket; within a bucket commits
/// keep their original relative order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    rule_set: RuleSet,
    buckets: BTreeMap<Category, Vec<CommitRecord>>,
}

impl Classification {
    pub fn rule_set(&self) -> RuleSet {
        self.rule_set
    }

    /// Commits in one bucket (empty slice when none)
    pub fn get(&self, category: Category) -> &[CommitRecord] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn count(&self, category: Category) -> usize {
        self.get(category).len()
    }

    pub fn contains(&self, category: Category) -> bool {
        self.count(category) > 0
    }

    /// Total number of classified commits
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Non-empty buckets in presentation order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[CommitRecord])> {
        self.buckets
            .iter()
            .filter(|(_, commits)| !commits.is_empty())
            .map(|(category, commits)| (*category, commits.as_slice()))
    }
}
