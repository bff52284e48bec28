use std::fmt;

/// Conventional commit category assigned by the classifier.
///
/// Variants are declared in changelog presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Breaking,
    Feature,
    Fix,
    Performance,
    Refactor,
    Docs,
    Test,
    Build,
    Ci,
    Chore,
    Other,
}

impl Category {
    /// Every category, in presentation order
    pub const ALL: [Category; 11] = [
        Category::Breaking,
        Category::Feature,
        Category::Fix,
        Category::Performance,
        Category::Refactor,
        Category::Docs,
        Category::Test,
        Category::Build,
        Category::Ci,
        Category::Chore,
        Category::Other,
    ];

    /// Categories that get a changelog subsection. Chore and other never do.
    pub const CHANGELOG_ORDER: [Category; 9] = [
        Category::Breaking,
        Category::Feature,
        Category::Fix,
        Category::Performance,
        Category::Refactor,
        Category::Docs,
        Category::Test,
        Category::Build,
        Category::Ci,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Breaking => "breaking",
            Category::Feature => "feature",
            Category::Fix => "fix",
            Category::Performance => "performance",
            Category::Refactor => "refactor",
            Category::Docs => "docs",
            Category::Test => "test",
            Category::Build => "build",
            Category::Ci => "ci",
            Category::Chore => "chore",
            Category::Other => "other",
        }
    }

    /// Conventional commit type keyword matched by the classifier, if any.
    pub fn commit_type(&self) -> Option<&'static str> {
        match self {
            Category::Feature => Some("feat"),
            Category::Fix => Some("fix"),
            Category::Performance => Some("perf"),
            Category::Refactor => Some("refactor"),
            Category::Docs => Some("docs"),
            Category::Test => Some("test"),
            Category::Build => Some("build"),
            Category::Ci => Some("ci"),
            Category::Chore => Some("chore"),
            Category::Breaking | Category::Other => None,
        }
    }

    /// Changelog subsection title
    pub fn changelog_title(&self) -> &'static str {
        match self {
            Category::Breaking => "💥 Breaking Changes",
            Category::Feature => "✨ Features",
            Category::Fix => "🐛 Bug Fixes",
            Category::Performance => "🚀 Performance",
            Category::Refactor => "♻️ Refactoring",
            Category::Docs => "📚 Documentation",
            Category::Test => "✅ Tests",
            Category::Build => "🔨 Build System",
            Category::Ci => "⚙️ CI/CD",
            Category::Chore => "🧹 Chores",
            Category::Other => "📦 Other Changes",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
