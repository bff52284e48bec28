//! Domain logic - pure business rules independent of git operations

pub mod category;
pub mod commit;
pub mod tag;
pub mod version;

pub use category::Category;
pub use commit::CommitRecord;
pub use tag::{ReleaseScope, TagPattern, TagScheme};
pub use version::{apply_bump, BumpLevel, SemanticVersion};
