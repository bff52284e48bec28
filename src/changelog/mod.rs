//! Changelog generation: rendering release sections and merging them into
//! existing `CHANGELOG.md` documents.

pub mod document;
pub mod render;

pub use document::{
    insert_section, plan_insertion, update_changelog_file, ChangelogDocument, Insertion,
    ReleaseSection, SectionGroup, DEFAULT_PREAMBLE,
};
pub use render::{assemble, ChangelogRenderer, RenderOptions};
