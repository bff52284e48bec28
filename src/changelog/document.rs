use crate::error::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// Preamble written when a changelog is created from scratch
pub const DEFAULT_PREAMBLE: &str = "# Changelog

All notable changes to this project will be documented in this file.

The format is based on [Keep a Changelog](https://keepachangelog.com/en/1.0.0/),
and this project adheres to [Semantic Versioning](https://semver.org/spec/v2.0.0.html).

## [Unreleased]

";

/// Where a new release section goes in a changelog document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// Immediately before the first released section, at this byte offset
    BeforeSection { offset: usize },
    /// After the leading run of heading/blank lines, at this byte offset
    AfterPreamble { offset: usize },
    /// No usable document: start one with [`DEFAULT_PREAMBLE`]
    NewDocument,
}

/// Text inside the brackets of a `## [...]` header
fn bracket_label(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("## [")?;
    rest.split_once(']').map(|(label, _)| label)
}

/// A `## [x]` header for an actual release (not `[Unreleased]`)
pub fn is_versioned_header(line: &str) -> bool {
    bracket_label(line)
        .map(|label| !label.trim().eq_ignore_ascii_case("unreleased"))
        .unwrap_or(false)
}

/// Lines of `text` with the byte offset each one starts at
fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        (start, raw.trim_end_matches(['\n', '\r']))
    })
}

/// Decide where a new section belongs in `existing`
pub fn plan_insertion(existing: Option<&str>) -> Insertion {
    let text = match existing {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Insertion::NewDocument,
    };

    if let Some((offset, _)) = lines_with_offsets(text).find(|(_, line)| is_versioned_header(line)) {
        return Insertion::BeforeSection { offset };
    }

    let offset = lines_with_offsets(text)
        .find(|(_, line)| !line.trim().is_empty() && !line.starts_with('#'))
        .map(|(offset, _)| offset)
        .unwrap_or(text.len());

    Insertion::AfterPreamble { offset }
}

/// Merge `section` into `existing` according to [`plan_insertion`]
pub fn insert_section(existing: Option<&str>, section: &str) -> String {
    match (plan_insertion(existing), existing) {
        (Insertion::BeforeSection { offset }, Some(text)) => {
            format!("{}{}{}", &text[..offset], section, &text[offset..])
        }
        (Insertion::AfterPreamble { offset }, Some(text)) => {
            let head = text[..offset].trim_end();
            let tail = &text[offset..];
            if head.is_empty() {
                format!("{}{}", section, tail)
            } else {
                format!("{}\n\n{}{}", head, section, tail)
            }
        }
        _ => format!("{}{}", DEFAULT_PREAMBLE, section),
    }
}

/// Read `path` if it exists, insert `section`, and write the result back
pub fn update_changelog_file(path: &Path, section: &str) -> Result<()> {
    let existing = if path.exists() {
        Some(fs::read_to_string(path)?)
    } else {
        None
    };

    let insertion = plan_insertion(existing.as_deref());
    debug!(path = %path.display(), ?insertion, "merging changelog section");

    let updated = insert_section(existing.as_deref(), section);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, updated)?;
    Ok(())
}

/// One `### title` group inside a release section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionGroup {
    pub title: String,
    pub lines: Vec<String>,
}

/// One released `## [version] - date` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSection {
    pub version: String,
    pub date: Option<String>,
    pub groups: Vec<SectionGroup>,
}

impl ReleaseSection {
    /// All list items in document order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|group| group.lines.iter().map(String::as_str))
    }
}

/// Released sections recovered from changelog text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangelogDocument {
    pub sections: Vec<ReleaseSection>,
}

impl ChangelogDocument {
    /// Parse released sections; `[Unreleased]` and preamble text are skipped
    pub fn parse(text: &str) -> Self {
        static HEADER_RE: OnceLock<Regex> = OnceLock::new();
        let header_re = HEADER_RE.get_or_init(|| {
            Regex::new(r"^## \[([^\]]+)\](?:\s*-\s*(\S.*))?$").expect("valid section header regex")
        });

        let mut sections: Vec<ReleaseSection> = Vec::new();
        let mut in_release = false;

        for (_, line) in lines_with_offsets(text) {
            if line.starts_with("## ") {
                in_release = false;
                if !is_versioned_header(line) {
                    continue;
                }
                if let Some(captures) = header_re.captures(line) {
                    sections.push(ReleaseSection {
                        version: captures[1].trim().to_string(),
                        date: captures.get(2).map(|m| m.as_str().trim().to_string()),
                        groups: Vec::new(),
                    });
                    in_release = true;
                }
                continue;
            }

            if !in_release {
                continue;
            }
            let Some(section) = sections.last_mut() else {
                continue;
            };

            if let Some(title) = line.strip_prefix("### ") {
                section.groups.push(SectionGroup {
                    title: title.trim().to_string(),
                    lines: Vec::new(),
                });
            } else if line.starts_with("- ") {
                if section.groups.is_empty() {
                    section.groups.push(SectionGroup {
                        title: String::new(),
                        lines: Vec::new(),
                    });
                }
                if let Some(group) = section.groups.last_mut() {
                    group.lines.push(line.to_string());
                }
            }
        }

        ChangelogDocument { sections }
    }

    pub fn latest(&self) -> Option<&ReleaseSection> {
        self.sections.first()
    }

    pub fn find(&self, version: &str) -> Option<&ReleaseSection> {
        self.sections.iter().find(|section| section.version == version)
    }
}
