//! Cargo manifest access: reading the current version and writing a new one
//! without disturbing the rest of the file.

use crate::domain::SemanticVersion;
use crate::error::{ReleaseBumpError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use toml_edit::{DocumentMut, Item, Value};

pub const CARGO_MANIFEST: &str = "Cargo.toml";

/// Which table of the manifest holds the version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionField {
    /// `[package].version`
    Package,
    /// `[workspace.package].version`
    WorkspacePackage,
}

impl VersionField {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionField::Package => "package.version",
            VersionField::WorkspacePackage => "workspace.package.version",
        }
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    package: Option<VersionTable>,
    workspace: Option<WorkspaceTable>,
}

#[derive(Debug, Deserialize)]
struct WorkspaceTable {
    package: Option<VersionTable>,
}

#[derive(Debug, Deserialize)]
struct VersionTable {
    // `version.workspace = true` is a table, not a string
    version: Option<toml::Value>,
}

impl VersionTable {
    fn literal(&self) -> Option<&str> {
        self.version.as_ref().and_then(toml::Value::as_str)
    }
}

/// Locate the version string in manifest text
pub fn parse_version_field(path: &Path, content: &str) -> Result<(String, VersionField)> {
    let manifest: Manifest = toml::from_str(content)
        .map_err(|e| ReleaseBumpError::manifest(path, e.to_string()))?;

    if let Some(version) = manifest.package.as_ref().and_then(VersionTable::literal) {
        return Ok((version.to_string(), VersionField::Package));
    }

    if let Some(version) = manifest
        .workspace
        .as_ref()
        .and_then(|ws| ws.package.as_ref())
        .and_then(VersionTable::literal)
    {
        return Ok((version.to_string(), VersionField::WorkspacePackage));
    }

    Err(ReleaseBumpError::missing_field(
        path,
        format!(
            "{} or {}",
            VersionField::Package.as_str(),
            VersionField::WorkspacePackage.as_str()
        ),
    ))
}

/// Read the current version string of the manifest at `path`
pub fn read_version(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)?;
    parse_version_field(path, &content).map(|(version, _)| version)
}

/// Rewrite the version field in manifest text, preserving formatting elsewhere
pub fn set_version(path: &Path, content: &str, version: &SemanticVersion) -> Result<String> {
    let (_, field) = parse_version_field(path, content)?;

    let mut doc: DocumentMut = content
        .parse()
        .map_err(|e: toml_edit::TomlError| ReleaseBumpError::manifest(path, e.to_string()))?;

    let table = match field {
        VersionField::Package => doc.get_mut("package"),
        VersionField::WorkspacePackage => doc
            .get_mut("workspace")
            .and_then(Item::as_table_like_mut)
            .and_then(|ws| ws.get_mut("package")),
    }
    .and_then(Item::as_table_like_mut)
    .ok_or_else(|| ReleaseBumpError::missing_field(path, field.as_str()))?;

    let slot = table
        .get_mut("version")
        .ok_or_else(|| ReleaseBumpError::missing_field(path, field.as_str()))?;

    // Keep the existing decoration (spacing, trailing comments)
    let decor = slot.as_value().map(|value| value.decor().clone());
    let mut value = Value::from(version.to_string());
    if let Some(decor) = decor {
        *value.decor_mut() = decor;
    }
    *slot = Item::Value(value);

    Ok(doc.to_string())
}

/// Write `version` into the manifest at `path`
pub fn write_version(path: &Path, version: &SemanticVersion) -> Result<()> {
    let content = fs::read_to_string(path)?;
    let updated = set_version(path, &content, version)?;
    fs::write(path, updated)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn path() -> PathBuf {
        PathBuf::from("Cargo.toml")
    }

    #[test]
    fn test_parse_package_version() {
        let content = "[package]\nname = \"queue\"\nversion = \"0.3.1\"\n";
        let (version, field) = parse_version_field(&path(), content).unwrap();
        assert_eq!(version, "0.3.1");
        assert_eq!(field, VersionField::Package);
    }

    #[test]
    fn test_parse_workspace_package_version() {
        let content = "[workspace]\nmembers = [\"a\"]\n\n[workspace.package]\nversion = \"1.0.0\"\n";
        let (version, field) = parse_version_field(&path(), content).unwrap();
        assert_eq!(version, "1.0.0");
        assert_eq!(field, VersionField::WorkspacePackage);
    }

    #[test]
    fn test_inherited_version_is_missing() {
        let content = "[package]\nname = \"a\"\nversion.workspace = true\n";
        let err = parse_version_field(&path(), content).unwrap_err();
        assert!(matches!(err, ReleaseBumpError::MissingManifestField { .. }));
    }

    #[test]
    fn test_missing_version() {
        let content = "[workspace]\nmembers = []\n";
        let err = parse_version_field(&path(), content).unwrap_err();
        match err {
            ReleaseBumpError::MissingManifestField { field, .. } => {
                assert_eq!(field, "package.version or workspace.package.version")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_version_message_names_both_fields() {
        let content = "[workspace]\nmembers = [\"a\"]\n\n[workspace.package]\nedition = \"2021\"\n";
        let err = parse_version_field(&path(), content).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No package.version or workspace.package.version found in Cargo.toml"
        );
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_version_field(&path(), "[package\nname=").unwrap_err();
        assert!(matches!(err, ReleaseBumpError::Manifest { .. }));
    }

    #[test]
    fn test_set_version_preserves_formatting() {
        let content = "# crate manifest\n[package]\nname    = \"queue\"\nversion = \"0.3.1\" # bumped by tooling\nedition = \"2021\"\n\n[dependencies]\nserde = { version = \"0.3.1\" }\n";
        let updated = set_version(&path(), content, &SemanticVersion::new(0, 4, 0)).unwrap();
        assert_eq!(
            updated,
            "# crate manifest\n[package]\nname    = \"queue\"\nversion = \"0.4.0\" # bumped by tooling\nedition = \"2021\"\n\n[dependencies]\nserde = { version = \"0.3.1\" }\n"
        );
    }

    #[test]
    fn test_set_workspace_version() {
        let content = "[workspace.package]\nversion = \"1.0.0\"\n";
        let updated = set_version(&path(), content, &SemanticVersion::new(2, 0, 0)).unwrap();
        assert_eq!(updated, "[workspace.package]\nversion = \"2.0.0\"\n");
    }

    #[test]
    fn test_write_version_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join(CARGO_MANIFEST);
        fs::write(&manifest, "[package]\nname = \"a\"\nversion = \"1.2.3\"\n").unwrap();

        write_version(&manifest, &SemanticVersion::new(1, 3, 0)).unwrap();
        assert_eq!(read_version(&manifest).unwrap(), "1.3.0");
    }
}
