//! bower.json loading and rewrite support
//!
//! Two views of the same file: a structured one (serde) that feeds the
//! resolver, and a raw-text one (`ManifestDocument`) used by the rewrite
//! path so accepted upgrades change exactly the affected token and nothing
//! else.

mod document;

pub use document::ManifestDocument;

use crate::error::ManifestError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

/// File name of the dependency manifest
pub const MANIFEST_FILE: &str = "bower.json";

/// Structured view of bower.json
#[derive(Debug, Deserialize)]
pub struct BowerManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dependencies: Map<String, Value>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: Map<String, Value>,
}

impl BowerManifest {
    pub fn parse(path: &Path, content: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(content).map_err(|e| ManifestError::parse_error(path, e.to_string()))
    }

    /// All declared dependencies, dev entries merged in.
    ///
    /// A dev entry silently overrides a production entry of the same name;
    /// the overridden entry keeps its original position.
    pub fn declared(&self) -> Map<String, Value> {
        let mut merged = self.dependencies.clone();
        for (name, target) in &self.dev_dependencies {
            merged.insert(name.clone(), target.clone());
        }
        merged
    }
}

/// Reads and parses the manifest at `path`
pub async fn load(path: &Path) -> Result<BowerManifest, ManifestError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ManifestError::read_error(path, e))?;
    BowerManifest::parse(path, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(content: &str) -> BowerManifest {
        BowerManifest::parse(&PathBuf::from("bower.json"), content).unwrap()
    }

    #[test]
    fn test_parse_dependencies() {
        let manifest = parse(
            r#"{
                "name": "app",
                "dependencies": {
                    "jquery": "jquery#~2.1.0",
                    "lodash": "^4.17.0"
                }
            }"#,
        );

        assert_eq!(manifest.name.as_deref(), Some("app"));
        assert_eq!(manifest.dependencies.len(), 2);
        assert!(manifest.dev_dependencies.is_empty());
    }

    #[test]
    fn test_declared_merges_dev_dependencies() {
        let manifest = parse(
            r#"{
                "dependencies": {"jquery": "~2.1.0"},
                "devDependencies": {"mocha": "~1.17.0"}
            }"#,
        );

        let declared = manifest.declared();
        assert_eq!(declared.len(), 2);
        assert!(declared.contains_key("jquery"));
        assert!(declared.contains_key("mocha"));
    }

    #[test]
    fn test_declared_dev_overrides_duplicates() {
        let manifest = parse(
            r#"{
                "dependencies": {"jquery": "~2.0.0"},
                "devDependencies": {"jquery": "~2.1.0"}
            }"#,
        );

        let declared = manifest.declared();
        assert_eq!(declared.len(), 1);
        assert_eq!(declared["jquery"].as_str(), Some("~2.1.0"));
    }

    #[test]
    fn test_declared_preserves_manifest_order() {
        let manifest = parse(
            r#"{
                "dependencies": {"zebra": "1.0.0", "alpha": "1.0.0"},
                "devDependencies": {"middle": "1.0.0"}
            }"#,
        );

        let declared = manifest.declared();
        let names: Vec<&String> = declared.keys().collect();
        assert_eq!(names, ["zebra", "alpha", "middle"]);
    }

    #[test]
    fn test_parse_empty_object() {
        let manifest = parse("{}");
        assert!(manifest.dependencies.is_empty());
        assert!(manifest.declared().is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = BowerManifest::parse(&PathBuf::from("bower.json"), "not json");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_missing_file_is_not_found() {
        let err = load(&PathBuf::from("/nonexistent/bower.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { .. }));
    }
}
