//! File-based model loader
//!
//! Reads a [`ParsedSources`] snapshot written by the upstream source parser.
//! JSON and YAML are accepted; the format is picked from the file extension.

use async_trait::async_trait;
use std::path::Path;
use tokio::fs;

use super::ParsedSources;
use crate::error::{Error, Result};

/// Loads the declaration model from some source
#[async_trait]
pub trait ModelLoader: Send + Sync {
    async fn load(&self, source: &Path) -> Result<ParsedSources>;
}

/// Loads declaration models from local files
pub struct FileModelLoader;

impl FileModelLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileModelLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelLoader for FileModelLoader {
    async fn load(&self, source: &Path) -> Result<ParsedSources> {
        let content = fs::read_to_string(source).await?;

        let extension = source
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let sources = match extension.as_deref() {
            Some("json") => serde_json::from_str(&content)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => serde_json::from_str(&content)
                .or_else(|_| serde_yaml::from_str(&content))
                .map_err(|e| {
                    Error::model(format!(
                        "Failed to parse model {} as JSON or YAML: {e}",
                        source.display()
                    ))
                })?,
        };

        tracing::debug!(
            source = %source.display(),
            "Loaded declaration model"
        );

        Ok(sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_json_model() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("model.json");
        std::fs::write(
            &path,
            r#"{"structs": [{"name": "MyService", "packageName": "svc"}]}"#,
        )
        .unwrap();

        let sources = FileModelLoader::new().load(&path).await.unwrap();
        assert_eq!(sources.structs.len(), 1);
        assert_eq!(sources.structs[0].name, "MyService");
    }

    #[tokio::test]
    async fn test_load_yaml_model() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("model.yaml");
        std::fs::write(
            &path,
            r#"
structs:
  - name: MyService
    packageName: svc
    docLines:
      - '// @RestService(path = "/api")'
    operations:
      - name: getPerson
        inputArgs:
          - name: uid
            typeName: string
"#,
        )
        .unwrap();

        let sources = FileModelLoader::new().load(&path).await.unwrap();
        let service = &sources.structs[0];
        assert_eq!(service.doc_lines[0], r#"// @RestService(path = "/api")"#);
        assert_eq!(service.operations[0].input_args[0].type_name, "string");
    }

    #[tokio::test]
    async fn test_load_unknown_extension_falls_back_to_yaml() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("model.txt");
        std::fs::write(&path, "structs:\n  - name: Plain\n").unwrap();

        let sources = FileModelLoader::new().load(&path).await.unwrap();
        assert_eq!(sources.structs[0].name, "Plain");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = FileModelLoader::new()
            .load(Path::new("/definitely/not/here.json"))
            .await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
