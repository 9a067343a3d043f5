//! Document loading from JSON and YAML sources.
//!
//! Loading sits outside the validation core: it turns files or strings into
//! untyped documents, preserving object key order so that violations are
//! reported in the order the keys were written.

use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{DocumentError, Result};
use crate::schema::SchemaKind;

/// Text encodings a document may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON text.
    Json,
    /// YAML text.
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is neither `.json`, `.yaml` nor `.yml`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(DocumentError::UnsupportedFormat {
                path: path.to_path_buf(),
            }
            .into()),
        }
    }
}

/// Loader for untyped documents.
#[derive(Debug, Default)]
pub struct DocumentLoader {
    /// Base path for resolving relative paths and locating `.env`.
    base_path: Option<PathBuf>,
}

impl DocumentLoader {
    /// Creates a new document loader.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the base path for resolving relative paths.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_path {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Loads a document from a JSON or YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, has an unsupported extension,
    /// or cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Value> {
        let path = self.resolve(path.as_ref());
        info!("Loading document from: {}", path.display());

        if !path.exists() {
            return Err(DocumentError::FileNotFound { path }.into());
        }

        let format = DocumentFormat::from_path(&path)?;
        let content = std::fs::read_to_string(&path)?;

        Self::parse_str(&content, format, Some(&path))
    }

    /// Parses a document from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid in the given format.
    pub fn parse_str(content: &str, format: DocumentFormat, source: Option<&Path>) -> Result<Value> {
        debug!(?format, "Parsing document");
        let location = || source.map(|p| p.display().to_string());

        let document: Value = match format {
            DocumentFormat::Json => serde_json::from_str(content)
                .map_err(|e| DocumentError::parse(format!("JSON parse error: {e}"), location()))?,
            DocumentFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| DocumentError::parse(format!("YAML parse error: {e}"), location()))?,
        };

        Ok(document)
    }

    /// Loads the `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the `.env` file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| PathBuf::from(".env"), |p| p.join(".env"));

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| DocumentError::Dotenv {
                path: env_path.clone(),
                message: e.to_string(),
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }
}

/// Guesses which schema a file is meant for from its name.
///
/// File names mentioning `user` select the user schema; everything else is
/// treated as a deployment configuration.
#[must_use]
pub fn infer_schema(path: &Path) -> SchemaKind {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if stem.contains("user") {
        SchemaKind::User
    } else {
        SchemaKind::Deployment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use tempfile::TempDir;

    #[test]
    fn test_parse_yaml_preserves_key_order() {
        let yaml = r"
zeta: 1
features:
  cloud: v2
alpha: 2
";
        let document = DocumentLoader::parse_str(yaml, DocumentFormat::Yaml, None).unwrap();
        let keys: Vec<_> = document.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "features", "alpha"]);
        assert_eq!(document["features"]["cloud"], "v2");
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = DocumentLoader::parse_str("{ nope", DocumentFormat::Json, None);
        assert!(matches!(
            result,
            Err(SchemaError::Document(DocumentError::ParseError { .. }))
        ));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("now.json")).unwrap(),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("deploy.YML")).unwrap(),
            DocumentFormat::Yaml
        );
        assert!(DocumentFormat::from_path(Path::new("deploy.toml")).is_err());
        assert!(DocumentFormat::from_path(Path::new("deploy")).is_err());
    }

    #[test]
    fn test_load_file_with_base_path() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(
            temp_dir.path().join("now.json"),
            r#"{"github": {"enabled": true}}"#,
        )
        .expect("Failed to write document");

        let loader = DocumentLoader::new().with_base_path(temp_dir.path());
        let document = loader.load_file("now.json").expect("Failed to load document");
        assert_eq!(document["github"]["enabled"], true);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let loader = DocumentLoader::new().with_base_path(temp_dir.path());
        let result = loader.load_file("missing.json");
        assert!(matches!(
            result,
            Err(SchemaError::Document(DocumentError::FileNotFound { .. }))
        ));
    }

    #[test]
    fn test_unreadable_file_is_io_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::create_dir(temp_dir.path().join("now.json")).expect("Failed to create dir");

        let loader = DocumentLoader::new().with_base_path(temp_dir.path());
        let result = loader.load_file("now.json");
        assert!(matches!(result, Err(SchemaError::Io(_))));
    }

    #[test]
    fn test_load_dotenv() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let loader = DocumentLoader::new().with_base_path(temp_dir.path());
        assert!(loader.load_dotenv().is_ok());

        std::fs::write(
            temp_dir.path().join(".env"),
            "DEPLOY_SCHEMAS_LOADER_TEST=loaded\n",
        )
        .expect("Failed to write .env");
        loader.load_dotenv().expect("Failed to load .env");
        assert_eq!(
            std::env::var("DEPLOY_SCHEMAS_LOADER_TEST").as_deref(),
            Ok("loaded")
        );
    }

    #[test]
    fn test_infer_schema() {
        assert_eq!(infer_schema(Path::new("user.json")), SchemaKind::User);
        assert_eq!(infer_schema(Path::new("fixtures/Users.yaml")), SchemaKind::User);
        assert_eq!(infer_schema(Path::new("now.json")), SchemaKind::Deployment);
    }
}
