//! Loader for named templates stored as `<root>/<id>.json`.

use crate::error::{KotobukiError, Result};
use crate::template::Template;
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads templates from a directory and caches them by id
pub struct TemplateLoader {
    root: PathBuf,
    cache: HashMap<String, Template>,
}

impl TemplateLoader {
    /// Create a loader rooted at the given directory
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root
            .as_ref()
            .canonicalize()
            .map_err(|e| KotobukiError::TemplateError {
                message: format!("Invalid template root: {e}"),
            })?;
        Ok(Self {
            root,
            cache: HashMap::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load a template by id
    pub fn load(&mut self, id: &str) -> Result<Template> {
        validate_template_id(id)?;

        if let Some(template) = self.cache.get(id) {
            return Ok(template.clone());
        }

        let template = self.load_and_parse(id)?;
        self.cache.insert(id.to_string(), template.clone());
        Ok(template)
    }

    /// Ids of every template file under the root, sorted
    pub fn available(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                if is_valid_id(stem) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn template_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    fn load_and_parse(&self, id: &str) -> Result<Template> {
        let path = self.template_path(id);
        if !path.is_file() {
            return Err(KotobukiError::TemplateError {
                message: format!("Template not found: {} ({})", id, path.display()),
            });
        }

        debug!("loading template '{id}' from {}", path.display());
        let source = fs::read_to_string(&path)?;
        Template::from_json(&source)
    }
}

fn validate_template_id(id: &str) -> Result<()> {
    if is_valid_id(id) {
        return Ok(());
    }
    Err(KotobukiError::TemplateError {
        message: format!("Invalid template id: '{id}'"),
    })
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_template_id("classic").is_ok());
        assert!(validate_template_id("garden-party_2").is_ok());
        assert!(validate_template_id("").is_err());
        assert!(validate_template_id("../secret").is_err());
        assert!(validate_template_id("a/b").is_err());
        assert!(validate_template_id("a.json").is_err());
    }

    #[test]
    fn test_load_and_cache() {
        let dir = TempDir::new().unwrap();
        write(&dir, "classic.json", r#"{"meta": {"id": "classic", "name": "Classic"}}"#);

        let mut loader = TemplateLoader::new(dir.path()).unwrap();
        let template = loader.load("classic").unwrap();
        assert_eq!(template.meta.name, "Classic");

        // Served from the cache even after the file is gone
        fs::remove_file(dir.path().join("classic.json")).unwrap();
        assert_eq!(loader.load("classic").unwrap(), template);
    }

    #[test]
    fn test_missing_template() {
        let dir = TempDir::new().unwrap();
        let mut loader = TemplateLoader::new(dir.path()).unwrap();
        assert!(matches!(
            loader.load("absent"),
            Err(KotobukiError::TemplateError { .. })
        ));
    }

    #[test]
    fn test_malformed_template() {
        let dir = TempDir::new().unwrap();
        write(&dir, "broken.json", "{ not json");
        let mut loader = TemplateLoader::new(dir.path()).unwrap();
        assert!(matches!(loader.load("broken"), Err(KotobukiError::Json(_))));
    }

    #[test]
    fn test_available() {
        let dir = TempDir::new().unwrap();
        write(&dir, "modern.json", "{}");
        write(&dir, "classic.json", "{}");
        write(&dir, "notes.txt", "");
        let loader = TemplateLoader::new(dir.path()).unwrap();
        assert_eq!(loader.available().unwrap(), vec!["classic", "modern"]);
    }

    #[test]
    fn test_invalid_root() {
        assert!(TemplateLoader::new("/definitely/not/a/dir").is_err());
    }
}
