//! Plugin settings
//!
//! Settings persist as a small JSON file. Missing fields fall back to their
//! defaults and unknown fields are ignored, so older files keep loading.

use crate::error::Result;
use crate::io::formatter::EncodeStyle;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Default settings file name inside a vault
pub const SETTINGS_FILE: &str = ".personote.json";

/// Folder that receives new person notes unless configured otherwise
pub const DEFAULT_PEOPLE_FOLDER: &str = "People";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Vault path of the note template; the built-in template when unset
    pub template_path: Option<String>,
    /// Vault path of the VCF file to import
    pub contacts_import_path: Option<String>,
    /// Vault folder for person notes
    pub people_folder: String,
    /// How rewritten front matter is laid out
    pub encode_style: EncodeStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template_path: None,
            contacts_import_path: None,
            people_folder: DEFAULT_PEOPLE_FOLDER.to_string(),
            encode_style: EncodeStyle::default(),
        }
    }
}

impl Settings {
    /// Load settings, returning defaults when the file does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Save settings as pretty JSON, replacing the file atomically
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let parent_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir)?;

        let mut temp_file = NamedTempFile::new_in(parent_dir)?;
        temp_file.write_all(serde_json::to_string_pretty(self)?.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Template path, treating blank values as unset
    pub fn template_path(&self) -> Option<&str> {
        non_blank(self.template_path.as_deref())
    }

    /// Contacts file path, treating blank values as unset
    pub fn contacts_import_path(&self) -> Option<&str> {
        non_blank(self.contacts_import_path.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.people_folder, "People");
        assert_eq!(settings.template_path(), None);
        assert_eq!(settings.encode_style, EncodeStyle::Yaml);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load(temp_dir.path().join(SETTINGS_FILE)).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_and_blank_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(SETTINGS_FILE);
        fs::write(
            &path,
            r#"{"templatePath": "  ", "contactsImportPath": "Contacts/contacts.vcf", "other": 1}"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.template_path(), None);
        assert_eq!(settings.contacts_import_path(), Some("Contacts/contacts.vcf"));
        assert_eq!(settings.people_folder, "People");
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join(SETTINGS_FILE);
        let settings = Settings {
            template_path: Some("Templates/Person.md".to_string()),
            encode_style: EncodeStyle::Json,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }
}
