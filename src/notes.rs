//! Person notes and contact import
//!
//! New notes are created from a template by literal placeholder substitution.
//! Imports turn every parsed contact card into its own note and never touch
//! notes that already exist.

use crate::config::Settings;
use crate::contacts::{parse_records, ContactRecord};
use crate::core::document::DocumentRef;
use crate::error::{PersonoteError, Result};
use crate::io::store::{normalize_path, DocumentStore};
use crate::notify::{InputSource, Notifier};
use log::{debug, info, warn};
use regex::{Captures, Regex};

/// Built-in person note template
pub const DEFAULT_TEMPLATE: &str = r##"---
tags:
  - "#people"
---

# {{title}}

# Table of Content
```table-of-contents
```


# Basic Information
- Names: {{name}}
- Birthday: {{birthday}}
- Age:
- Gender:
- Phone: {{phone}}
- Email: {{email}}

# Relationship Dynamics
- Role in My Life:
- Shared Interests:
- Preferred Activities Together:
- How We Met:
- Gift Ideas:
- Love Languages:

# Cultural Background
- Origin:
- Ethnic Heritage:
- Religious/Spiritual Affiliation:
- Languages:
- Key Traditions:
- Core Values:
- Gender Role Perspectives:
- Time Management Approach:

# Personality Traits
- Communication Style:
- Emotional tendencies:

# Social Connections
- Family Structure:
- Romantic Relationships:
- Friend Circle:
- Other Significant Relationships:

# Professional Life
- Current Occupation:
- Past Occupations:
- Employer(s):

# Interests and Hobbies
- Entertainment Preferences:
- Fitness Activities:
- Pets/Animals:
- Travel Interests:
- Other Hobbies:

# Preferences
- Likes:
- Dislikes:

# Personal History
- Significant Life Events:
- Recent Developments:

# Future Aspirations and Goals
- Future Aspirations:
- Short-term Goals:

# Additional Notes

# Interaction Log
- Date | Event | Notes

"##;

/// Values for the template placeholders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateFields {
    pub title: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub birthday: String,
}

impl TemplateFields {
    /// Fields for a note created by name only
    pub fn for_name(name: &str) -> Self {
        Self {
            title: name.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Replace every `{{placeholder}}` occurrence in `template`.
    ///
    /// Substitution is a single pass, so placeholder text inside a value is
    /// left as written.
    pub fn render(&self, template: &str) -> Result<String> {
        let placeholder = Regex::new(r"\{\{(title|name|phone|email|birthday)\}\}")?;
        let rendered = placeholder.replace_all(template, |caps: &Captures| match &caps[1] {
            "title" => self.title.as_str(),
            "name" => self.name.as_str(),
            "phone" => self.phone.as_str(),
            "email" => self.email.as_str(),
            _ => self.birthday.as_str(),
        });
        Ok(rendered.into_owned())
    }
}

impl From<&ContactRecord> for TemplateFields {
    fn from(contact: &ContactRecord) -> Self {
        Self {
            title: contact.name.clone(),
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
            birthday: contact.birthday.clone(),
        }
    }
}

/// The configured template, or the built-in one when none is set
pub fn load_template(store: &dyn DocumentStore, settings: &Settings) -> Result<String> {
    match settings.template_path() {
        Some(path) => {
            let path = normalize_path(path);
            if !store.exists(&path) {
                return Err(PersonoteError::not_found(path));
            }
            debug!("Using template {}", path);
            store.read(&path)
        }
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

/// Vault path of the person note for `name`.
///
/// Path separators and colons in the name are replaced so one person is
/// always one file directly inside the people folder.
pub fn person_note_path(settings: &Settings, name: &str) -> String {
    let file_stem: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '-',
            c => c,
        })
        .collect();
    normalize_path(&format!("{}/{}.md", settings.people_folder, file_stem))
}

/// Ask for a name and create a person note from the template.
///
/// Returns `None` when no name was given.
pub fn create_person_note(
    store: &mut dyn DocumentStore,
    settings: &Settings,
    input: &mut dyn InputSource,
    notifier: &dyn Notifier,
) -> Result<Option<DocumentRef>> {
    let name = match input.request("Enter the file name:") {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => {
            debug!("No file name provided");
            return Ok(None);
        }
    };

    let template = match load_template(store, settings) {
        Ok(template) => template,
        Err(e @ PersonoteError::NotFound { .. }) => {
            notifier.notify("Template file not found");
            return Err(e);
        }
        Err(e) => return Err(e),
    };

    let path = person_note_path(settings, &name);
    let content = TemplateFields::for_name(&name).render(&template)?;
    match store.create(&path, &content) {
        Ok(document) => {
            info!("File created: {}", document.path());
            Ok(Some(document))
        }
        Err(e @ PersonoteError::AlreadyExists { .. }) => {
            notifier.notify(&format!("Note {} already exists", path));
            Err(e)
        }
        Err(e) => Err(e),
    }
}

/// Outcome of a contacts import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Number of cards found in the contacts file
    pub parsed: usize,
    /// Notes created, in import order
    pub created: Vec<DocumentRef>,
    /// Contacts not imported, with the reason
    pub skipped: Vec<(String, String)>,
}

impl ImportReport {
    pub fn summary(&self) -> String {
        let mut summary = format!("Imported {} contacts", self.created.len());
        if !self.skipped.is_empty() {
            summary.push_str(&format!(" ({} skipped)", self.skipped.len()));
        }
        summary
    }
}

/// Create one person note per card in the configured contacts file.
///
/// A missing setting or contacts file aborts before anything is created. A
/// contact whose note already exists is skipped and the import goes on.
pub fn import_contacts(
    store: &mut dyn DocumentStore,
    settings: &Settings,
    notifier: &dyn Notifier,
) -> Result<ImportReport> {
    let Some(contacts_path) = settings.contacts_import_path() else {
        notifier.notify("Contacts import file path not set");
        return Err(PersonoteError::not_configured("Contacts import file path"));
    };

    let contacts_path = normalize_path(contacts_path);
    if !store.exists(&contacts_path) {
        notifier.notify("Contacts file not found");
        return Err(PersonoteError::not_found(contacts_path));
    }

    let template = load_template(store, settings)?;
    let content = store.read(&contacts_path)?;
    let mut report = ImportReport::default();

    for contact in parse_records(&content) {
        report.parsed += 1;
        match create_contact_note(store, settings, &template, &contact) {
            Ok(document) => report.created.push(document),
            Err(e) if e.is_item_local() => {
                if matches!(e, PersonoteError::AlreadyExists { .. }) {
                    notifier.notify(&format!(
                        "Contact note for {} already exists. Skipping.",
                        contact.name
                    ));
                } else {
                    warn!("Failed to import {}: {}", contact.name, e);
                }
                report.skipped.push((contact.name.clone(), e.to_string()));
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        "Contacts import: {} parsed, {} created, {} skipped",
        report.parsed,
        report.created.len(),
        report.skipped.len()
    );
    notifier.notify(&report.summary());
    Ok(report)
}

fn create_contact_note(
    store: &mut dyn DocumentStore,
    settings: &Settings,
    template: &str,
    contact: &ContactRecord,
) -> Result<DocumentRef> {
    let path = person_note_path(settings, &contact.name);
    if store.exists(&path) {
        return Err(PersonoteError::already_exists(path));
    }
    let content = TemplateFields::from(contact).render(template)?;
    store.create(&path, &content)
}
