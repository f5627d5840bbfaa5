//! The canonical resume record and its collection entries.
//!
//! Field names serialize in camelCase so the persisted JSON stays compatible
//! with the storage format the editor has always used, and so patch paths
//! (`contact.email`, `experience.0.description`) resolve directly against the
//! serialized form.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Default icon assigned to custom sections that predate the icon field.
const DEFAULT_SECTION_ICON: &str = "briefcase";

fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

/// The full resume. Collections are ordered; every entry carries a stable,
/// client-generated id used only as a render/removal key.
///
/// Invariant: `contact` always exists, even when all its fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeRecord {
    pub full_name: String,
    pub title: String,
    pub about: String,
    pub skills: Vec<SkillGroup>,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub certificates: Vec<Certificate>,
    pub custom_sections: Vec<CustomSection>,
    pub contact: Contact,
    /// Data-URL encoded profile image; empty when unset.
    pub profile_picture: String,
    pub address: String,
    pub references: Vec<Reference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillGroup {
    #[serde(default = "new_entry_id")]
    pub id: String,
    pub group_name: String,
    /// Comma-separated list of skills.
    pub skills: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    #[serde(default = "new_entry_id")]
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    #[serde(default = "new_entry_id")]
    pub id: String,
    pub company: String,
    pub role: String,
    pub date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(default = "new_entry_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certificate {
    #[serde(default = "new_entry_id")]
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomSection {
    #[serde(default = "new_entry_id")]
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reference {
    #[serde(default = "new_entry_id")]
    pub id: String,
    pub name: String,
    pub details: String,
}

impl ResumeRecord {
    /// Decodes a record from its persisted JSON value, repairing the shapes
    /// older sessions may have stored. Anything unusable falls back to the
    /// empty record — a corrupt store must never break session start.
    pub fn from_storage_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return ResumeRecord::default();
        };

        // Same sanity gate the editor has always applied: a record without
        // these two keys is not a resume.
        if !map.contains_key("fullName") || !map.contains_key("contact") {
            return ResumeRecord::default();
        }

        // Legacy records stored skills as a flat string array; those are
        // discarded rather than guessed into groups.
        if let Some(Value::Array(skills)) = map.get("skills") {
            if skills.iter().any(|s| s.is_string()) {
                map.insert("skills".into(), Value::Array(vec![]));
            }
        }

        // Custom sections written before the icon field get the default.
        if let Some(Value::Array(sections)) = map.get_mut("customSections") {
            for section in sections.iter_mut() {
                if let Value::Object(obj) = section {
                    let missing = match obj.get("icon") {
                        None | Some(Value::Null) => true,
                        Some(Value::String(s)) => s.is_empty(),
                        Some(_) => false,
                    };
                    if missing {
                        obj.insert("icon".into(), Value::String(DEFAULT_SECTION_ICON.into()));
                    }
                }
            }
        }

        serde_json::from_value(Value::Object(map)).unwrap_or_default()
    }

    /// True when every scalar is empty and every collection has no entries.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_empty()
            && self.title.is_empty()
            && self.about.is_empty()
            && self.address.is_empty()
            && self.profile_picture.is_empty()
            && self.skills.is_empty()
            && self.education.is_empty()
            && self.experience.is_empty()
            && self.projects.is_empty()
            && self.certificates.is_empty()
            && self.custom_sections.is_empty()
            && self.references.is_empty()
            && self.contact == Contact::default()
    }
}
