use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const EMBEDDED: &str = include_str!("../site.toml");

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Personal {
    pub name: String,
    pub title: String,
    pub short_title: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub bio: String,
    pub long_bio: String,
    pub achievements: String,
    pub resume_url: String,
    pub profile_image: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Social {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behance: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SkillCategory {
    pub name: String,
    pub icon: String,
    pub description: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TechnicalSkill {
    pub name: String,
    /// Proficiency from 0 to 100.
    pub level: u8,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Skills {
    #[serde(default)]
    pub categories: Vec<SkillCategory>,
    #[serde(default)]
    pub technical: Vec<TechnicalSkill>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub short_description: String,
    pub image: String,
    pub thumbnail: String,
    pub tech_stack: Vec<String>,
    pub live_url: String,
    pub github_url: String,
    pub results: String,
    #[serde(default)]
    pub featured: bool,
    pub category: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Experience {
    pub id: u32,
    pub title: String,
    pub company: String,
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Education {
    pub id: u32,
    pub degree: String,
    pub institution: String,
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct ContactSettings {
    pub form_enabled: bool,
    pub email_notifications: bool,
    pub auto_reply: bool,
    pub working_hours: String,
    pub response_time: String,
    pub preferred_contact: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Seo {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub author: String,
    pub og_image: String,
    pub twitter_card: String,
}

/// Portfolio content served read-only to the frontend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteCatalog {
    pub personal: Personal,
    #[serde(default)]
    pub social: Social,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    pub contact: ContactSettings,
    pub seo: Seo,
}

impl SiteCatalog {
    /// Content bundled with the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_toml(EMBEDDED)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads the catalog from `path`, falling back to the bundled content
    /// when no path is configured.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            tracing::info!("Using bundled site content");
            return Self::embedded();
        };

        let contents = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_toml(&contents)?;
        tracing::info!(
            path = %path.display(),
            projects = catalog.projects.len(),
            "Loaded site content"
        );

        Ok(catalog)
    }
}
