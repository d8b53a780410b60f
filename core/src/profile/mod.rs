//! Portfolio profile document, loaded once at startup.
//!
//! Any failure to fetch, parse or validate the document is fatal for the page
//! that renders it.

use crate::validate::validate_email;
use error::ProfileLoadError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};
use tracing::info;

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum ProfileLoadError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("HTTP error: {0}")]
        Http(String),

        #[error("Failed to load profile data: status {0}")]
        Status(u16),

        #[error("parse error: {0}")]
        Parse(#[from] serde_json::Error),

        #[error("invalid profile: {}", .0.join(", "))]
        Invalid(Vec<String>),
    }
}

/// Where the profile document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSource {
    File(PathBuf),
    Url(String),
}

impl ProfileSource {
    /// Treats `http://` and `https://` prefixes as URLs, anything else as a path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            ProfileSource::Url(raw.to_string())
        } else {
            ProfileSource::File(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for ProfileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileSource::File(path) => write!(f, "{}", path.display()),
            ProfileSource::Url(url) => f.write_str(url),
        }
    }
}

/// Item identifiers appear as numbers or strings in hand-written documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(u64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub tagline: Option<String>,
    pub location: String,
    pub about: String,
    #[serde(default)]
    pub photo: Option<String>,
    pub github: String,
    pub linkedin: String,
    #[serde(default)]
    pub portfolio: Option<String>,
    pub email: String,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub skills: Skills,
    pub projects: Vec<Project>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub id: ItemId,
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub duration: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: ItemId,
    pub title: String,
    pub company: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    pub location: String,
    pub duration: String,
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub languages: Vec<String>,
    pub frontend: Vec<String>,
    pub backend: Vec<String>,
    pub databases: Vec<String>,
    pub tools: Vec<String>,
}

impl Skills {
    /// Category label and entries, in display order.
    pub fn categories(&self) -> [(&'static str, &[String]); 5] {
        [
            ("Languages", self.languages.as_slice()),
            ("Frontend", self.frontend.as_slice()),
            ("Backend", self.backend.as_slice()),
            ("Databases", self.databases.as_slice()),
            ("Tools", self.tools.as_slice()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ItemId,
    pub name: String,
    pub desc: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: ItemId,
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
}

impl Profile {
    pub fn load(source: &ProfileSource) -> Result<Self, ProfileLoadError> {
        let raw = match source {
            ProfileSource::File(path) => Self::read_file(path)?,
            ProfileSource::Url(url) => Self::fetch(url)?,
        };

        let profile = Self::from_json(&raw)?;
        info!(%source, name = %profile.name, "profile loaded");
        Ok(profile)
    }

    /// Parses and validates a profile document.
    pub fn from_json(raw: &str) -> Result<Self, ProfileLoadError> {
        let profile: Profile = serde_json::from_str(raw)?;

        let errors = profile.validate();
        if !errors.is_empty() {
            return Err(ProfileLoadError::Invalid(errors));
        }
        Ok(profile)
    }

    /// Returns the list of problems with required values; empty if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("name must not be empty".to_string());
        }

        if self.title.trim().is_empty() {
            errors.push("title must not be empty".to_string());
        }

        if !validate_email(self.email.trim()) {
            errors.push(format!("email '{}' is not a valid address", self.email));
        }

        errors
    }

    /// First word of the name, used to greet the owner in notifications.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or_default()
    }

    fn read_file(path: &Path) -> Result<String, ProfileLoadError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn fetch(url: &str) -> Result<String, ProfileLoadError> {
        match ureq::get(url).call() {
            Ok(response) => Ok(response.into_string()?),
            Err(ureq::Error::Status(status, _)) => Err(ProfileLoadError::Status(status)),
            Err(ureq::Error::Transport(transport)) => {
                Err(ProfileLoadError::Http(transport.to_string()))
            }
        }
    }

    /// Plain-text rendering of every section.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_summary(&mut out);
        out
    }

    fn write_summary(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "{}", self.name)?;
        writeln!(out, "{}", self.title)?;
        if let Some(tagline) = &self.tagline {
            writeln!(out, "{tagline}")?;
        }
        writeln!(out, "{}", self.location)?;
        writeln!(out)?;
        writeln!(out, "{}", self.about)?;
        writeln!(out)?;
        writeln!(out, "Email: {}", self.email)?;
        writeln!(out, "GitHub: {}", self.github)?;
        writeln!(out, "LinkedIn: {}", self.linkedin)?;
        if let Some(portfolio) = &self.portfolio {
            writeln!(out, "Portfolio: {portfolio}")?;
        }

        if !self.education.is_empty() {
            writeln!(out, "\n## Education")?;
            for edu in &self.education {
                writeln!(
                    out,
                    "- {} at {} ({}, {})",
                    edu.degree, edu.institution, edu.location, edu.duration
                )?;
                writeln!(out, "  {}", edu.details)?;
            }
        }

        if !self.experience.is_empty() {
            writeln!(out, "\n## Experience")?;
            for exp in &self.experience {
                match &exp.kind {
                    Some(kind) => writeln!(out, "- {}, {} [{kind}]", exp.title, exp.company)?,
                    None => writeln!(out, "- {}, {}", exp.title, exp.company)?,
                }
                writeln!(out, "  {} | {}", exp.location, exp.duration)?;
                writeln!(out, "  {}", exp.description)?;
                for achievement in &exp.achievements {
                    writeln!(out, "  * {achievement}")?;
                }
            }
        }

        let skills: Vec<_> = self
            .skills
            .categories()
            .into_iter()
            .filter(|(_, entries)| !entries.is_empty())
            .collect();
        if !skills.is_empty() {
            writeln!(out, "\n## Skills")?;
            for (label, entries) in skills {
                writeln!(out, "- {label}: {}", entries.join(", "))?;
            }
        }

        if !self.projects.is_empty() {
            writeln!(out, "\n## Projects")?;
            for project in &self.projects {
                writeln!(out, "- {}: {}", project.name, project.desc)?;
                if !project.tech.is_empty() {
                    writeln!(out, "  Tech: {}", project.tech.join(", "))?;
                }
                if let Some(link) = &project.link {
                    writeln!(out, "  {link}")?;
                }
            }
        }

        if !self.certificates.is_empty() {
            writeln!(out, "\n## Certificates")?;
            for cert in &self.certificates {
                writeln!(out, "- {} ({}, {})", cert.name, cert.issuer, cert.date)?;
                writeln!(out, "  {}", cert.description)?;
                if let Some(link) = &cert.link {
                    writeln!(out, "  {link}")?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
