use serde::{Deserialize, Serialize};
use url::Url;
use validator::{Validate, ValidationError};

use crate::models::candidate::{Candidate, CandidateStatus};

/// Body of `POST /candidates`: every editable field, no id or timestamps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct CandidateFields {
    #[validate(length(min = 2, message = "Name must have at least 2 characters"))]
    pub name: String,
    #[validate(
        email(message = "Invalid e-mail address"),
        custom(function = "validate_email_domain")
    )]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
    #[serde(default)]
    #[validate(range(min = 0, max = 60, message = "Experience must be between 0 and 60 years"))]
    pub experience_years: i32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_profile_link"))]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub status: CandidateStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CandidateFields {
    /// Editor defaults for a candidate that does not exist yet.
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: role.into(),
            ..Self::default()
        }
    }

    /// Trims text, turns blank optional fields into absent ones and cleans the skill list.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        self.role = self.role.trim().to_string();
        self.phone = non_blank(self.phone);
        self.linkedin = non_blank(self.linkedin);
        self.notes = non_blank(self.notes);
        let skills = std::mem::take(&mut self.skills);
        for skill in skills {
            self.add_skill(&skill);
        }
        self
    }

    /// Returns false when the skill was blank or already listed.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.skills.iter().any(|s| s == skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    pub fn remove_skill(&mut self, skill: &str) -> bool {
        let before = self.skills.len();
        self.skills.retain(|s| s != skill);
        self.skills.len() != before
    }
}

impl From<&Candidate> for CandidateFields {
    fn from(candidate: &Candidate) -> Self {
        Self {
            name: candidate.name.clone(),
            email: candidate.email.clone(),
            phone: candidate.phone.clone(),
            role: candidate.role.clone(),
            experience_years: candidate.experience_years,
            skills: candidate.skills.clone(),
            linkedin: candidate.linkedin.clone(),
            status: candidate.status,
            notes: candidate.notes.clone(),
        }
    }
}

/// Body of `PUT /candidates/{id}`. Absent fields are left untouched by the
/// server; an empty string clears an optional field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct CandidatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, message = "Name must have at least 2 characters"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        email(message = "Invalid e-mail address"),
        custom(function = "validate_email_domain")
    )]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, max = 60, message = "Experience must be between 0 and 60 years"))]
    pub experience_years: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_profile_link"))]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CandidateStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CandidatePatch {
    pub fn status_only(status: CandidateStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Full editor contents. Optional fields the editor left blank are sent as
/// empty strings so the stored values get cleared.
impl From<CandidateFields> for CandidatePatch {
    fn from(fields: CandidateFields) -> Self {
        Self {
            name: Some(fields.name),
            email: Some(fields.email),
            phone: Some(fields.phone.unwrap_or_default()),
            role: Some(fields.role),
            experience_years: Some(fields.experience_years),
            skills: Some(fields.skills),
            linkedin: Some(fields.linkedin.unwrap_or_default()),
            status: Some(fields.status),
            notes: Some(fields.notes.unwrap_or_default()),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `local@domain.tld`: a single `@`, no whitespace and a dot inside the domain.
fn validate_email_domain(value: &str) -> Result<(), ValidationError> {
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
                && domain
                    .char_indices()
                    .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
        }
        None => false,
    };
    if valid {
        return Ok(());
    }
    let mut err = ValidationError::new("email_domain");
    err.message = Some("E-mail must look like name@domain.tld".into());
    Err(err)
}

/// An empty link is accepted; in a patch it clears the stored one.
fn validate_profile_link(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    let valid = Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false);
    if valid {
        return Ok(());
    }
    let mut err = ValidationError::new("profile_link");
    err.message = Some("Profile link must be an http(s) URL".into());
    Err(err)
}
