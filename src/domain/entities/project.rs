use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationError};

use crate::{
    entities::list_input::ListInput,
    errors::{require_field, AppError},
};

const MAX_TITLE_LENGTH: u64 = 200;
const MAX_DESCRIPTION_LENGTH: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Live,
    #[default]
    InProgress,
    Archived,
}

/// One entry of the projects document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    /// Keys written by other tools; kept as-is on rewrite.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tech: Option<ListInput>,
    pub status: Option<ProjectStatus>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ProjectIdRequest {
    pub id: Option<String>,
}

/// Validated project fields, before an id is assigned.
#[derive(Debug, Clone, Validate)]
pub struct ProjectDraft {
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(min = 1, max = MAX_DESCRIPTION_LENGTH))]
    pub description: String,

    pub tech: Vec<String>,
    pub status: ProjectStatus,

    #[validate(custom(function = "validate_url"))]
    pub github_url: Option<String>,

    #[validate(custom(function = "validate_url"))]
    pub live_url: Option<String>,
}

impl ProjectRequest {
    pub fn required_id(&self) -> Result<String, AppError> {
        require_field("id", self.id.clone()).map(|id| id.trim().to_string())
    }

    pub fn into_draft(self) -> Result<ProjectDraft, AppError> {
        let draft = ProjectDraft {
            title: require_field("title", self.title)?.trim().to_string(),
            description: require_field("description", self.description)?.trim().to_string(),
            tech: self.tech.map(ListInput::normalize).unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            github_url: non_blank(self.github_url),
            live_url: non_blank(self.live_url),
        };

        draft.validate()?;
        Ok(draft)
    }
}

impl ProjectDraft {
    pub fn into_project(self, id: String) -> Project {
        Project {
            id,
            title: self.title,
            description: self.description,
            tech: self.tech,
            status: self.status,
            github_url: self.github_url,
            live_url: self.live_url,
            extra: Map::new(),
        }
    }

    /// Replaces every known field of `project`, keeping its id and unknown keys.
    pub fn apply_to(self, project: &mut Project) {
        project.title = self.title;
        project.description = self.description;
        project.tech = self.tech;
        project.status = self.status;
        project.github_url = self.github_url;
        project.live_url = self.live_url;
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectWriteResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
}

impl ProjectWriteResponse {
    pub fn new(message: &str, project: Option<Project>) -> Self {
        Self { success: true, message: message.to_string(), project }
    }
}

pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    match url::Url::parse(url) {
        Ok(parsed) => {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                Ok(())
            } else {
                Err(new_validation_error("invalid_url_scheme", "URL must start with http:// or https://"))
            }
        }
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_normalizes_tech_and_urls() {
        let request = ProjectRequest {
            title: Some(" Portfolio ".into()),
            description: Some("My site".into()),
            tech: Some(ListInput::Text("React, Next.js , ,TypeScript".into())),
            github_url: Some("   ".into()),
            live_url: Some("https://example.com".into()),
            ..Default::default()
        };

        let draft = request.into_draft().unwrap();
        assert_eq!(draft.title, "Portfolio");
        assert_eq!(draft.tech, vec!["React", "Next.js", "TypeScript"]);
        assert_eq!(draft.status, ProjectStatus::InProgress);
        assert_eq!(draft.github_url, None);
        assert_eq!(draft.live_url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn draft_requires_title_and_description() {
        let request = ProjectRequest { title: Some("T".into()), ..Default::default() };
        assert!(matches!(request.into_draft(), Err(AppError::MissingField(f)) if f == "description"));
    }

    #[test]
    fn draft_rejects_non_http_urls() {
        let request = ProjectRequest {
            title: Some("T".into()),
            description: Some("D".into()),
            github_url: Some("javascript:alert(1)".into()),
            ..Default::default()
        };
        assert!(matches!(request.into_draft(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn serializes_camel_case_without_absent_urls() {
        let project = ProjectDraft {
            title: "T".into(),
            description: "D".into(),
            tech: vec![],
            status: ProjectStatus::Live,
            github_url: Some("https://github.com/x/y".into()),
            live_url: None,
        }
        .into_project("1700000000000".into());

        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["githubUrl"], "https://github.com/x/y");
        assert_eq!(json["status"], "live");
        assert!(json.get("liveUrl").is_none());
    }

    #[test]
    fn unknown_keys_survive_a_round_trip() {
        let raw = r#"{"id":"1","title":"T","description":"D","tech":["Rust"],"status":"archived","featured":true}"#;
        let project: Project = serde_json::from_str(raw).unwrap();
        assert_eq!(project.status, ProjectStatus::Archived);
        assert_eq!(project.extra.get("featured"), Some(&Value::Bool(true)));

        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["featured"], true);
    }
}
