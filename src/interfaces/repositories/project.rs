use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;

use crate::{
    entities::project::{Project, ProjectDraft},
    errors::AppError,
    repositories::file_repo::JsonProjectRepo,
};

/// Whole-collection storage for projects. No locking: the last rewrite wins.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Project>, AppError>;
    /// Appends a project with a fresh timestamp id.
    async fn create(&self, draft: ProjectDraft) -> Result<Project, AppError>;
    async fn update(&self, id: &str, draft: ProjectDraft) -> Result<Project, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn check_storage(&self) -> Result<(), AppError>;
}

impl JsonProjectRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonProjectRepo { path: path.into() }
    }

    async fn read_all(&self) -> Result<Vec<Project>, AppError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AppError::Storage(format!("{}: {}", self.path.display(), e))),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw).map_err(|e| {
            AppError::Storage(format!("{} is not a valid projects document: {}", self.path.display(), e))
        })
    }

    async fn write_all(&self, projects: &[Project]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(projects)?;
        fs::write(&self.path, json)
            .await
            .map_err(|e| AppError::Storage(format!("{}: {}", self.path.display(), e)))
    }
}

fn next_id(projects: &[Project]) -> String {
    let mut candidate = Utc::now().timestamp_millis();
    while projects.iter().any(|p| p.id == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

#[async_trait]
impl ProjectRepository for JsonProjectRepo {
    async fn list(&self) -> Result<Vec<Project>, AppError> {
        self.read_all().await
    }

    async fn create(&self, draft: ProjectDraft) -> Result<Project, AppError> {
        let mut projects = self.read_all().await?;
        let project = draft.into_project(next_id(&projects));

        projects.push(project.clone());
        self.write_all(&projects).await?;
        Ok(project)
    }

    async fn update(&self, id: &str, draft: ProjectDraft) -> Result<Project, AppError> {
        let mut projects = self.read_all().await?;
        let project = projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        draft.apply_to(project);
        let updated = project.clone();

        self.write_all(&projects).await?;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut projects = self.read_all().await?;
        let before = projects.len();
        projects.retain(|p| p.id != id);

        if projects.len() == before {
            return Err(AppError::NotFound("Project not found".to_string()));
        }
        self.write_all(&projects).await
    }

    async fn check_storage(&self) -> Result<(), AppError> {
        self.read_all().await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::project::ProjectStatus;
    use tempfile::TempDir;

    fn draft(title: &str) -> ProjectDraft {
        ProjectDraft {
            title: title.into(),
            description: "Description".into(),
            tech: vec!["Rust".into()],
            status: ProjectStatus::InProgress,
            github_url: None,
            live_url: None,
        }
    }

    #[actix_rt::test]
    async fn missing_document_is_empty_and_created_on_write() {
        let tmp = TempDir::new().unwrap();
        let repo = JsonProjectRepo::new(tmp.path().join("data/projects.json"));

        assert!(repo.list().await.unwrap().is_empty());

        let created = repo.create(draft("First")).await.unwrap();
        let listed = repo.list().await.unwrap();
        assert_eq!(listed, vec![created]);

        let raw = std::fs::read_to_string(tmp.path().join("data/projects.json")).unwrap();
        assert!(raw.starts_with("[\n  {"));
    }

    #[actix_rt::test]
    async fn ids_are_unique_for_rapid_creates() {
        let tmp = TempDir::new().unwrap();
        let repo = JsonProjectRepo::new(tmp.path().join("projects.json"));

        let a = repo.create(draft("A")).await.unwrap();
        let b = repo.create(draft("B")).await.unwrap();
        let c = repo.create(draft("C")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);

        let titles: Vec<_> = repo.list().await.unwrap().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[actix_rt::test]
    async fn update_and_delete_unknown_ids_leave_collection_alone() {
        let tmp = TempDir::new().unwrap();
        let repo = JsonProjectRepo::new(tmp.path().join("projects.json"));
        let kept = repo.create(draft("Kept")).await.unwrap();

        assert!(matches!(repo.update("missing", draft("X")).await, Err(AppError::NotFound(_))));
        assert!(matches!(repo.delete("missing").await, Err(AppError::NotFound(_))));
        assert_eq!(repo.list().await.unwrap(), vec![kept.clone()]);

        let mut replacement = draft("Renamed");
        replacement.status = ProjectStatus::Live;
        let updated = repo.update(&kept.id, replacement).await.unwrap();
        assert_eq!(updated.id, kept.id);
        assert_eq!(updated.status, ProjectStatus::Live);

        repo.delete(&kept.id).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn corrupt_document_is_an_error_and_left_untouched() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("projects.json");
        std::fs::write(&path, "{ not json").unwrap();
        let repo = JsonProjectRepo::new(&path);

        assert!(matches!(repo.list().await, Err(AppError::Storage(_))));
        assert!(matches!(repo.create(draft("A")).await, Err(AppError::Storage(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }
}
