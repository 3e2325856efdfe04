use crate::{
    entities::project::{Project, ProjectRequest, ProjectWriteResponse},
    errors::{require_field, AppError},
    repositories::project::ProjectRepository,
};

pub struct ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R) -> Self {
        ProjectHandler { project_repo }
    }

    pub async fn list(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.list().await
    }

    /// Validates the request and appends a new project
    pub async fn create(&self, request: ProjectRequest) -> Result<ProjectWriteResponse, AppError> {
        let draft = request.into_draft()?;
        let project = self.project_repo.create(draft).await?;

        tracing::info!("Created project '{}' ({})", project.title, project.id);
        Ok(ProjectWriteResponse::new("Project created successfully", Some(project)))
    }

    /// Replaces every field of an existing project
    pub async fn update(&self, request: ProjectRequest) -> Result<ProjectWriteResponse, AppError> {
        let id = request.required_id()?;
        let draft = request.into_draft()?;
        let project = self.project_repo.update(&id, draft).await?;

        tracing::info!("Updated project {}", project.id);
        Ok(ProjectWriteResponse::new("Project updated successfully", Some(project)))
    }

    pub async fn delete(&self, id: Option<String>) -> Result<ProjectWriteResponse, AppError> {
        let id = require_field("id", id)?;
        self.project_repo.delete(id.trim()).await?;

        tracing::info!("Deleted project {}", id.trim());
        Ok(ProjectWriteResponse::new("Project deleted successfully", None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entities::list_input::ListInput, repositories::file_repo::JsonProjectRepo};
    use tempfile::TempDir;

    fn handler(tmp: &TempDir) -> ProjectHandler<JsonProjectRepo> {
        ProjectHandler::new(JsonProjectRepo::new(tmp.path().join("projects.json")))
    }

    fn request(title: &str) -> ProjectRequest {
        ProjectRequest {
            title: Some(title.into()),
            description: Some("About it".into()),
            tech: Some(ListInput::Text("Rust, Actix".into())),
            ..Default::default()
        }
    }

    #[actix_rt::test]
    async fn create_update_delete_cycle() {
        let tmp = TempDir::new().unwrap();
        let projects = handler(&tmp);

        let created = projects.create(request("Site")).await.unwrap().project.unwrap();
        assert_eq!(created.tech, vec!["Rust", "Actix"]);

        let mut edit = request("Site v2");
        edit.id = Some(created.id.clone());
        let updated = projects.update(edit).await.unwrap().project.unwrap();
        assert_eq!(updated.title, "Site v2");
        assert_eq!(projects.list().await.unwrap().len(), 1);

        projects.delete(Some(created.id)).await.unwrap();
        assert!(projects.list().await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn missing_identifiers_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let projects = handler(&tmp);

        assert!(matches!(projects.update(request("No id")).await, Err(AppError::MissingField(f)) if f == "id"));
        assert!(matches!(projects.delete(Some(" ".into())).await, Err(AppError::MissingField(_))));
        assert!(matches!(projects.delete(Some("404".into())).await, Err(AppError::NotFound(_))));
    }
}
