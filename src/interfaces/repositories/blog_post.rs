use std::{io::ErrorKind, path::{Path, PathBuf}};

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};

use crate::{
    constants::POST_EXTENSION,
    entities::blog_post::{sort_newest_first, BlogPost},
    errors::AppError,
    repositories::file_repo::FsBlogPostRepo,
    utils::slug::is_valid_slug,
};

#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// Every readable post, newest first.
    async fn list_posts(&self) -> Result<Vec<BlogPost>, AppError>;
    async fn get_post(&self, slug: &str) -> Result<Option<BlogPost>, AppError>;
    /// Creates the post; fails with `Conflict` if the slug is taken.
    async fn insert_post(&self, post: &BlogPost) -> Result<(), AppError>;
    /// Creates or overwrites the post.
    async fn write_post(&self, post: &BlogPost) -> Result<(), AppError>;
    async fn delete_post(&self, slug: &str) -> Result<(), AppError>;
    async fn post_exists(&self, slug: &str) -> Result<bool, AppError>;
    async fn check_storage(&self) -> Result<(), AppError>;
}

impl FsBlogPostRepo {
    pub fn new(content_dir: impl Into<PathBuf>, default_author: impl Into<String>) -> Self {
        FsBlogPostRepo {
            content_dir: content_dir.into(),
            default_author: default_author.into(),
        }
    }

    fn path_for(&self, slug: &str) -> Option<PathBuf> {
        is_valid_slug(slug).then(|| self.content_dir.join(format!("{slug}.{POST_EXTENSION}")))
    }

    async fn ensure_dir(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.content_dir).await?;
        Ok(())
    }
}

fn slug_of(path: &Path) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some(POST_EXTENSION) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if is_valid_slug(stem) {
        Some(stem.to_string())
    } else {
        tracing::warn!("Ignoring content file with an invalid slug: {}", path.display());
        None
    }
}

#[async_trait]
impl BlogPostRepository for FsBlogPostRepo {
    async fn list_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        let mut dir = match fs::read_dir(&self.content_dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.ensure_dir().await?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if let Some(slug) = slug_of(&path) {
                entries.push((slug, path));
            }
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut posts = Vec::with_capacity(entries.len());
        for (slug, path) in entries {
            match fs::read_to_string(&path).await {
                Ok(source) => posts.push(BlogPost::from_source(&slug, &source, &self.default_author)),
                Err(e) => tracing::warn!("Skipping unreadable post {}: {}", path.display(), e),
            }
        }

        sort_newest_first(&mut posts);
        Ok(posts)
    }

    async fn get_post(&self, slug: &str) -> Result<Option<BlogPost>, AppError> {
        let Some(path) = self.path_for(slug) else {
            return Ok(None);
        };

        match fs::read_to_string(&path).await {
            Ok(source) => Ok(Some(BlogPost::from_source(slug, &source, &self.default_author))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Storage(format!("{}: {}", path.display(), e))),
        }
    }

    async fn insert_post(&self, post: &BlogPost) -> Result<(), AppError> {
        let path = self.path_for(&post.slug)
            .ok_or_else(|| AppError::InvalidInput(format!("Invalid slug: {}", post.slug)))?;
        self.ensure_dir().await?;

        let mut file = match fs::OpenOptions::new().write(true).create_new(true).open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(AppError::Conflict("A post with this slug already exists".to_string()));
            }
            Err(e) => return Err(AppError::Storage(format!("{}: {}", path.display(), e))),
        };

        let written = async {
            file.write_all(post.to_source().as_bytes()).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            // Do not leave a half-written file claiming the slug.
            let _ = fs::remove_file(&path).await;
            return Err(AppError::Storage(format!("{}: {}", path.display(), e)));
        }
        Ok(())
    }

    async fn write_post(&self, post: &BlogPost) -> Result<(), AppError> {
        let path = self.path_for(&post.slug)
            .ok_or_else(|| AppError::InvalidInput(format!("Invalid slug: {}", post.slug)))?;
        self.ensure_dir().await?;

        fs::write(&path, post.to_source())
            .await
            .map_err(|e| AppError::Storage(format!("{}: {}", path.display(), e)))
    }

    async fn delete_post(&self, slug: &str) -> Result<(), AppError> {
        let path = self.path_for(slug)
            .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(AppError::NotFound("Blog post not found".to_string()))
            }
            Err(e) => Err(AppError::Storage(format!("{}: {}", path.display(), e))),
        }
    }

    async fn post_exists(&self, slug: &str) -> Result<bool, AppError> {
        match self.path_for(slug) {
            Some(path) => Ok(fs::try_exists(&path).await?),
            None => Ok(false),
        }
    }

    async fn check_storage(&self) -> Result<(), AppError> {
        let meta = fs::metadata(&self.content_dir).await?;
        if meta.is_dir() {
            Ok(())
        } else {
            Err(AppError::Storage(format!("{} is not a directory", self.content_dir.display())))
        }
    }
}
