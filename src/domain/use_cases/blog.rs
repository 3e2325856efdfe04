use crate::{
    entities::blog_post::{
        today, BlogPost, BlogPostDetailResponse, BlogPostSummary, BlogPostWriteResponse,
        NewBlogPostRequest, UpdateBlogPostRequest,
    },
    errors::AppError,
    repositories::blog_post::BlogPostRepository,
};

pub struct BlogPostHandler<R>
where
    R: BlogPostRepository,
{
    pub blog_post_repo: R,
    pub site_owner: String,
}

impl<R> BlogPostHandler<R>
where
    R: BlogPostRepository,
{
    pub fn new(blog_post_repo: R, site_owner: impl Into<String>) -> Self {
        BlogPostHandler { blog_post_repo, site_owner: site_owner.into() }
    }

    /// Every post, drafts included, newest first
    pub async fn list_posts(&self) -> Result<Vec<BlogPost>, AppError> {
        self.blog_post_repo.list_posts().await
    }

    /// Published posts for the public blog
    pub async fn list_published(&self) -> Result<Vec<BlogPostSummary>, AppError> {
        let posts = self.blog_post_repo.list_posts().await?;
        Ok(posts.iter().filter(|p| p.is_published()).map(BlogPost::summary).collect())
    }

    /// Published posts carrying `tag`, compared case-insensitively
    pub async fn posts_by_tag(&self, tag: &str) -> Result<Vec<BlogPostSummary>, AppError> {
        let posts = self.blog_post_repo.list_posts().await?;
        Ok(posts
            .iter()
            .filter(|p| p.is_published() && p.has_tag(tag))
            .map(BlogPost::summary)
            .collect())
    }

    pub async fn get_post(&self, slug: &str) -> Result<Option<BlogPost>, AppError> {
        self.blog_post_repo.get_post(slug.trim()).await
    }

    /// Whether `slug` names a post visitors can see.
    pub async fn is_published(&self, slug: &str) -> Result<bool, AppError> {
        Ok(self.get_post(slug).await?.is_some_and(|post| post.is_published()))
    }

    /// A published post with rendered HTML. Drafts are reported as missing.
    pub async fn get_published_post(&self, slug: &str) -> Result<BlogPostDetailResponse, AppError> {
        match self.get_post(slug).await? {
            Some(post) if post.is_published() => Ok(post.detail()),
            _ => Err(AppError::NotFound("Blog post not found".to_string())),
        }
    }

    /// Admin listing: metadata only
    pub async fn admin_list(&self) -> Result<Vec<BlogPostSummary>, AppError> {
        let posts = self.blog_post_repo.list_posts().await?;
        Ok(posts.iter().map(BlogPost::summary).collect())
    }

    /// Admin view of any post, drafts included
    pub async fn admin_get(&self, slug: &str) -> Result<BlogPostDetailResponse, AppError> {
        self.get_post(slug)
            .await?
            .map(|post| post.detail())
            .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))
    }

    /// Creates a new post file; an existing slug is never overwritten
    pub async fn create(&self, request: NewBlogPostRequest) -> Result<BlogPostWriteResponse, AppError> {
        let post = request.into_post(&self.site_owner, today())?;
        self.blog_post_repo.insert_post(&post).await?;

        tracing::info!("Created blog post '{}'", post.slug);
        Ok(BlogPostWriteResponse::new("Blog post created successfully", Some(post.slug)))
    }

    /// Rewrites a post, moving the file when the slug changes
    pub async fn update(&self, request: UpdateBlogPostRequest) -> Result<BlogPostWriteResponse, AppError> {
        let original_slug = request.required_original_slug()?;

        let original = self
            .blog_post_repo
            .get_post(&original_slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))?;

        let updated = request.merge_into(original)?;
        let renamed = updated.slug != original_slug;

        if renamed && self.blog_post_repo.post_exists(&updated.slug).await? {
            return Err(AppError::Conflict("A post with this slug already exists".to_string()));
        }

        self.blog_post_repo.write_post(&updated).await?;

        if renamed {
            if let Err(e) = self.blog_post_repo.delete_post(&original_slug).await {
                tracing::warn!("Renamed '{}' to '{}' but could not remove the old file: {}", original_slug, updated.slug, e);
            }
        }

        tracing::info!("Updated blog post '{}'", updated.slug);
        Ok(BlogPostWriteResponse::new("Blog post updated successfully", Some(updated.slug)))
    }

    pub async fn delete(&self, slug: &str) -> Result<BlogPostWriteResponse, AppError> {
        self.blog_post_repo.delete_post(slug.trim()).await?;

        tracing::info!("Deleted blog post '{}'", slug.trim());
        Ok(BlogPostWriteResponse::new("Blog post deleted successfully", None))
    }
}
