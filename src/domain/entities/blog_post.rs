use std::{borrow::Cow, fmt, str::FromStr};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{
    constants::{DEFAULT_POST_TITLE, DEFAULT_READ_TIME},
    entities::list_input::ListInput,
    errors::{require_field, AppError},
    utils::{
        front_matter::FrontMatter,
        markdown::safe_markdown_to_html,
        slug::{derive_slug, validate_slug},
    },
};

// ───── Constants ──────────────────────────────────────────────────────
const MAX_TITLE_LENGTH: u64 = 200;
const MAX_EXCERPT_LENGTH: u64 = 500;
const MAX_TAGS: usize = 20;
const MAX_TAG_LENGTH: usize = 50;
const DATE_FORMAT: &str = "%Y-%m-%d";

// ───── Domain Model ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl FromStr for PostStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            _ => Err(()),
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A post stored as `<slug>.mdx`.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,

    #[validate(length(min = 1, max = MAX_TITLE_LENGTH, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    pub date: String,

    #[validate(length(max = MAX_EXCERPT_LENGTH, message = "Excerpt is too long"))]
    pub excerpt: String,

    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: String,

    pub author: String,

    #[validate(custom(function = "validate_tags"))]
    pub tags: Vec<String>,

    pub read_time: String,
    pub status: PostStatus,
    pub views: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

impl BlogPost {
    /// Builds a post from file contents. Missing metadata takes defaults.
    pub fn from_source(slug: &str, source: &str, default_author: &str) -> Self {
        let (meta, body) = FrontMatter::parse(source);

        BlogPost {
            slug: slug.to_string(),
            title: meta.text("title").unwrap_or(DEFAULT_POST_TITLE).trim().to_string(),
            date: meta
                .text("date")
                .map(|d| d.trim().to_string())
                .unwrap_or_else(|| today().format(DATE_FORMAT).to_string()),
            excerpt: meta.text("excerpt").unwrap_or_default().to_string(),
            content: body.trim_end().to_string(),
            author: meta.text("author").unwrap_or(default_author).to_string(),
            tags: meta.list("tags").unwrap_or_default(),
            read_time: meta.text("readTime").unwrap_or(DEFAULT_READ_TIME).to_string(),
            status: meta
                .text("status")
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            views: meta
                .text("views")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0),
            cover_image: meta.text("coverImage").map(|s| s.trim().to_string()),
        }
    }

    /// File contents for this post.
    pub fn to_source(&self) -> String {
        let mut meta = FrontMatter::new();
        meta.set_text("title", &self.title);
        meta.set_text("date", &self.date);
        meta.set_text("excerpt", &self.excerpt);
        meta.set_text("author", &self.author);
        meta.set_list("tags", self.tags.clone());
        meta.set_text("readTime", &self.read_time);
        meta.set_text("status", self.status.as_str());
        meta.set_text("views", self.views.to_string());
        if let Some(cover) = &self.cover_image {
            meta.set_text("coverImage", cover);
        }
        meta.render(&self.content)
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Parsed publication date; unparseable dates sort after every real date.
    pub fn date_key(&self) -> Option<NaiveDate> {
        self.date
            .get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, DATE_FORMAT).ok())
    }

    pub fn summary(&self) -> BlogPostSummary {
        BlogPostSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            date: self.date.clone(),
            excerpt: self.excerpt.clone(),
            author: self.author.clone(),
            tags: self.tags.clone(),
            read_time: self.read_time.clone(),
            status: self.status,
            views: self.views,
            cover_image: self.cover_image.clone(),
        }
    }

    pub fn detail(&self) -> BlogPostDetailResponse {
        BlogPostDetailResponse {
            summary: self.summary(),
            content: self.content.clone(),
            content_html: safe_markdown_to_html(&self.content),
        }
    }
}

/// Sorts newest first. Equal dates keep their current order.
pub fn sort_newest_first(posts: &mut [BlogPost]) {
    posts.sort_by(|a, b| b.date_key().cmp(&a.date_key()));
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostSummary {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub author: String,
    pub tags: Vec<String>,
    pub read_time: String,
    pub status: PostStatus,
    pub views: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostDetailResponse {
    #[serde(flatten)]
    pub summary: BlogPostSummary,
    pub content: String,
    pub content_html: String,
}

#[derive(Debug, Serialize)]
pub struct BlogPostWriteResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl BlogPostWriteResponse {
    pub fn new(message: &str, slug: Option<String>) -> Self {
        Self { success: true, message: message.to_string(), slug }
    }
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct NewBlogPostRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub tags: Option<ListInput>,
    pub read_time: Option<String>,
    pub author: Option<String>,
    pub cover_image: Option<String>,
    pub status: Option<PostStatus>,
}

impl NewBlogPostRequest {
    /// Builds the record to persist, dated `today` with zero views.
    pub fn into_post(self, default_author: &str, today: NaiveDate) -> Result<BlogPost, AppError> {
        let title = require_field("title", self.title)?.trim().to_string();
        let content = require_field("content", self.content)?;

        let slug = match non_blank(self.slug) {
            Some(explicit) => explicit,
            None => derive_slug(&title),
        };
        if slug.is_empty() {
            return Err(AppError::MissingField("slug".to_string()));
        }

        let post = BlogPost {
            slug,
            title,
            date: today.format(DATE_FORMAT).to_string(),
            excerpt: self.excerpt.map(|e| e.trim().to_string()).unwrap_or_default(),
            content,
            author: non_blank(self.author).unwrap_or_else(|| default_author.to_string()),
            tags: self.tags.map(ListInput::normalize).unwrap_or_default(),
            read_time: non_blank(self.read_time).unwrap_or_else(|| DEFAULT_READ_TIME.to_string()),
            status: self.status.unwrap_or_default(),
            views: 0,
            cover_image: non_blank(self.cover_image),
        };

        post.validate()?;
        Ok(post)
    }
}

#[derive(Debug, Deserialize, Default, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateBlogPostRequest {
    pub original_slug: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub tags: Option<ListInput>,
    pub read_time: Option<String>,
    pub author: Option<String>,
    pub cover_image: Option<String>,
    pub status: Option<PostStatus>,

    #[validate(custom(function = "validate_post_date"))]
    pub date: Option<String>,

    pub views: Option<u64>,
}

impl UpdateBlogPostRequest {
    /// Checks the fields every update must carry and returns the original slug.
    pub fn required_original_slug(&self) -> Result<String, AppError> {
        let original = require_field("originalSlug", self.original_slug.clone())?;
        require_field("title", self.title.clone())?;
        require_field("content", self.content.clone())?;
        Ok(original.trim().to_string())
    }

    /// Applies the request on top of `original`. Absent fields keep the stored value.
    /// Only the values the caller sent are validated.
    pub fn merge_into(self, original: BlogPost) -> Result<BlogPost, AppError> {
        self.validate()?;

        let changes = PostChanges {
            slug: non_blank(self.slug),
            title: Some(require_field("title", self.title)?.trim().to_string()),
            excerpt: self.excerpt.map(|e| e.trim().to_string()),
            content: Some(require_field("content", self.content)?),
            tags: self.tags.map(ListInput::normalize),
        };
        changes.validate()?;

        let cover_image = match self.cover_image {
            Some(cover) if cover.trim().is_empty() => None,
            Some(cover) => Some(cover.trim().to_string()),
            None => original.cover_image,
        };

        Ok(BlogPost {
            slug: changes.slug.unwrap_or(original.slug),
            title: changes.title.unwrap_or(original.title),
            date: non_blank(self.date).unwrap_or(original.date),
            excerpt: changes.excerpt.unwrap_or(original.excerpt),
            content: changes.content.unwrap_or(original.content),
            author: non_blank(self.author).unwrap_or(original.author),
            tags: changes.tags.unwrap_or(original.tags),
            read_time: non_blank(self.read_time).unwrap_or(original.read_time),
            status: self.status.unwrap_or(original.status),
            views: self.views.unwrap_or(original.views),
            cover_image,
        })
    }
}

/// Normalized values an update supplies, checked with the same rules as `BlogPost`.
#[derive(Debug, Validate)]
struct PostChanges {
    #[validate(custom(function = "validate_slug"))]
    slug: Option<String>,

    #[validate(length(min = 1, max = MAX_TITLE_LENGTH, message = "Title must be between 1 and 200 characters"))]
    title: Option<String>,

    #[validate(length(max = MAX_EXCERPT_LENGTH, message = "Excerpt is too long"))]
    excerpt: Option<String>,

    #[validate(length(min = 1, message = "Content cannot be empty"))]
    content: Option<String>,

    #[validate(custom(function = "validate_tags"))]
    tags: Option<Vec<String>>,
}

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() > MAX_TAGS {
        return Err(new_validation_error("too_many_tags", "Too many tags provided"));
    }
    if tags.iter().any(|t| t.trim().is_empty() || t.len() > MAX_TAG_LENGTH) {
        return Err(new_validation_error("invalid_tag_length", "Tag length must be within allowed range"));
    }
    Ok(())
}

pub fn validate_post_date(date: &str) -> Result<(), ValidationError> {
    let date = date.trim();
    if date.is_empty() || NaiveDate::parse_from_str(date, DATE_FORMAT).is_ok() {
        return Ok(());
    }
    Err(new_validation_error("invalid_date", "Date must use the YYYY-MM-DD format"))
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

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
