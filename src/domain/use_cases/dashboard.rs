use crate::{
    entities::{
        blog_post::{BlogPost, PostStatus},
        contact_me::ContactMessage,
        dashboard::{DashboardResponse, MessageStats, PostStats, ProjectStats},
        project::{Project, ProjectStatus},
    },
    errors::AppError,
    mail::Mailer,
    repositories::{
        blog_post::BlogPostRepository, contact_me::ContactMessageRepository,
        project::ProjectRepository,
    },
    use_cases::{blog::BlogPostHandler, contact::ContactHandler, projects::ProjectHandler, views::ViewCounter},
};

const TOP_VIEWED_LIMIT: usize = 5;

/// Collects the admin dashboard from every content source.
pub async fn build_dashboard<B, P, M, C>(
    blog: &BlogPostHandler<B>,
    projects: &ProjectHandler<P>,
    contact: &ContactHandler<M, C>,
    views: &ViewCounter,
) -> Result<DashboardResponse, AppError>
where
    B: BlogPostRepository,
    P: ProjectRepository,
    M: Mailer,
    C: ContactMessageRepository,
{
    let posts = blog.list_posts().await?;
    let project_list = projects.list().await?;
    let inbox = contact.list_messages().await?;

    Ok(DashboardResponse {
        posts: post_stats(&posts),
        projects: project_stats(&project_list),
        messages: message_stats(&inbox.messages),
        top_viewed: views.top(TOP_VIEWED_LIMIT),
    })
}

pub fn post_stats(posts: &[BlogPost]) -> PostStats {
    posts.iter().fold(PostStats::default(), |mut stats, post| {
        stats.total += 1;
        match post.status {
            PostStatus::Published => stats.published += 1,
            PostStatus::Draft => stats.draft += 1,
        }
        stats.stored_views = stats.stored_views.saturating_add(post.views);
        stats
    })
}

pub fn project_stats(projects: &[Project]) -> ProjectStats {
    projects.iter().fold(ProjectStats::default(), |mut stats, project| {
        stats.total += 1;
        match project.status {
            ProjectStatus::Live => stats.live += 1,
            ProjectStatus::InProgress => stats.in_progress += 1,
            ProjectStatus::Archived => stats.archived += 1,
        }
        stats
    })
}

pub fn message_stats(messages: &[ContactMessage]) -> MessageStats {
    MessageStats {
        total: messages.len(),
        unread: messages.iter().filter(|m| !m.read).count(),
        undelivered: messages.iter().filter(|m| !m.delivered).count(),
    }
}
