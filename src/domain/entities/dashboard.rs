use serde::Serialize;

use crate::entities::views::ViewCount;

#[derive(Debug, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostStats {
    pub total: usize,
    pub published: usize,
    pub draft: usize,
    /// Sum of the `views` stored in each post file.
    pub stored_views: u64,
}

#[derive(Debug, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total: usize,
    pub live: usize,
    pub in_progress: usize,
    pub archived: usize,
}

#[derive(Debug, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageStats {
    pub total: usize,
    pub unread: usize,
    pub undelivered: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub posts: PostStats,
    pub projects: ProjectStats,
    pub messages: MessageStats,
    /// Live counts since the process started, highest first.
    pub top_viewed: Vec<ViewCount>,
}
