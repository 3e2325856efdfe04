use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ViewEvent {
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ViewCount {
    pub slug: String,
    pub views: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ViewCount {
    pub fn new(slug: impl Into<String>, views: u64) -> Self {
        Self { slug: slug.into(), views, message: None }
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }
}
