use std::{path::PathBuf, sync::Arc};

use parking_lot::RwLock;

use crate::entities::contact_me::ContactMessage;

/// Blog posts stored as `<slug>.mdx` files in one directory.
#[derive(Clone)]
pub struct FsBlogPostRepo {
    pub content_dir: PathBuf,
    pub default_author: String,
}

/// Projects stored as a single JSON array document.
#[derive(Clone)]
pub struct JsonProjectRepo {
    pub path: PathBuf,
}

/// Contact submissions held for the lifetime of the process.
#[derive(Clone, Default)]
pub struct InMemoryContactRepo {
    pub messages: Arc<RwLock<Vec<ContactMessage>>>,
}
