use serde::Deserialize;

/// A list field that clients send either as an array or as comma-separated text.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ListInput {
    Items(Vec<String>),
    Text(String),
}

impl ListInput {
    /// Trims every entry and drops the empty ones.
    pub fn normalize(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            ListInput::Items(items) => items,
            ListInput::Text(text) => text.split(',').map(str::to_string).collect(),
        };

        raw.into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

impl Default for ListInput {
    fn default() -> Self {
        ListInput::Items(Vec::new())
    }
}
