//! Metadata block at the top of a content file.
//!
//! ```text
//! ---
//! title: "Getting Started"
//! tags: ["rust", "web"]
//! views: "0"
//! ---
//!
//! Body text...
//! ```

const DELIMITER: &str = "---";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: Vec<(String, FieldValue)>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits `source` into its metadata block and body.
    ///
    /// A source without a closing delimiter is treated as all body.
    pub fn parse(source: &str) -> (FrontMatter, &str) {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);

        let mut lines = source.split_inclusive('\n');
        let Some(first) = lines.next() else {
            return (FrontMatter::default(), source);
        };
        if first.trim_end() != DELIMITER {
            return (FrontMatter::default(), source);
        }

        let mut consumed = first.len();
        let mut block = Vec::new();
        let mut closed = false;

        for line in lines {
            consumed += line.len();
            if line.trim_end() == DELIMITER {
                closed = true;
                break;
            }
            block.push(line);
        }

        if !closed {
            return (FrontMatter::default(), source);
        }

        let fields = block.into_iter().filter_map(parse_line).collect();
        let body = source[consumed..].trim_start_matches(['\r', '\n']);

        (FrontMatter { fields }, body)
    }

    /// Last non-empty text value for `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .and_then(|(_, value)| match value {
                FieldValue::Text(s) if !s.trim().is_empty() => Some(s.as_str()),
                _ => None,
            })
    }

    /// List value for `key`. Plain text is read as a comma-separated list.
    pub fn list(&self, key: &str) -> Option<Vec<String>> {
        self.fields
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, value)| match value {
                FieldValue::List(items) => items.clone(),
                FieldValue::Text(s) => split_items(s),
            })
    }

    pub fn set_text(&mut self, key: &str, value: impl Into<String>) {
        self.set(key, FieldValue::Text(value.into()));
    }

    pub fn set_list(&mut self, key: &str, items: Vec<String>) {
        self.set(key, FieldValue::List(items));
    }

    fn set(&mut self, key: &str, value: FieldValue) {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }

    /// Writes the block followed by `body`. Every value is quoted.
    pub fn render(&self, body: &str) -> String {
        let mut out = String::with_capacity(body.len() + 256);
        out.push_str(DELIMITER);
        out.push('\n');

        for (key, value) in &self.fields {
            out.push_str(key);
            out.push_str(": ");
            match value {
                FieldValue::Text(s) => out.push_str(&quote(s)),
                FieldValue::List(items) => {
                    let quoted: Vec<String> = items.iter().map(|i| quote(i)).collect();
                    out.push('[');
                    out.push_str(&quoted.join(", "));
                    out.push(']');
                }
            }
            out.push('\n');
        }

        out.push_str(DELIMITER);
        out.push_str("\n\n");
        out.push_str(body.trim_end());
        out.push('\n');
        out
    }
}

fn parse_line(line: &str) -> Option<(String, FieldValue)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, raw) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return None;
    }

    Some((key.to_string(), parse_value(raw.trim())))
}

fn parse_value(raw: &str) -> FieldValue {
    if let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        let items = split_outside_quotes(inner)
            .into_iter()
            .map(|item| unquote(item.trim()))
            .filter(|item| !item.trim().is_empty())
            .collect();
        return FieldValue::List(items);
    }

    FieldValue::Text(unquote(raw))
}

fn unquote(raw: &str) -> String {
    if raw.len() >= 2 {
        if let Some(inner) = raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
            return unescape(inner);
        }
        if let Some(inner) = raw.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')) {
            return inner.to_string();
        }
    }
    raw.to_string()
}

fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next @ ('"' | '\\')) => out.push(next),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn split_outside_quotes(inner: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (idx, c) in inner.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (Some('"'), '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (None, '"' | '\'') => quote = Some(c),
            (None, ',') => {
                parts.push(&inner[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&inner[start..]);
    parts
}

fn split_items(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn quote(value: &str) -> String {
    let flat = value.replace(['\r', '\n'], " ");
    format!("\"{}\"", flat.replace('\\', "\\\\").replace('"', "\\\""))
}
