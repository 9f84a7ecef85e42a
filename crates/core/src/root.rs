use std::fmt;

/// Backend root of a bucket: the bucket/container name plus an optional key
/// prefix scoping every operation to a "sub-bucket".
///
/// Parsed from identifiers of the form `name` or `name/sub/path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketRoot {
    name: String,
    prefix: String,
}

impl BucketRoot {
    pub fn parse(identifier: &str) -> Self {
        let mut parts = identifier.splitn(2, '/');
        let name = parts.next().unwrap_or_default().to_string();
        let prefix = match parts.next().map(|rest| rest.trim_end_matches('/')) {
            Some(rest) if !rest.is_empty() => format!("{rest}/"),
            _ => String::new(),
        };
        Self { name, prefix }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key prefix, either empty or ending in exactly one `/`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Backend key for a caller key. Plain concatenation, the key is never
    /// normalized.
    pub fn key(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }

    /// Listing prefix for an optional folder.
    pub fn scope(&self, folder: Option<&str>) -> String {
        match folder {
            Some(folder) if !folder.is_empty() => format!("{}{folder}/", self.prefix),
            _ => self.prefix.clone(),
        }
    }
}

impl fmt::Display for BucketRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}/{}", self.name, self.prefix.trim_end_matches('/'))
        }
    }
}
