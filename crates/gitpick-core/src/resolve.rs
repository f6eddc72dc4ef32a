use crate::error::{PickError, Result};
use crate::extract::{ExtractedFields, extract};
use crate::sanitize::sanitize;

pub const DEFAULT_REMOTE_NAME: &str = "origin";

/// Picks the checkout target for a commit row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolver {
    remote_prefix: String,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(DEFAULT_REMOTE_NAME)
    }
}

impl Resolver {
    pub fn new(remote_name: &str) -> Self {
        Self {
            remote_prefix: format!("{}/", remote_name.trim_end_matches('/')),
        }
    }

    pub fn remote_prefix(&self) -> &str {
        &self.remote_prefix
    }

    pub fn resolve(&self, line: &str) -> Result<String> {
        let clean = sanitize(line);
        let clean = clean.trim();
        self.resolve_fields(&extract(clean))
            .ok_or_else(|| PickError::UnresolvableReference {
                line: clean.to_string(),
            })
    }

    /// Local branch first, then any branch, then the bare commit id.
    pub fn resolve_fields(&self, fields: &ExtractedFields) -> Option<String> {
        if let Some(branches) = fields.branches() {
            let names = branches
                .text
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .collect::<Vec<_>>();
            let local = names
                .iter()
                .find(|name| !name.starts_with(self.remote_prefix.as_str()));
            if let Some(name) = local.or(names.first()) {
                return Some((*name).to_string());
            }
        }
        fields.commit().map(|commit| commit.text.clone())
    }
}

pub fn resolve(line: &str) -> Result<String> {
    Resolver::default().resolve(line)
}
