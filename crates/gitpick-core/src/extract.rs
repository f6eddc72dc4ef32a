use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static COMMIT_FIELDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[|:\s]*[o*]\s+(?P<commit>\S+)\s+(?P<author>\S+)\s*(?:\((?P<branches>.*)\)\s*)?(?P<time>.*)$",
    )
    .expect("commit field pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Commit,
    Author,
    Branches,
    Time,
}

impl FieldName {
    pub const ALL: [FieldName; 4] = [Self::Commit, Self::Author, Self::Branches, Self::Time];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Commit => "commit",
            Self::Author => "author",
            Self::Branches => "branches",
            Self::Time => "time",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Byte range of a field in its sanitized line; excludes the branch parentheses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpan {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedFields {
    fields: BTreeMap<FieldName, FieldSpan>,
}

impl ExtractedFields {
    pub fn get(&self, name: FieldName) -> Option<&FieldSpan> {
        self.fields.get(&name)
    }

    pub fn commit(&self) -> Option<&FieldSpan> {
        self.get(FieldName::Commit)
    }

    pub fn branches(&self) -> Option<&FieldSpan> {
        self.get(FieldName::Branches)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &FieldSpan)> {
        self.fields.iter().map(|(name, span)| (*name, span))
    }
}

pub fn extract(line: &str) -> ExtractedFields {
    let Some(caps) = COMMIT_FIELDS.captures(line) else {
        return ExtractedFields::default();
    };

    let fields = FieldName::ALL
        .into_iter()
        .filter_map(|name| {
            let m = caps.name(name.as_str())?;
            if m.is_empty() {
                return None;
            }
            Some((
                name,
                FieldSpan {
                    text: m.as_str().to_string(),
                    start: m.start(),
                    end: m.end(),
                },
            ))
        })
        .collect();
    ExtractedFields { fields }
}
