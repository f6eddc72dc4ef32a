use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use serde::Serialize;

use crate::classify::{commit_row_index, current_checkout};
use crate::error::{PickError, Result};
use crate::extract::{ExtractedFields, extract};
use crate::sanitize::sanitize_lines;
use crate::session::LogSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Smartlog {
    lines: Vec<String>,
    rows: Vec<usize>,
    current: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRow<'a> {
    pub raw_index: usize,
    pub line: &'a str,
    pub current: bool,
    pub fields: ExtractedFields,
}

impl Smartlog {
    pub fn from_lines<I, S>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = sanitize_lines(raw);
        if lines.is_empty() {
            return Err(PickError::source_unavailable("log source produced no output"));
        }
        let rows = commit_row_index(&lines);
        let current = current_checkout(&lines, &rows)?;
        Ok(Self {
            lines,
            rows,
            current,
        })
    }

    pub fn load(source: &mut dyn LogSource) -> Result<Self> {
        Self::from_lines(source.read_lines()?)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Cursor position of the current checkout within [`Self::rows`].
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn line(&self, raw_index: usize) -> Option<&str> {
        self.lines.get(raw_index).map(String::as_str)
    }

    pub fn commit_rows(&self) -> impl Iterator<Item = CommitRow<'_>> {
        self.rows.iter().enumerate().map(|(cursor, &raw_index)| {
            let line = self.lines[raw_index].as_str();
            CommitRow {
                raw_index,
                line,
                current: cursor == self.current,
                fields: extract(line),
            }
        })
    }
}

/// Reads log lines from a file, or from stdin when the path is `-`.
#[derive(Debug, Clone)]
pub struct FileLogSource {
    path: PathBuf,
}

impl FileLogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LogSource for FileLogSource {
    fn read_lines(&mut self) -> Result<Vec<String>> {
        let text = if self.path.as_os_str() == "-" {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).map_err(|err| {
                PickError::source_unavailable(format!("could not read stdin: {err}"))
            })?;
            buf
        } else {
            fs::read_to_string(&self.path).map_err(|err| {
                PickError::source_unavailable(format!(
                    "could not read {}: {err}",
                    self.path.display()
                ))
            })?
        };
        Ok(text.lines().map(ToString::to_string).collect())
    }
}
