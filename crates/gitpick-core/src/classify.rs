use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PickError, Result};

static COMMIT_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[|:\s]*[o*]").expect("commit row pattern is valid"));
static CURRENT_CHECKOUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[|:\s]*\*").expect("current checkout pattern is valid"));

pub fn is_commit_row(line: &str) -> bool {
    COMMIT_ROW.is_match(line)
}

pub fn is_current_checkout(line: &str) -> bool {
    CURRENT_CHECKOUT.is_match(line)
}

/// Positions of the lines that carry a node glyph, in ascending order.
pub fn commit_row_index<S: AsRef<str>>(lines: &[S]) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_commit_row(line.as_ref()))
        .map(|(idx, _)| idx)
        .collect()
}

/// Cursor position (into `rows`) of the first current-checkout row.
pub fn current_checkout<S: AsRef<str>>(lines: &[S], rows: &[usize]) -> Result<usize> {
    rows.iter()
        .position(|&raw| {
            lines
                .get(raw)
                .is_some_and(|line| is_current_checkout(line.as_ref()))
        })
        .ok_or(PickError::NoCurrentCheckout)
}
