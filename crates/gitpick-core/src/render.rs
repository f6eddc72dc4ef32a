use std::cmp::min;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::extract::extract;

pub const TOP_MARGIN: u16 = 1;
pub const LEFT_MARGIN: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PaintStyle {
    Plain,
    Selected,
    CommitId,
    Branches,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paint {
    pub row: u16,
    pub column: u16,
    pub text: String,
    pub style: PaintStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    fn visible_rows(self) -> usize {
        usize::from(self.height.saturating_sub(TOP_MARGIN))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Raw index of the first line shown.
    pub offset: usize,
    pub paints: Vec<Paint>,
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    offset: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn frame<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        selected_raw_line: usize,
        viewport: Viewport,
    ) -> Frame {
        let (start, end) = visible_window(
            lines.len(),
            selected_raw_line,
            self.offset,
            viewport.visible_rows(),
        );
        self.offset = start;

        let mut paints = Vec::new();
        for (raw, line) in lines[start..end].iter().enumerate().map(|(i, l)| (start + i, l)) {
            let row = TOP_MARGIN.saturating_add(u16::try_from(raw - start).unwrap_or(u16::MAX));
            paint_line(&mut paints, line.as_ref(), row, raw == selected_raw_line);
        }
        Frame {
            offset: start,
            paints,
        }
    }
}

fn paint_line(out: &mut Vec<Paint>, line: &str, row: u16, selected: bool) {
    if selected {
        out.push(Paint {
            row,
            column: LEFT_MARGIN,
            text: line.to_string(),
            style: PaintStyle::Selected,
        });
        return;
    }

    out.push(Paint {
        row,
        column: LEFT_MARGIN,
        text: line.to_string(),
        style: PaintStyle::Plain,
    });

    let fields = extract(line);
    if let Some(commit) = fields.commit() {
        out.push(Paint {
            row,
            column: column_at(line, commit.start),
            text: commit.text.clone(),
            style: PaintStyle::CommitId,
        });
    }
    if let Some(branches) = fields.branches() {
        // Recolor the surrounding parentheses too.
        out.push(Paint {
            row,
            column: column_at(line, branches.start.saturating_sub(1)),
            text: format!("({})", branches.text),
            style: PaintStyle::Branches,
        });
    }
}

fn column_at(line: &str, byte_offset: usize) -> u16 {
    let width = line.get(..byte_offset).map_or(0, UnicodeWidthStr::width);
    LEFT_MARGIN.saturating_add(u16::try_from(width).unwrap_or(u16::MAX))
}

fn visible_window(
    total: usize,
    selected: usize,
    current_offset: usize,
    visible_height: usize,
) -> (usize, usize) {
    if total == 0 || visible_height == 0 {
        return (0, 0);
    }

    let selected = min(selected, total.saturating_sub(1));
    let mut start = min(current_offset, total.saturating_sub(1));
    if selected < start {
        start = selected;
    }
    let window_last = start.saturating_add(visible_height.saturating_sub(1));
    if selected > window_last {
        start = selected.saturating_sub(visible_height.saturating_sub(1));
    }
    // Pull the window back when a taller viewport leaves blank rows below.
    start = min(start, total.saturating_sub(visible_height));
    let end = min(start.saturating_add(visible_height), total);
    (start, end)
}
