use std::cmp::min;

use crate::error::{PickError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    MoveUp,
    MoveDown,
    MoveTop,
    MoveBottom,
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Cursor may have moved; repaint with `raw_line` highlighted.
    Redraw { raw_line: usize },
    Confirm {
        raw_line: usize,
        changed: bool,
    },
    Cancel,
}

// `cursor` indexes `rows`; `rows` holds raw line positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    rows: Vec<usize>,
    cursor: usize,
    initial: usize,
}

impl Navigator {
    pub fn new(rows: Vec<usize>, initial: usize) -> Result<Self> {
        if initial >= rows.len() {
            return Err(PickError::NoCurrentCheckout);
        }
        Ok(Self {
            rows,
            cursor: initial,
            initial,
        })
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn initial(&self) -> usize {
        self.initial
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selected_raw_line(&self) -> usize {
        self.rows[self.cursor]
    }

    pub fn apply(&mut self, event: NavEvent) -> Transition {
        let last = self.rows.len().saturating_sub(1);
        match event {
            NavEvent::MoveUp => self.cursor = self.cursor.saturating_sub(1),
            NavEvent::MoveDown => self.cursor = min(self.cursor + 1, last),
            NavEvent::MoveTop => self.cursor = 0,
            NavEvent::MoveBottom => self.cursor = last,
            NavEvent::Confirm => {
                return Transition::Confirm {
                    raw_line: self.selected_raw_line(),
                    changed: self.cursor != self.initial,
                };
            }
            NavEvent::Cancel => return Transition::Cancel,
        }
        Transition::Redraw {
            raw_line: self.selected_raw_line(),
        }
    }
}
