//! Cursor-to-viewport reconciliation.
//!
//! `reconcile` is a pure function of cursor, buffer and window size plus the
//! previous offsets. It clamps the cursor into the document and then scrolls
//! each axis by the minimum amount that brings the cursor into view. Running
//! it twice yields the same result.

use crate::layout::content_rows;
use core_text::{Buffer, Position};

/// Top-left document coordinate of the visible region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub row_offset: usize,
    pub col_offset: usize,
}

impl Viewport {
    pub fn new(row_offset: usize, col_offset: usize) -> Self {
        Self {
            row_offset,
            col_offset,
        }
    }
}

/// Minimal scroll along one axis so that `pos` lies in
/// `[offset, offset + extent)`. An empty extent pins the offset to `pos`.
pub fn scroll_into_view(offset: usize, pos: usize, extent: usize) -> usize {
    if extent == 0 || pos < offset {
        return pos;
    }
    if pos >= offset + extent {
        return pos + 1 - extent;
    }
    offset
}

/// Clamp `cursor` into `buffer` and derive offsets that keep it visible in a
/// window of `(cols, rows)` cells.
pub fn reconcile(
    cursor: Position,
    buffer: &Buffer,
    window: (u16, u16),
    prev: Viewport,
) -> (Position, Viewport) {
    let mut cursor = cursor;
    cursor.clamp_to(buffer.line_count(), |l| buffer.line_len(l));
    let (cols, rows) = window;
    let viewport = Viewport {
        row_offset: scroll_into_view(prev.row_offset, cursor.line, content_rows(rows) as usize),
        col_offset: scroll_into_view(prev.col_offset, cursor.col, cols as usize),
    };
    (cursor, viewport)
}
