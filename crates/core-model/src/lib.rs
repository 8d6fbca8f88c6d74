//! Editor model: the editor state plus its single view onto the screen.
//!
//! `EditorState` owns the document and the modal bits; the model adds the
//! presentation state (cursor, scroll offsets, last known window size).
//!
//! Invariants (hold after every call to `reconcile`):
//! * the cursor addresses a valid line and a column in `[0, line_len]`;
//! * the cursor lies inside the viewport whenever the content region and the
//!   window width are non-zero.

use core_state::EditorState;
use core_text::Position;

mod layout;
mod viewport;
pub use layout::{Layout, LayoutRegion, RESERVED_ROWS, content_rows};
pub use viewport::{Viewport, reconcile, scroll_into_view};

/// Fallback window size used until the terminal reports one.
pub const DEFAULT_WINDOW: (u16, u16) = (80, 24);

#[derive(Debug)]
pub struct EditorModel {
    state: EditorState,
    cursor: Position,
    viewport: Viewport,
    window: (u16, u16),
}

impl EditorModel {
    pub fn new(state: EditorState) -> Self {
        Self::with_window(state, DEFAULT_WINDOW)
    }

    pub fn with_window(state: EditorState, window: (u16, u16)) -> Self {
        let mut model = Self {
            state,
            cursor: Position::origin(),
            viewport: Viewport::default(),
            window,
        };
        model.reconcile();
        model
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }
    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }
    /// Move the cursor without clamping; callers follow up with `reconcile`.
    pub fn set_cursor(&mut self, cursor: Position) {
        self.cursor = cursor;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn window(&self) -> (u16, u16) {
        self.window
    }

    pub fn layout(&self) -> Layout {
        Layout::for_window(self.window.0, self.window.1)
    }

    /// Record a new window size and re-derive the viewport. Always marks the
    /// frame dirty since every region moves.
    pub fn set_window(&mut self, cols: u16, rows: u16) {
        self.window = (cols, rows);
        self.reconcile();
        self.state.buffer.set_dirty(true);
    }

    /// Mutable state and cursor at once, for edits that move the cursor.
    pub fn split_state_and_cursor(&mut self) -> (&mut EditorState, &mut Position) {
        (&mut self.state, &mut self.cursor)
    }

    /// Clamp the cursor and scroll it into view. Marks the buffer dirty and
    /// returns true when either the cursor or the offsets changed.
    pub fn reconcile(&mut self) -> bool {
        let (cursor, viewport) =
            reconcile(self.cursor, &self.state.buffer, self.window, self.viewport);
        let changed = cursor != self.cursor || viewport != self.viewport;
        self.cursor = cursor;
        self.viewport = viewport;
        if changed {
            self.state.buffer.set_dirty(true);
        }
        changed
    }
}
