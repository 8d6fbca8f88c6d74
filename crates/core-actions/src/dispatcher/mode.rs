//! Mode transitions between Normal and Insert.

use super::DispatchResult;
use crate::ModeChange;
use core_state::{EditorState, Mode};
use core_text::Position;

pub(crate) const INSERT_STATUS: &str = "-- INSERT --";
pub(crate) const NORMAL_STATUS: &str = "-- NORMAL --";

pub(crate) fn handle_mode_change(
    mc: ModeChange,
    state: &mut EditorState,
    cursor: &mut Position,
) -> DispatchResult {
    match mc {
        ModeChange::EnterInsert => {
            state.set_mode(Mode::Insert);
            state.set_status(INSERT_STATUS);
        }
        ModeChange::LeaveInsert => {
            cursor.col = cursor.col.saturating_sub(1);
            state.set_mode(Mode::Normal);
            state.set_status(NORMAL_STATUS);
        }
    }
    DispatchResult::dirty()
}

/// Drop the chord's first char (if it is still where it was typed) and leave
/// Insert mode as Esc would.
pub(crate) fn handle_chord_exit(
    at: Position,
    ch: char,
    state: &mut EditorState,
    cursor: &mut Position,
) -> DispatchResult {
    if state.buffer.char_at(at.line, at.col) == Some(ch) {
        state.buffer.delete_char(at.line, at.col);
        *cursor = at;
    }
    handle_mode_change(ModeChange::LeaveInsert, state, cursor)
}
