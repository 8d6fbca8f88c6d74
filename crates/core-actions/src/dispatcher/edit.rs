//! Text mutation in Insert mode.

use super::DispatchResult;
use crate::EditKind;
use core_state::EditorState;
use core_text::Position;

pub(crate) fn handle_edit(
    kind: EditKind,
    state: &mut EditorState,
    cursor: &mut Position,
) -> DispatchResult {
    let buf = &mut state.buffer;
    match kind {
        EditKind::InsertChar(ch) => {
            buf.insert_char(cursor.line, cursor.col, ch);
            cursor.col += 1;
        }
        EditKind::Newline => {
            buf.split_line(cursor.line, cursor.col);
            cursor.line += 1;
            cursor.col = 0;
        }
        EditKind::Backspace => {
            if cursor.col > 0 {
                buf.delete_char(cursor.line, cursor.col - 1);
                cursor.col -= 1;
            } else if cursor.line > 0 {
                let prev_len = buf.line_len(cursor.line - 1);
                buf.merge_line(cursor.line);
                cursor.line -= 1;
                cursor.col = prev_len;
            } else {
                return DispatchResult::clean();
            }
        }
    }
    state.modified = true;
    DispatchResult::dirty()
}
