//! Cursor motions. `h`/`l` stay on the line; the arrow variants wrap.

use super::DispatchResult;
use crate::MotionKind;
use core_state::EditorState;
use core_text::Position;

pub(crate) fn handle_motion(
    kind: MotionKind,
    state: &EditorState,
    cursor: &mut Position,
) -> DispatchResult {
    let buf = &state.buffer;
    let before = *cursor;
    let len = buf.line_len(cursor.line);
    match kind {
        MotionKind::Left => cursor.col = cursor.col.saturating_sub(1),
        MotionKind::Right => {
            if cursor.col < len {
                cursor.col += 1;
            }
        }
        MotionKind::Up => cursor.line = cursor.line.saturating_sub(1),
        MotionKind::Down => {
            if cursor.line + 1 < buf.line_count() {
                cursor.line += 1;
            }
        }
        MotionKind::LeftWrap => {
            if cursor.col > 0 {
                cursor.col -= 1;
            } else if cursor.line > 0 {
                cursor.line -= 1;
                cursor.col = buf.line_len(cursor.line);
            }
        }
        MotionKind::RightWrap => {
            if cursor.col < len {
                cursor.col += 1;
            } else if cursor.line + 1 < buf.line_count() {
                cursor.line += 1;
                cursor.col = 0;
            }
        }
    }
    cursor.clamp_to(buf.line_count(), |l| buf.line_len(l));
    if *cursor == before {
        DispatchResult::clean()
    } else {
        DispatchResult::dirty()
    }
}
