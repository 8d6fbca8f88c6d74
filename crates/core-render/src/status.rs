//! Status and title bar composition.
//!
//! Two stages: `compose_status` produces ordered segments, `format_status`
//! joins them with `" | "`. Cursor coordinates are shown 1-based.

use core_state::Mode;

pub struct StatusContext<'a> {
    pub mode: Mode,
    pub message: Option<&'a str>,
    pub file_name: &'a str,
    pub modified: bool,
    /// 0-based cursor line.
    pub line: usize,
    /// 0-based cursor column.
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    Mode(&'static str),
    Message(&'a str),
    FileName { name: &'a str, modified: bool },
    Position { line_1: usize, col_1: usize },
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let mut segs = vec![StatusSegment::Mode(ctx.mode.label())];
    if let Some(msg) = ctx.message.filter(|m| !m.is_empty()) {
        segs.push(StatusSegment::Message(msg));
    }
    segs.push(StatusSegment::FileName {
        name: ctx.file_name,
        modified: ctx.modified,
    });
    segs.push(StatusSegment::Position {
        line_1: ctx.line + 1,
        col_1: ctx.col + 1,
    });
    segs
}

pub fn format_status(segs: &[StatusSegment<'_>]) -> String {
    let parts: Vec<String> = segs
        .iter()
        .map(|s| match s {
            StatusSegment::Mode(m) => (*m).to_string(),
            StatusSegment::Message(m) => (*m).to_string(),
            StatusSegment::FileName { name, modified } => {
                if *modified {
                    format!("{name}*")
                } else {
                    (*name).to_string()
                }
            }
            StatusSegment::Position { line_1, col_1 } => format!("Ln {line_1}, Col {col_1}"),
        })
        .collect();
    format!(" {}", parts.join(" | "))
}

pub fn title_text(file_name: &str, cols: u16, rows: u16) -> String {
    format!(" mote | {file_name} | {cols}x{rows}")
}

/// Truncate or pad `s` to exactly `width` chars.
/// Drawn in place of control characters so one char always fills one cell
/// and document text never reaches the terminal as an escape sequence.
pub const CONTROL_GLYPH: char = '?';

pub fn cell_char(ch: char) -> char {
    if ch.is_control() { CONTROL_GLYPH } else { ch }
}

pub fn fit(s: &str, width: usize) -> String {
    let mut out: String = s.chars().take(width).map(cell_char).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}
