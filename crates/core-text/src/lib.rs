//! Rope-backed line buffer.
//!
//! The document is an ordered sequence of lines stored in a single
//! `ropey::Rope` joined by `'\n'`. Columns are `char` indices into a line; a
//! column equal to the line length is the "after last character" position.
//!
//! Invariants:
//! * There is always at least one line (an empty rope is one empty line).
//! * Lines never contain `'\n'`; every mutation that would smuggle one in is
//!   rejected.
//! * Out-of-range mutations are silent no-ops. Callers clamp first; the checks
//!   here only keep a stray index from corrupting the rope.
//!
//! The dirty flag lives on the buffer but is not cleared by any mutation. The
//! renderer clears it after a complete frame, which lets a caller batch several
//! mutations under one redraw.

use ropey::Rope;

/// Logical cursor position: line index and `char` column within that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    pub fn origin() -> Self {
        Self { line: 0, col: 0 }
    }

    /// Clamp into `[0, line_count)` x `[0, line_len(line)]`.
    pub fn clamp_to<F>(&mut self, line_count: usize, mut line_len_fn: F)
    where
        F: FnMut(usize) -> usize,
    {
        if line_count == 0 {
            self.line = 0;
            self.col = 0;
            return;
        }
        if self.line >= line_count {
            self.line = line_count - 1;
        }
        let max_len = line_len_fn(self.line);
        if self.col > max_len {
            self.col = max_len;
        }
    }
}

/// A text document backed by a `ropey::Rope`.
#[derive(Debug, Clone)]
pub struct Buffer {
    rope: Rope,
    dirty: bool,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// Empty document: one line of zero length. Starts dirty so the first
    /// frame is drawn.
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            dirty: true,
        }
    }

    /// Build from text where lines are separated by `'\n'`. A single trailing
    /// newline terminates the last line instead of opening a new one.
    pub fn from_text(text: &str) -> Self {
        let body = text.strip_suffix('\n').unwrap_or(text);
        Self {
            rope: Rope::from_str(body),
            dirty: true,
        }
    }

    /// Build from already split lines. An empty iterator yields one empty line.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut joined = String::new();
        for (idx, line) in lines.into_iter().enumerate() {
            if idx > 0 {
                joined.push('\n');
            }
            // A stray newline inside an element would break the line mapping.
            joined.extend(line.as_ref().chars().filter(|c| *c != '\n'));
        }
        Self {
            rope: Rope::from_str(&joined),
            dirty: true,
        }
    }

    /// Total number of lines (always >= 1).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Length of line `row` in chars, excluding the separator. 0 for an invalid row.
    pub fn line_len(&self, row: usize) -> usize {
        if row >= self.line_count() {
            return 0;
        }
        let line = self.rope.line(row);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// Content of line `row` without its separator.
    pub fn line(&self, row: usize) -> Option<String> {
        if row >= self.line_count() {
            return None;
        }
        let mut s = self.rope.line(row).to_string();
        if s.ends_with('\n') {
            s.pop();
        }
        Some(s)
    }

    /// Char at `(row, col)`; `None` past the end of the line.
    pub fn char_at(&self, row: usize, col: usize) -> Option<char> {
        if col >= self.line_len(row) {
            return None;
        }
        Some(self.rope.char(self.rope.line_to_char(row) + col))
    }

    /// Iterate every line as an owned `String`.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.line_count()).filter_map(move |row| self.line(row))
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// Insert `text` as a new line at `row`. `row == line_count` appends.
    pub fn insert_line(&mut self, row: usize, text: &str) {
        let count = self.line_count();
        if row > count || text.contains('\n') {
            return;
        }
        if row == count {
            let end = self.rope.len_chars();
            self.rope.insert(end, &format!("\n{text}"));
        } else {
            let start = self.rope.line_to_char(row);
            self.rope.insert(start, &format!("{text}\n"));
        }
        self.dirty = true;
    }

    /// Insert `ch` before column `col` of line `row`.
    pub fn insert_char(&mut self, row: usize, col: usize, ch: char) {
        if ch == '\n' || row >= self.line_count() || col > self.line_len(row) {
            return;
        }
        let idx = self.rope.line_to_char(row) + col;
        self.rope.insert_char(idx, ch);
        self.dirty = true;
    }

    /// Remove the char at column `col` of line `row`.
    pub fn delete_char(&mut self, row: usize, col: usize) {
        if row >= self.line_count() || col >= self.line_len(row) {
            return;
        }
        let idx = self.rope.line_to_char(row) + col;
        self.rope.remove(idx..idx + 1);
        self.dirty = true;
    }

    /// Split line `row` at `col` (clamped to the line length); the tail becomes
    /// line `row + 1`.
    pub fn split_line(&mut self, row: usize, col: usize) {
        if row >= self.line_count() {
            return;
        }
        let col = col.min(self.line_len(row));
        let idx = self.rope.line_to_char(row) + col;
        self.rope.insert_char(idx, '\n');
        self.dirty = true;
    }

    /// Append line `row` onto line `row - 1` and remove it.
    pub fn merge_line(&mut self, row: usize) {
        if row == 0 || row >= self.line_count() {
            return;
        }
        // The separator ending line `row - 1` sits just before line `row`.
        let sep = self.rope.line_to_char(row) - 1;
        self.rope.remove(sep..sep + 1);
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(b: &Buffer) -> Vec<String> {
        b.lines().collect()
    }

    #[test]
    fn new_buffer_has_one_empty_line() {
        let b = Buffer::new();
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line_len(0), 0);
        assert_eq!(b.line(0).as_deref(), Some(""));
        assert!(b.is_dirty(), "first frame must draw");
    }

    #[test]
    fn from_text_drops_single_trailing_newline() {
        let b = Buffer::from_text("ab\ncd\n");
        assert_eq!(contents(&b), vec!["ab", "cd"]);
        let b = Buffer::from_text("ab\n\n");
        assert_eq!(contents(&b), vec!["ab", ""]);
    }

    #[test]
    fn from_lines_empty_iterator() {
        let b = Buffer::from_lines(Vec::<String>::new());
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line_len(0), 0);
    }

    #[test]
    fn carriage_return_is_not_a_line_break() {
        let b = Buffer::from_text("a\rb");
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line_len(0), 3);
    }

    #[test]
    fn insert_line_at_end_appends() {
        let mut b = Buffer::from_text("a");
        b.insert_line(1, "b");
        b.insert_line(0, "z");
        assert_eq!(contents(&b), vec!["z", "a", "b"]);
    }

    #[test]
    fn insert_line_out_of_range_is_noop() {
        let mut b = Buffer::from_text("a");
        b.set_dirty(false);
        b.insert_line(5, "x");
        b.insert_line(0, "bad\nline");
        assert_eq!(contents(&b), vec!["a"]);
        assert!(!b.is_dirty());
    }

    #[test]
    fn insert_char_at_line_end() {
        let mut b = Buffer::from_text("ab");
        b.insert_char(0, 2, 'c');
        b.insert_char(0, 0, '>');
        assert_eq!(b.line(0).as_deref(), Some(">abc"));
    }

    #[test]
    fn insert_char_out_of_range_is_noop() {
        let mut b = Buffer::from_text("ab");
        b.set_dirty(false);
        b.insert_char(0, 3, 'x');
        b.insert_char(1, 0, 'x');
        b.insert_char(0, 0, '\n');
        assert_eq!(contents(&b), vec!["ab"]);
        assert!(!b.is_dirty());
    }

    #[test]
    fn delete_char_bounds() {
        let mut b = Buffer::from_text("abc");
        b.set_dirty(false);
        b.delete_char(0, 3);
        b.delete_char(2, 0);
        assert!(!b.is_dirty());
        b.delete_char(0, 1);
        assert_eq!(b.line(0).as_deref(), Some("ac"));
        assert!(b.is_dirty());
    }

    #[test]
    fn delete_char_never_eats_separator() {
        let mut b = Buffer::from_text("a\nb");
        b.delete_char(0, 1);
        assert_eq!(contents(&b), vec!["a", "b"]);
    }

    #[test]
    fn split_line_middle_and_end() {
        let mut b = Buffer::from_text("abcd");
        b.split_line(0, 2);
        assert_eq!(contents(&b), vec!["ab", "cd"]);
        b.split_line(1, 99);
        assert_eq!(contents(&b), vec!["ab", "cd", ""]);
    }

    #[test]
    fn split_line_invalid_row_is_noop() {
        let mut b = Buffer::from_text("ab");
        b.split_line(3, 0);
        assert_eq!(contents(&b), vec!["ab"]);
    }

    #[test]
    fn merge_line_joins_previous() {
        let mut b = Buffer::from_text("ab\ncd\nef");
        b.merge_line(2);
        assert_eq!(contents(&b), vec!["ab", "cdef"]);
        b.merge_line(1);
        assert_eq!(contents(&b), vec!["abcdef"]);
    }

    #[test]
    fn merge_line_bounds() {
        let mut b = Buffer::from_text("ab\ncd");
        b.set_dirty(false);
        b.merge_line(0);
        b.merge_line(2);
        assert_eq!(contents(&b), vec!["ab", "cd"]);
        assert!(!b.is_dirty());
    }

    #[test]
    fn merge_last_line_when_empty() {
        let mut b = Buffer::from_text("ab\n\n");
        assert_eq!(b.line_count(), 2);
        b.merge_line(1);
        assert_eq!(contents(&b), vec!["ab"]);
    }

    #[test]
    fn char_at_and_line_queries() {
        let b = Buffer::from_text("xy\nz");
        assert_eq!(b.char_at(0, 1), Some('y'));
        assert_eq!(b.char_at(0, 2), None);
        assert_eq!(b.char_at(9, 0), None);
        assert_eq!(b.line_len(9), 0);
        assert_eq!(b.line(9), None);
    }

    #[test]
    fn multibyte_chars_use_char_columns() {
        let mut b = Buffer::from_text("héllo");
        assert_eq!(b.line_len(0), 5);
        b.delete_char(0, 1);
        assert_eq!(b.line(0).as_deref(), Some("hllo"));
    }

    #[test]
    fn position_clamp() {
        let b = Buffer::from_text("abc\nd");
        let mut p = Position::new(7, 9);
        p.clamp_to(b.line_count(), |l| b.line_len(l));
        assert_eq!(p, Position::new(1, 1));
        let mut p = Position::new(0, 9);
        p.clamp_to(b.line_count(), |l| b.line_len(l));
        assert_eq!(p, Position::new(0, 3));
        let mut p = Position::new(3, 3);
        p.clamp_to(0, |_| 0);
        assert_eq!(p, Position::origin());
    }
}
