//! Compiled-in providers.

use crate::{Highlight, HighlightPlugin, PluginSpec};
use core_events::KeyEvent;
use core_text::{Buffer, Position};
use crossterm::style::Color;

/// Marks spaces and tabs at the end of every line.
#[derive(Debug, Clone)]
pub struct TrailingWhitespace {
    name: String,
    color: Color,
}

impl TrailingWhitespace {
    pub const PROVIDER: &'static str = "trailing-whitespace";

    pub fn from_spec(spec: &PluginSpec) -> Self {
        Self {
            name: spec.name.clone(),
            color: spec.color.unwrap_or(Color::Red),
        }
    }
}

impl HighlightPlugin for TrailingWhitespace {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute_highlights(&self, buffer: &Buffer, _cursor: Position) -> Vec<Highlight> {
        let mut out = Vec::new();
        for (row, line) in buffer.lines().enumerate() {
            let len = line.chars().count();
            let trailing = line
                .chars()
                .rev()
                .take_while(|c| matches!(c, ' ' | '\t'))
                .count();
            out.extend((len - trailing..len).map(|col| Highlight::new(row, col, self.color)));
        }
        out
    }
}

/// Highlights the bracket under (or just before) the cursor together with its
/// partner. Nothing is drawn for an unbalanced bracket.
#[derive(Debug, Clone)]
pub struct BracketMatch {
    name: String,
    color: Color,
}

const PAIRS: [(char, char); 3] = [('(', ')'), ('[', ']'), ('{', '}')];

impl BracketMatch {
    pub const PROVIDER: &'static str = "bracket-match";

    pub fn from_spec(spec: &PluginSpec) -> Self {
        Self {
            name: spec.name.clone(),
            color: spec.color.unwrap_or(Color::Yellow),
        }
    }

    fn anchor(buffer: &Buffer, cursor: Position) -> Option<(Position, char)> {
        let under = buffer
            .char_at(cursor.line, cursor.col)
            .filter(|c| is_bracket(*c))
            .map(|c| (cursor, c));
        under.or_else(|| {
            let col = cursor.col.checked_sub(1)?;
            let c = buffer.char_at(cursor.line, col)?;
            is_bracket(c).then_some((Position::new(cursor.line, col), c))
        })
    }
}

fn is_bracket(c: char) -> bool {
    PAIRS.iter().any(|(o, cl)| c == *o || c == *cl)
}

/// Scan from `from` (exclusive) for the partner of `bracket`.
fn find_partner(buffer: &Buffer, from: Position, bracket: char) -> Option<Position> {
    let (open, close, forward) = PAIRS.iter().find_map(|&(o, c)| {
        if bracket == o {
            Some((o, c, true))
        } else if bracket == c {
            Some((o, c, false))
        } else {
            None
        }
    })?;
    let mut depth = 0usize;
    let mut visit = |row: usize, col: usize, ch: char| -> Option<Position> {
        let (same, other) = if forward { (open, close) } else { (close, open) };
        if ch == same {
            depth += 1;
        } else if ch == other {
            if depth == 0 {
                return Some(Position::new(row, col));
            }
            depth -= 1;
        }
        None
    };
    if forward {
        for row in from.line..buffer.line_count() {
            let line: Vec<char> = buffer.line(row)?.chars().collect();
            let start = if row == from.line { from.col + 1 } else { 0 };
            for (col, ch) in line.iter().enumerate().skip(start) {
                if let Some(p) = visit(row, col, *ch) {
                    return Some(p);
                }
            }
        }
    } else {
        for row in (0..=from.line).rev() {
            let line: Vec<char> = buffer.line(row)?.chars().collect();
            let end = if row == from.line { from.col } else { line.len() };
            for col in (0..end).rev() {
                if let Some(p) = visit(row, col, line[col]) {
                    return Some(p);
                }
            }
        }
    }
    None
}

impl HighlightPlugin for BracketMatch {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute_highlights(&self, buffer: &Buffer, cursor: Position) -> Vec<Highlight> {
        let Some((at, bracket)) = Self::anchor(buffer, cursor) else {
            return Vec::new();
        };
        match find_partner(buffer, at, bracket) {
            Some(partner) => vec![
                Highlight::new(at.line, at.col, self.color),
                Highlight::new(partner.line, partner.col, self.color),
            ],
            None => Vec::new(),
        }
    }
}

/// Types the closing partner of an opening bracket and leaves the cursor
/// between the two. Typing a closing bracket right before the same closer
/// steps over it instead of doubling it.
#[derive(Debug, Clone)]
pub struct AutoClose {
    name: String,
}

impl AutoClose {
    pub const PROVIDER: &'static str = "auto-close";

    pub fn from_spec(spec: &PluginSpec) -> Self {
        Self {
            name: spec.name.clone(),
        }
    }
}

impl HighlightPlugin for AutoClose {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute_highlights(&self, _buffer: &Buffer, _cursor: Position) -> Vec<Highlight> {
        Vec::new()
    }

    fn on_key_press(
        &mut self,
        key: &KeyEvent,
        buffer: &mut Buffer,
        cursor: &mut Position,
    ) -> bool {
        let Some(c) = key.printable() else {
            return false;
        };
        if let Some(&(open, close)) = PAIRS.iter().find(|(o, _)| *o == c) {
            buffer.insert_char(cursor.line, cursor.col, open);
            buffer.insert_char(cursor.line, cursor.col + 1, close);
            cursor.col += 1;
            return true;
        }
        if PAIRS.iter().any(|(_, cl)| *cl == c)
            && buffer.char_at(cursor.line, cursor.col) == Some(c)
        {
            cursor.col += 1;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tw() -> TrailingWhitespace {
        TrailingWhitespace::from_spec(&PluginSpec::named("tw"))
    }

    fn bm() -> BracketMatch {
        BracketMatch::from_spec(&PluginSpec::named("bm"))
    }

    fn cells(hs: &[Highlight]) -> Vec<(usize, usize)> {
        hs.iter().map(|h| (h.row, h.col)).collect()
    }

    #[test]
    fn trailing_whitespace_cells() {
        let b = Buffer::from_text("ab  \nclean\n \t");
        let hs = tw().compute_highlights(&b, Position::origin());
        assert_eq!(cells(&hs), vec![(0, 2), (0, 3), (2, 0), (2, 1)]);
        assert!(hs.iter().all(|h| h.color == Color::Red));
    }

    #[test]
    fn color_override() {
        let spec = PluginSpec {
            name: "x".into(),
            color: Some(Color::Green),
        };
        let b = Buffer::from_text("a ");
        let hs = TrailingWhitespace::from_spec(&spec).compute_highlights(&b, Position::origin());
        assert_eq!(hs, vec![Highlight::new(0, 1, Color::Green)]);
    }

    #[test]
    fn bracket_under_cursor_forward_across_lines() {
        let b = Buffer::from_text("f(a,\n (b))");
        let hs = bm().compute_highlights(&b, Position::new(0, 1));
        assert_eq!(cells(&hs), vec![(0, 1), (1, 4)]);
    }

    #[test]
    fn bracket_before_cursor_backward() {
        let b = Buffer::from_text("{ [x] }");
        // Cursor just after the closing `]`.
        let hs = bm().compute_highlights(&b, Position::new(0, 5));
        assert_eq!(cells(&hs), vec![(0, 4), (0, 2)]);
        let hs = bm().compute_highlights(&b, Position::new(0, 6));
        assert_eq!(cells(&hs), vec![(0, 6), (0, 0)]);
    }

    #[test]
    fn unbalanced_or_no_bracket() {
        let b = Buffer::from_text("(abc");
        assert!(bm().compute_highlights(&b, Position::new(0, 0)).is_empty());
        assert!(bm().compute_highlights(&b, Position::new(0, 2)).is_empty());
    }

    fn ac() -> AutoClose {
        AutoClose::from_spec(&PluginSpec::named("ac"))
    }

    #[test]
    fn auto_close_inserts_pair_and_steps_inside() {
        let mut b = Buffer::from_text("f");
        let mut cur = Position::new(0, 1);
        assert!(ac().on_key_press(&KeyEvent::ch('('), &mut b, &mut cur));
        assert_eq!(b.line(0).as_deref(), Some("f()"));
        assert_eq!(cur, Position::new(0, 2));
    }

    #[test]
    fn auto_close_steps_over_existing_closer() {
        let mut b = Buffer::from_text("[]");
        let mut cur = Position::new(0, 1);
        assert!(ac().on_key_press(&KeyEvent::ch(']'), &mut b, &mut cur));
        assert_eq!(b.line(0).as_deref(), Some("[]"));
        assert_eq!(cur, Position::new(0, 2));
    }

    #[test]
    fn auto_close_ignores_other_keys() {
        let mut b = Buffer::from_text("ab");
        b.set_dirty(false);
        let mut cur = Position::new(0, 2);
        let mut p = ac();
        assert!(!p.on_key_press(&KeyEvent::ch('x'), &mut b, &mut cur));
        assert!(!p.on_key_press(&KeyEvent::ch(')'), &mut b, &mut cur));
        let enter = KeyEvent::plain(core_events::KeyCode::Enter);
        assert!(!p.on_key_press(&enter, &mut b, &mut cur));
        assert_eq!(cur, Position::new(0, 2));
        assert!(!b.is_dirty());
    }
}
