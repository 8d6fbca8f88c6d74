//! Frame writer.
//!
//! Collects drawing commands for one frame and encodes them into a single
//! byte buffer, which the backend receives in one `write`. Commands keep their
//! order; positions are absolute 0-based cells.

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal::{Clear, ClearType},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    /// Clear the row the cursor is on.
    ClearLine,
    Print(String),
    Foreground(Color),
    Background(Color),
    Reverse,
    /// Reset colors and attributes.
    Reset,
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }
    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }
    pub fn clear_line(&mut self) {
        self.cmds.push(Command::ClearLine);
    }
    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }
    pub fn fg(&mut self, color: Color) {
        self.cmds.push(Command::Foreground(color));
    }
    pub fn bg(&mut self, color: Color) {
        self.cmds.push(Command::Background(color));
    }
    pub fn reverse(&mut self) {
        self.cmds.push(Command::Reverse);
    }
    pub fn reset(&mut self) {
        self.cmds.push(Command::Reset);
    }
    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for c in &self.cmds {
            encode_one(&mut out, c)?;
        }
        out.flush()?;
        Ok(out)
    }
}

fn encode_one(out: &mut Vec<u8>, cmd: &Command) -> Result<()> {
    match cmd {
        Command::MoveTo(x, y) => queue!(out, MoveTo(*x, *y))?,
        Command::ClearLine => queue!(out, Clear(ClearType::CurrentLine))?,
        Command::Print(s) => queue!(out, Print(s))?,
        Command::Foreground(c) => queue!(out, SetForegroundColor(*c))?,
        Command::Background(c) => queue!(out, SetBackgroundColor(*c))?,
        Command::Reverse => queue!(out, SetAttribute(Attribute::Reverse))?,
        Command::Reset => queue!(out, SetAttribute(Attribute::Reset), ResetColor)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_print_is_dropped() {
        let mut w = Writer::new();
        w.print("");
        w.move_to(1, 2);
        w.print("x");
        assert_eq!(
            w.commands(),
            &[Command::MoveTo(1, 2), Command::Print("x".into())]
        );
    }

    #[test]
    fn encodes_in_order() {
        let mut w = Writer::new();
        w.move_to(0, 0);
        w.print("ab");
        let bytes = w.encode().unwrap();
        let s = String::from_utf8(bytes).unwrap();
        assert_eq!(s, "\x1b[1;1Hab");
    }
}
