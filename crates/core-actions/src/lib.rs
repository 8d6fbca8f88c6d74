//! Editing engine: key translation, action dispatch, the `:` command shell
//! and file I/O.
//!
//! A key flows `KeyTranslator::translate` -> `Action` -> `dispatch`, and the
//! `Editor` wraps both stages with the viewport pass and dirty marking. The
//! translator owns every piece of multi-key state (the Insert-mode exit
//! chord); the dispatcher is a plain function of action and model.

pub mod command_shell;
mod dispatcher;
mod editor;
pub mod io_ops;
mod key_translator;

pub use command_shell::{
    CommandContext, CommandHandler, CommandShell, CommandTarget, Token, TokenKind, tokenize,
};
pub use dispatcher::{DispatchResult, dispatch};
pub use editor::Editor;
pub use key_translator::{ChordSettings, KeyTranslator};

use core_text::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    /// Left that continues at the end of the previous line.
    LeftWrap,
    /// Right that continues at the start of the next line.
    RightWrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    EnterInsert,
    LeaveInsert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    InsertChar(char),
    Newline,
    Backspace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    ModeChange(ModeChange),
    Edit(EditKind),
    /// Exit chord completed: remove `ch` inserted at `at`, then leave Insert.
    ChordExit {
        at: Position,
        ch: char,
    },
    CommandStart,
    CommandChar(char),
    CommandBackspace,
    CommandCancel,
    CommandExecute,
    Save,
    Quit,
}
