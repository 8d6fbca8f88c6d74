//! KeyTranslator: stateful key -> `Action` translation.
//!
//! The only multi-key state is the Insert-mode exit chord. When the first
//! chord char is typed it is inserted normally and remembered together with
//! the time and the position it landed at. If the second chord char follows
//! within the timeout, with the cursor still right after the first char, the
//! pair becomes `Action::ChordExit` instead of a second insert. Any other key
//! clears the memory.
//!
//! This is a timing heuristic. A slow typist gets both chars inserted, and
//! pasted text containing the pair leaves Insert mode.

use crate::{Action, EditKind, ModeChange, MotionKind};
use core_config::{CHORD_TIMEOUT_DEFAULT, Config};
use core_events::{KeyCode, KeyEvent};
use core_state::Mode;
use core_text::Position;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordSettings {
    /// `None` disables the chord.
    pub keys: Option<(char, char)>,
    pub timeout: Duration,
}

impl Default for ChordSettings {
    fn default() -> Self {
        Self {
            keys: Some(('j', 'k')),
            timeout: CHORD_TIMEOUT_DEFAULT,
        }
    }
}

impl ChordSettings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            keys: cfg.exit_chord(),
            timeout: cfg.chord_timeout(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            keys: None,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingChord {
    ch: char,
    at: Instant,
    /// Where the first char was inserted.
    pos: Position,
}

#[derive(Debug, Default)]
pub struct KeyTranslator {
    settings: ChordSettings,
    pending: Option<PendingChord>,
}

impl KeyTranslator {
    pub fn new(settings: ChordSettings) -> Self {
        Self {
            settings,
            pending: None,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn reset(&mut self) {
        self.pending = None;
    }

    pub fn translate(
        &mut self,
        mode: Mode,
        key: &KeyEvent,
        cursor: Position,
        now: Instant,
    ) -> Option<Action> {
        let pending = self.pending.take();
        match mode {
            Mode::Normal => translate_normal(key),
            Mode::Command => translate_command(key),
            Mode::Insert => self.translate_insert(key, cursor, now, pending),
        }
    }

    fn translate_insert(
        &mut self,
        key: &KeyEvent,
        cursor: Position,
        now: Instant,
        pending: Option<PendingChord>,
    ) -> Option<Action> {
        if let Some(c) = key.printable() {
            if let (Some((first, second)), Some(p)) = (self.settings.keys, pending)
                && c == second
                && p.ch == first
                && now.saturating_duration_since(p.at) <= self.settings.timeout
                && cursor == Position::new(p.pos.line, p.pos.col + 1)
            {
                tracing::trace!(target: "actions.chord", "chord_exit");
                return Some(Action::ChordExit { at: p.pos, ch: p.ch });
            }
            if self.settings.keys.is_some_and(|(first, _)| first == c) {
                self.pending = Some(PendingChord {
                    ch: c,
                    at: now,
                    pos: cursor,
                });
            }
            return Some(Action::Edit(EditKind::InsertChar(c)));
        }
        match key.code {
            KeyCode::Esc => Some(Action::ModeChange(ModeChange::LeaveInsert)),
            KeyCode::Enter => Some(Action::Edit(EditKind::Newline)),
            KeyCode::Backspace => Some(Action::Edit(EditKind::Backspace)),
            _ => arrow(key.code),
        }
    }
}

fn arrow(code: KeyCode) -> Option<Action> {
    let kind = match code {
        KeyCode::Left => MotionKind::LeftWrap,
        KeyCode::Right => MotionKind::RightWrap,
        KeyCode::Up => MotionKind::Up,
        KeyCode::Down => MotionKind::Down,
        _ => return None,
    };
    Some(Action::Motion(kind))
}

fn translate_normal(key: &KeyEvent) -> Option<Action> {
    let Some(c) = key.printable() else {
        return arrow(key.code);
    };
    let action = match c {
        'i' => Action::ModeChange(ModeChange::EnterInsert),
        ':' => Action::CommandStart,
        'h' => Action::Motion(MotionKind::Left),
        'j' => Action::Motion(MotionKind::Down),
        'k' => Action::Motion(MotionKind::Up),
        'l' => Action::Motion(MotionKind::Right),
        'q' => Action::Quit,
        'w' => Action::Save,
        _ => return None,
    };
    Some(action)
}

fn translate_command(key: &KeyEvent) -> Option<Action> {
    if let Some(c) = key.printable() {
        return Some(Action::CommandChar(c));
    }
    match key.code {
        KeyCode::Enter => Some(Action::CommandExecute),
        KeyCode::Backspace => Some(Action::CommandBackspace),
        KeyCode::Esc => Some(Action::CommandCancel),
        _ => None,
    }
}
