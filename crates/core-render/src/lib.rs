//! Full-frame renderer.
//!
//! Frame structure (0-based rows, see `core_model::Layout`):
//! * row 0: title bar, white on blue;
//! * content rows: document lines clipped to the horizontal offset, `~`
//!   filler past the end of the document;
//! * status bar: inverse video, mode | message | file | position;
//! * last row: the command line while in Command mode, blank otherwise.
//!
//! Drawing is gated on the buffer dirty flag. The flag is cleared only after
//! the backend flushed the whole frame; an error anywhere leaves it set so the
//! next iteration redraws.

use anyhow::Result;
use core_model::{EditorModel, Layout};
use core_plugin::PluginHost;
use core_state::Mode;
use core_terminal::TerminalBackend;
use crossterm::style::Color;
use std::time::Instant;

mod highlight;
pub mod status;
pub mod writer;

pub use highlight::HighlightMap;
use status::{StatusContext, cell_char, compose_status, fit, format_status, title_text};
use writer::Writer;

pub const TITLE_FG: Color = Color::White;
pub const TITLE_BG: Color = Color::Blue;

pub struct Renderer {
    filler: char,
    frames: u64,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new('~')
    }
}

impl Renderer {
    pub fn new(filler: char) -> Self {
        Self { filler, frames: 0 }
    }

    /// Frames completed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Redraw the whole screen if the model is dirty. Returns whether a frame
    /// was emitted.
    pub fn draw<B: TerminalBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        model: &mut EditorModel,
        plugins: &PluginHost,
    ) -> Result<bool> {
        if !model.state().buffer.is_dirty() {
            return Ok(false);
        }
        let started = Instant::now();
        let (cols, rows) = backend.size();
        if (cols, rows) != model.window() {
            model.set_window(cols, rows);
        } else {
            model.reconcile();
        }
        let layout = model.layout();
        let frame = self.compose(model, plugins, &layout);
        let bytes = frame.encode()?;
        let (cx, cy) = cursor_cell(model, &layout);

        backend.hide_cursor()?;
        backend.write(&bytes)?;
        backend.move_cursor(cx, cy)?;
        backend.show_cursor()?;
        backend.flush()?;

        model.state_mut().buffer.set_dirty(false);
        self.frames += 1;
        tracing::debug!(
            target: "render",
            bytes = bytes.len(),
            micros = started.elapsed().as_micros() as u64,
            "frame"
        );
        Ok(true)
    }

    fn compose(&self, model: &EditorModel, plugins: &PluginHost, layout: &Layout) -> Writer {
        let state = model.state();
        let cursor = model.cursor();
        let vp = model.viewport();
        let width = layout.cols as usize;
        let name = state.display_name();
        let mut w = Writer::new();

        if let Some(title) = layout.title {
            w.move_to(0, title.y);
            w.bg(TITLE_BG);
            w.fg(TITLE_FG);
            w.print(fit(&title_text(&name, layout.cols, layout.rows), width));
            w.reset();
        }

        let highlights = if plugins.is_empty() {
            HighlightMap::default()
        } else {
            HighlightMap::collect(plugins.highlights(&state.buffer, cursor))
        };
        for i in 0..layout.content_rows() {
            let y = layout.content.y + i as u16;
            let row = vp.row_offset + i;
            w.move_to(0, y);
            w.clear_line();
            match state.buffer.line(row) {
                Some(line) => {
                    let visible = line.chars().enumerate().skip(vp.col_offset).take(width);
                    let mut run = String::new();
                    for (col, ch) in visible {
                        let ch = cell_char(ch);
                        match highlights.get(row, col) {
                            Some(color) => {
                                w.print(std::mem::take(&mut run));
                                w.fg(color);
                                w.print(ch.to_string());
                                w.reset();
                            }
                            None => run.push(ch),
                        }
                    }
                    w.print(run);
                }
                None => w.print(self.filler.to_string()),
            }
        }

        if let Some(status) = layout.status {
            let ctx = StatusContext {
                mode: state.mode,
                message: state.status(),
                file_name: &name,
                modified: state.modified,
                line: cursor.line,
                col: cursor.col,
            };
            w.move_to(0, status.y);
            w.reverse();
            w.print(fit(&format_status(&compose_status(&ctx)), width));
            w.reset();
        }

        if let Some(cmd) = layout.command {
            w.move_to(0, cmd.y);
            w.clear_line();
            if state.mode == Mode::Command {
                w.print(
                    state
                        .command_line
                        .buffer()
                        .chars()
                        .take(width)
                        .map(cell_char)
                        .collect::<String>(),
                );
            }
        }
        w
    }
}

/// Screen cell for the terminal cursor: the end of the command line in
/// Command mode, otherwise the document cursor mapped through the viewport.
fn cursor_cell(model: &EditorModel, layout: &Layout) -> (u16, u16) {
    let max_x = layout.cols.saturating_sub(1);
    let max_y = layout.rows.saturating_sub(1);
    let state = model.state();
    if state.mode == Mode::Command
        && let Some(cmd) = layout.command
    {
        let len = state.command_line.buffer().chars().count();
        return ((len as u16).min(max_x), cmd.y);
    }
    let cursor = model.cursor();
    let vp = model.viewport();
    let x = cursor.col.saturating_sub(vp.col_offset);
    let y = layout
        .screen_row(cursor.line, vp.row_offset)
        .unwrap_or(layout.content.y);
    ((x.min(max_x as usize)) as u16, y.min(max_y))
}
