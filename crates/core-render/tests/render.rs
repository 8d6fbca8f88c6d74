use core_model::EditorModel;
use core_plugin::{PluginHost, PluginRegistry};
use core_render::Renderer;
use core_state::{EditorState, Mode};
use core_terminal::RecordingBackend;
use core_text::{Buffer, Position};
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use pretty_assertions::assert_eq;

fn model(text: &str, window: (u16, u16)) -> EditorModel {
    let state = EditorState::new(Buffer::from_text(text)).with_file_name("notes.txt");
    EditorModel::with_window(state, window)
}

#[test]
fn draws_only_when_dirty() {
    let mut r = Renderer::default();
    let mut be = RecordingBackend::new(80, 24);
    let mut m = model("hello", (80, 24));
    let plugins = PluginHost::new();
    assert!(r.draw(&mut be, &mut m, &plugins).unwrap());
    assert!(!m.state().buffer.is_dirty());
    be.clear_output();
    assert!(!r.draw(&mut be, &mut m, &plugins).unwrap());
    assert!(be.output.is_empty());
    assert_eq!(be.flushes, 1);
    assert_eq!(r.frames(), 1);
}

#[test]
fn frame_regions_and_cursor() {
    let mut r = Renderer::default();
    let mut be = RecordingBackend::new(80, 24);
    let mut m = model("hello\nworld", (80, 24));
    m.state_mut().set_status("-- NORMAL --");
    r.draw(&mut be, &mut m, &PluginHost::new()).unwrap();
    let text = be.text();
    assert!(text.contains(" mote | notes.txt | 80x24"));
    assert!(text.contains("hello"));
    assert!(text.contains("world"));
    // 21 content rows, two used by the document.
    assert_eq!(text.matches('~').count(), 19);
    assert!(text.contains(" NORMAL | -- NORMAL -- | notes.txt | Ln 1, Col 1"));
    assert_eq!(be.cursor, (0, 1));
    assert!(be.cursor_visible);
}

#[test]
fn failed_flush_keeps_dirty() {
    let mut r = Renderer::default();
    let mut be = RecordingBackend::new(80, 24);
    let mut m = model("x", (80, 24));
    be.fail_next_flush = true;
    assert!(r.draw(&mut be, &mut m, &PluginHost::new()).is_err());
    assert!(m.state().buffer.is_dirty());
    assert!(r.draw(&mut be, &mut m, &PluginHost::new()).unwrap());
    assert!(!m.state().buffer.is_dirty());
}

#[test]
fn resize_keeps_cursor_visible() {
    let text = vec!["q".repeat(60); 40].join("\n");
    let mut r = Renderer::default();
    let mut be = RecordingBackend::new(80, 24);
    let mut m = model(&text, (80, 24));
    m.set_cursor(Position::new(20, 55));
    m.reconcile();
    r.draw(&mut be, &mut m, &PluginHost::new()).unwrap();

    be.resize(40, 10);
    be.clear_output();
    m.state_mut().buffer.set_dirty(true);
    assert!(r.draw(&mut be, &mut m, &PluginHost::new()).unwrap());
    assert_eq!(m.window(), (40, 10));
    let (x, y) = be.cursor;
    assert!(x < 40);
    assert!((1..=7).contains(&y), "cursor row {y} outside content");
    assert!(be.text().contains("40x10"));
}

#[test]
fn horizontal_offset_clips_lines() {
    let mut r = Renderer::default();
    let mut be = RecordingBackend::new(10, 6);
    let mut m = model("0123456789abcdef", (10, 6));
    m.set_cursor(Position::new(0, 15));
    m.reconcile();
    r.draw(&mut be, &mut m, &PluginHost::new()).unwrap();
    let text = be.text();
    assert!(text.contains("6789abcdef"));
    assert!(!text.contains("012345"));
    assert_eq!(be.cursor, (9, 1));
}

#[test]
fn highlights_wrap_char_in_color_and_reset() {
    let mut host = PluginHost::new();
    host.load_enabled(&["trailing-whitespace"], &PluginRegistry::with_builtins());
    let mut r = Renderer::default();
    let mut be = RecordingBackend::new(80, 24);
    let mut m = model("ab ", (80, 24));
    r.draw(&mut be, &mut m, &host).unwrap();

    let mut expected = Vec::new();
    queue!(
        expected,
        Print("ab"),
        SetForegroundColor(Color::Red),
        Print(" "),
        SetAttribute(Attribute::Reset),
        ResetColor
    )
    .unwrap();
    let out = be.output;
    assert!(
        out.windows(expected.len()).any(|w| w == expected.as_slice()),
        "highlighted cell not found in frame"
    );
}

#[test]
fn command_line_row_and_cursor() {
    let mut r = Renderer::default();
    let mut be = RecordingBackend::new(80, 24);
    let mut m = model("x", (80, 24));
    let st = m.state_mut();
    st.set_mode(Mode::Command);
    st.command_line.begin();
    st.command_line.push_char('w');
    st.command_line.push_char('q');
    r.draw(&mut be, &mut m, &PluginHost::new()).unwrap();
    assert!(be.text().contains("\x1b[24;1H\x1b[2K:wq"));
    assert_eq!(be.cursor, (3, 23));
}

#[test]
fn tiny_window_draws_without_content() {
    let mut r = Renderer::default();
    let mut be = RecordingBackend::new(5, 2);
    let mut m = model("abc", (5, 2));
    assert!(r.draw(&mut be, &mut m, &PluginHost::new()).unwrap());
    assert!(!be.text().contains("abc"));
    assert!(be.cursor.1 <= 1);
}

#[test]
fn control_chars_draw_as_single_placeholder_cells() {
    let mut r = Renderer::default();
    let mut be = RecordingBackend::new(80, 24);
    let mut m = model("ok\x1b[2Jgone\tx\ry", (80, 24));
    m.set_cursor(Position::new(0, 12));
    r.draw(&mut be, &mut m, &PluginHost::new()).unwrap();

    let text = be.text();
    assert!(!text.contains("\x1b[2J"), "document text reached the terminal as a sequence");
    assert!(!be.output.contains(&b'\t'));
    assert!(!be.output.contains(&b'\r'));
    assert!(text.contains("ok?[2Jgone?x?y"));
    assert_eq!(be.cursor, (12, 1));
}
