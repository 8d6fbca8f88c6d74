//! File I/O: load a document into lines, save lines back.
//!
//! Files are plain text with `'\n'` separators; a `"\r\n"` pair is read as a
//! single separator. Every saved line, the last included, ends with `'\n'`.
//! Writes go straight to the target path (no temp file + rename).

use core_state::EditorState;
use core_text::Buffer;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("no file name")]
    NoFileName,
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IoError {
    fn is_not_found(&self) -> bool {
        matches!(self, IoError::Read { source, .. } if source.kind() == ErrorKind::NotFound)
    }
}

/// Read `path` into lines without separators.
pub fn load(path: &Path) -> Result<Vec<String>, IoError> {
    let content = std::fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Write `lines`, each terminated by `'\n'`. Returns the number of bytes written.
pub fn save<I, S>(path: &Path, lines: I) -> Result<usize, IoError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut content = String::new();
    for line in lines {
        content.push_str(line.as_ref());
        content.push('\n');
    }
    std::fs::write(path, content.as_bytes()).map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content.len())
}

/// Buffer for `path`. A file that does not exist yet opens as an empty
/// document; saving creates it.
pub fn open_buffer(path: &Path) -> Result<Buffer, IoError> {
    match load(path) {
        Ok(lines) => {
            info!(target: "io", path = %path.display(), lines = lines.len(), "file_opened");
            Ok(Buffer::from_lines(lines))
        }
        Err(e) if e.is_not_found() => {
            info!(target: "io", path = %path.display(), "file_missing_new_buffer");
            Ok(Buffer::new())
        }
        Err(e) => Err(e),
    }
}

/// Save the state's buffer to its file name and clear `modified`.
pub fn save_state(state: &mut EditorState) -> Result<usize, IoError> {
    let path = state.file_name.clone().ok_or(IoError::NoFileName)?;
    let bytes = save(&path, state.buffer.lines())?;
    state.modified = false;
    info!(target: "io", path = %path.display(), bytes, "file_saved");
    Ok(bytes)
}

/// `save_state` with the outcome put on the status line.
pub fn save_and_report(state: &mut EditorState) -> bool {
    match save_state(state) {
        Ok(_) => {
            let msg = format!("File Save: {}", state.display_name());
            state.set_status(msg);
            true
        }
        Err(e) => {
            error!(target: "io", error = %e, "file_write_error");
            state.set_status(format!("Write failed: {e}"));
            false
        }
    }
}
