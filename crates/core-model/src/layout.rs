//! Screen geometry.
//!
//! One title row at the top, then the content rows, then the status bar and
//! the command row at the bottom. Rows are 0-based terminal cells. Both the
//! viewport pass and the renderer read the same `Layout` so the scroll window
//! always equals the drawn region.
//!
//! Degenerate windows drop regions from the top down: fewer than 4 rows leaves
//! no content, 2 rows keep only status + command, 1 row only the command row.

/// Rows that are never used for document content.
pub const RESERVED_ROWS: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl LayoutRegion {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn row(y: u16, width: u16) -> Self {
        Self::new(0, y, width, 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub cols: u16,
    pub rows: u16,
    pub title: Option<LayoutRegion>,
    pub content: LayoutRegion,
    pub status: Option<LayoutRegion>,
    pub command: Option<LayoutRegion>,
}

impl Layout {
    pub fn for_window(cols: u16, rows: u16) -> Self {
        let command = (rows >= 1).then(|| LayoutRegion::row(rows - 1, cols));
        let status = (rows >= 2).then(|| LayoutRegion::row(rows - 2, cols));
        let title = (rows >= 3).then(|| LayoutRegion::row(0, cols));
        Self {
            cols,
            rows,
            title,
            content: LayoutRegion::new(0, 1, cols, content_rows(rows)),
            status,
            command,
        }
    }

    pub fn content_rows(&self) -> usize {
        self.content.height as usize
    }

    /// Screen row for document line `line` given the current top line, if
    /// that line is inside the content region.
    pub fn screen_row(&self, line: usize, row_offset: usize) -> Option<u16> {
        let rel = line.checked_sub(row_offset)?;
        (rel < self.content_rows()).then(|| self.content.y + rel as u16)
    }
}

/// Content rows for a window `rows` tall.
pub fn content_rows(rows: u16) -> u16 {
    rows.saturating_sub(RESERVED_ROWS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_window() {
        let l = Layout::for_window(80, 24);
        assert_eq!(l.title, Some(LayoutRegion::new(0, 0, 80, 1)));
        assert_eq!(l.content, LayoutRegion::new(0, 1, 80, 21));
        assert_eq!(l.status, Some(LayoutRegion::new(0, 22, 80, 1)));
        assert_eq!(l.command, Some(LayoutRegion::new(0, 23, 80, 1)));
    }

    #[test]
    fn tiny_windows_drop_regions() {
        let l = Layout::for_window(10, 3);
        assert_eq!(l.content_rows(), 0);
        assert!(l.title.is_some() && l.status.is_some() && l.command.is_some());
        let l = Layout::for_window(10, 2);
        assert!(l.title.is_none());
        assert_eq!(l.status.map(|r| r.y), Some(0));
        let l = Layout::for_window(10, 1);
        assert!(l.status.is_none());
        assert_eq!(l.command.map(|r| r.y), Some(0));
        let l = Layout::for_window(0, 0);
        assert!(l.command.is_none());
        assert_eq!(l.content_rows(), 0);
    }

    #[test]
    fn screen_row_mapping() {
        let l = Layout::for_window(80, 10);
        assert_eq!(l.content_rows(), 7);
        assert_eq!(l.screen_row(5, 5), Some(1));
        assert_eq!(l.screen_row(11, 5), Some(7));
        assert_eq!(l.screen_row(12, 5), None);
        assert_eq!(l.screen_row(4, 5), None);
    }
}
