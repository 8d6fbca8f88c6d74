use ahash::AHashMap;
use core_plugin::Highlight;
use crossterm::style::Color;

/// Cell -> color lookup built once per frame. Later requests for the same
/// cell win.
#[derive(Debug, Default)]
pub struct HighlightMap {
    cells: AHashMap<(usize, usize), Color>,
}

impl HighlightMap {
    pub fn collect<I: IntoIterator<Item = Highlight>>(highlights: I) -> Self {
        let cells = highlights
            .into_iter()
            .map(|h| ((h.row, h.col), h.color))
            .collect();
        Self { cells }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Color> {
        self.cells.get(&(row, col)).copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_request_wins() {
        let m = HighlightMap::collect([
            Highlight::new(0, 1, Color::Red),
            Highlight::new(0, 1, Color::Green),
            Highlight::new(2, 0, Color::Blue),
        ]);
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(0, 1), Some(Color::Green));
        assert_eq!(m.get(1, 1), None);
    }
}
