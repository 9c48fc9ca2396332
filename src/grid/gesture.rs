/// Press-and-hold drawing gesture.
///
/// Tracks whether the pointer is held and which cell it last brushed, so a
/// pointer wandering inside one cell only paints it once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gesture {
    held: bool,
    last: Option<(usize, usize)>,
}

impl Gesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Starts a drawing session. The pressed cell is always brushed.
    pub fn press(&mut self, row: usize, col: usize) -> (usize, usize) {
        self.held = true;
        self.last = Some((row, col));
        (row, col)
    }

    /// Pointer moved over `(row, col)`. Returns the cell to brush, if any.
    pub fn enter(&mut self, row: usize, col: usize) -> Option<(usize, usize)> {
        if !self.held || self.last == Some((row, col)) {
            return None;
        }
        self.last = Some((row, col));
        Some((row, col))
    }

    /// Ends the session. Leaving the drawable area is treated the same way.
    pub fn release(&mut self) {
        self.held = false;
        self.last = None;
    }
}
