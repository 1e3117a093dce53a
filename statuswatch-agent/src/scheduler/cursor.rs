//! Poll cursor

/// Lower time bound for the next poll, in Unix seconds
///
/// Never moves backwards: an advance to an earlier position is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollCursor(i64);

impl PollCursor {
    pub fn new(position: i64) -> Self {
        Self(position)
    }

    pub fn position(&self) -> i64 {
        self.0
    }

    /// Moves the cursor to `next` if that is not earlier than the current position
    pub fn advance(&mut self, next: i64) {
        self.0 = self.0.max(next);
    }
}
