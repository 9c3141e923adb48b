/// A counter used to implement auto-increment IDs.
///
/// The write path peeks at the next value, journals the entry carrying it,
/// and only then applies the entry, which advances the counter. A failed
/// journal append therefore never burns an ID.
#[derive(Debug, Clone)]
pub struct Counter {
    next: u32,
}

impl Counter {
    /// Create a counter whose first value will be `start`.
    pub fn new(start: u32) -> Self {
        Self { next: start }
    }

    /// The value the next assignment will use.
    pub fn peek(&self) -> u32 {
        self.next
    }

    /// Move the counter past an assigned value. Idempotent, and safe to
    /// call with out-of-order values during journal replay.
    pub fn advance_past(&mut self, value: u32) {
        if value >= self.next {
            self.next = value + 1;
        }
    }
}
