//! The stack of open indentation widths.

/// Open indentation widths, innermost on top.
///
/// Widths are strictly increasing from bottom to top. An empty stack means
/// the current block sits at column 0.
#[derive(Debug, Clone, Default)]
pub struct IndentStack {
    widths: Vec<u32>,
}

impl IndentStack {
    pub fn new() -> Self {
        Self { widths: Vec::new() }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Open a new level. `width` must exceed the current top.
    pub fn push(&mut self, width: u32) {
        assert!(
            self.widths.last().map_or(true, |&top| width > top),
            "indent width {width} does not exceed the enclosing level"
        );
        self.widths.push(width);
    }

    /// Close the innermost level. Popping an empty stack is a bug in the caller.
    pub fn pop(&mut self) -> u32 {
        self.widths.pop().expect("pop on an empty indent stack")
    }

    /// The innermost width. Peeking an empty stack is a bug in the caller.
    pub fn top(&self) -> u32 {
        *self.widths.last().expect("top of an empty indent stack")
    }

    /// The innermost width, or 0 when no level is open.
    #[inline]
    pub fn current(&self) -> u32 {
        self.widths.last().copied().unwrap_or(0)
    }
}
