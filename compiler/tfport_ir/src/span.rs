//! Source spans.
//!
//! Every AST node carries the byte range it was parsed from. Bound nodes copy
//! the span of the AST node they were bound from, which is how diagnostics
//! point back at configuration source.

use std::fmt;

/// Byte range `start..end` within one configuration file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Span for nodes synthesized by a pass.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span start after end");
        Span { start, end }
    }

    /// Length in bytes; zero for an inverted span.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dummy_is_empty_default() {
        assert!(Span::DUMMY.is_empty());
        assert_eq!(Span::default(), Span::DUMMY);
        assert_eq!(format!("{:?}", Span::new(4, 8)), "4..8");
        assert_eq!(Span::new(4, 8).to_range(), 4..8);
        assert_eq!(Span::new(4, 8).len(), 4);
    }

    #[test]
    fn inverted_span_has_zero_len() {
        let inverted = Span { start: 9, end: 3 };
        assert_eq!(inverted.len(), 0);
        assert!(inverted.is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "span start after end")]
    fn new_rejects_inverted_range() {
        let _ = Span::new(9, 3);
    }
}
