//! Scroll position over the rendered service list.

use crate::poll::Scroll;

/// Vertical scroll state. Offset is kept in `0..=total - height`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    offset: usize,
    height: usize,
    total: usize,
}

impl Viewport {
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Updates the visible height and content length, clamping the offset.
    pub fn resize(&mut self, height: usize, total: usize) {
        self.height = height;
        self.total = total;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn scroll(&mut self, scroll: Scroll) {
        let half = (self.height / 2).max(1);
        let page = self.height.max(1);
        self.offset = match scroll {
            Scroll::LineUp => self.offset.saturating_sub(1),
            Scroll::LineDown => self.offset + 1,
            Scroll::PageUp => self.offset.saturating_sub(page),
            Scroll::PageDown => self.offset + page,
            Scroll::HalfPageUp => self.offset.saturating_sub(half),
            Scroll::HalfPageDown => self.offset + half,
            Scroll::Top => 0,
            Scroll::Bottom => self.max_offset(),
        }
        .min(self.max_offset());
    }

    /// Scroll position as a percentage, `None` when everything fits.
    pub fn percent(&self) -> Option<u16> {
        let max = self.max_offset();
        if max == 0 {
            return None;
        }
        Some((self.offset * 100 / max) as u16)
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(height: usize, total: usize) -> Viewport {
        let mut v = Viewport::default();
        v.resize(height, total);
        v
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut v = viewport(10, 25);
        v.scroll(Scroll::LineUp);
        assert_eq!(v.offset(), 0);

        v.scroll(Scroll::PageDown);
        assert_eq!(v.offset(), 10);
        v.scroll(Scroll::PageDown);
        assert_eq!(v.offset(), 15);

        v.scroll(Scroll::HalfPageUp);
        assert_eq!(v.offset(), 10);
        v.scroll(Scroll::Top);
        assert_eq!(v.offset(), 0);
        v.scroll(Scroll::Bottom);
        assert_eq!(v.offset(), 15);
    }

    #[test]
    fn test_percent_only_when_content_overflows() {
        let mut v = viewport(10, 8);
        assert_eq!(v.percent(), None);
        v.scroll(Scroll::LineDown);
        assert_eq!(v.offset(), 0);

        let mut v = viewport(10, 30);
        assert_eq!(v.percent(), Some(0));
        v.scroll(Scroll::HalfPageDown);
        assert_eq!(v.percent(), Some(25));
        v.scroll(Scroll::Bottom);
        assert_eq!(v.percent(), Some(100));
    }

    #[test]
    fn test_shrinking_content_pulls_offset_back() {
        let mut v = viewport(5, 50);
        v.scroll(Scroll::Bottom);
        assert_eq!(v.offset(), 45);
        v.resize(5, 12);
        assert_eq!(v.offset(), 7);
    }
}
