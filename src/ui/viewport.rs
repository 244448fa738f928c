//! Scroll position of the conversation pane.
//!
//! Offsets are in laid-out lines. The largest valid offset is
//! `total_lines - height`; every mutation clamps to it.

use std::ops::Range;

/// The visible window onto the laid-out conversation.
///
/// ```
/// use pankview::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(80, 20, 100);
/// vp.scroll_down(30);
/// assert_eq!(vp.visible_range(), 30..50);
/// vp.scroll_to(500);
/// assert_eq!(vp.offset(), vp.max_offset());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    pub const fn new(width: u16, height: u16, total_lines: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total_lines,
        }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + self.height as usize).min(self.total_lines);
        self.offset..end
    }

    /// Position through the conversation, 0-100. Short conversations report 100.
    pub fn scroll_percent(&self) -> u8 {
        let max_offset = self.max_offset();
        if max_offset == 0 {
            return 100;
        }
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        {
            ((self.offset as f64 / max_offset as f64) * 100.0).round() as u8
        }
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = self.offset.saturating_add(n).min(self.max_offset());
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height as usize);
    }

    pub const fn half_page_up(&mut self) {
        self.scroll_up(self.height as usize / 2);
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down(self.height as usize / 2);
    }

    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Put `offset` at the top of the pane, clamped.
    pub fn scroll_to(&mut self, offset: usize) {
        self.offset = offset.min(self.max_offset());
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the laid-out length after a relayout.
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    pub const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_down_clamps_to_last_page() {
        let mut vp = Viewport::new(80, 10, 35);
        vp.scroll_down(100);
        assert_eq!(vp.offset(), 25);
        assert_eq!(vp.visible_range(), 25..35);
    }

    #[test]
    fn test_scroll_up_stops_at_top() {
        let mut vp = Viewport::new(80, 10, 35);
        vp.scroll_to(4);
        vp.scroll_up(9);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_paging_moves_by_height() {
        let mut vp = Viewport::new(80, 10, 100);
        vp.page_down();
        assert_eq!(vp.offset(), 10);
        vp.half_page_down();
        assert_eq!(vp.offset(), 15);
        vp.half_page_up();
        vp.page_up();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_short_conversation_cannot_scroll() {
        let mut vp = Viewport::new(80, 40, 12);
        vp.page_down();
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.max_offset(), 0);
        assert_eq!(vp.scroll_percent(), 100);
        assert_eq!(vp.visible_range(), 0..12);
    }

    #[test]
    fn test_scroll_percent_tracks_offset() {
        let mut vp = Viewport::new(80, 10, 110);
        assert_eq!(vp.scroll_percent(), 0);
        vp.scroll_to(50);
        assert_eq!(vp.scroll_percent(), 50);
        vp.go_to_bottom();
        assert_eq!(vp.scroll_percent(), 100);
    }

    #[test]
    fn test_shrinking_document_pulls_offset_back() {
        let mut vp = Viewport::new(80, 10, 100);
        vp.go_to_bottom();
        vp.set_total_lines(40);
        assert_eq!(vp.offset(), 30);
    }

    #[test]
    fn test_growing_height_pulls_offset_back() {
        let mut vp = Viewport::new(80, 10, 50);
        vp.go_to_bottom();
        vp.resize(100, 30);
        assert_eq!(vp.offset(), 20);
        assert_eq!(vp.width(), 100);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn offset_never_exceeds_max(
                height in 1u16..60,
                total in 0usize..500,
                ops in proptest::collection::vec((0u8..4, 0usize..200), 0..30),
            ) {
                let mut vp = Viewport::new(80, height, total);
                for (op, n) in ops {
                    match op {
                        0 => vp.scroll_down(n),
                        1 => vp.scroll_up(n),
                        2 => vp.scroll_to(n),
                        _ => vp.set_total_lines(n),
                    }
                    prop_assert!(vp.offset() <= vp.max_offset());
                }
            }
        }
    }
}
