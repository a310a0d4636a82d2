// Scroll position for the word lists.
//
// The app owns one ScrollState per list; the renderer reports content and
// viewport sizes every frame and reads back the clamped offset.

use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// Line at the top of the viewport
    offset: usize,
    total: usize,
    viewport: usize,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the sizes of the last frame and pull the offset back into range.
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        // Before the first frame the size is unknown; rendering clamps
        if self.total == 0 || self.offset < self.max_offset() {
            self.offset += 1;
        }
    }

    pub fn page_up(&mut self) {
        self.offset = self.offset.saturating_sub(self.viewport.max(1));
    }

    pub fn page_down(&mut self) {
        self.offset = (self.offset + self.viewport.max(1)).min(self.max_offset());
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Offset in the form `Paragraph::scroll` takes.
    pub fn vertical(&self) -> (u16, u16) {
        (u16::try_from(self.offset).unwrap_or(u16::MAX), 0)
    }

    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }
}

/// Thumb-only scrollbar on the right edge of `area`, when the content
/// overflows.
pub fn render_scrollbar(f: &mut Frame, area: Rect, scroll: &ScrollState) {
    if !scroll.needs_scrollbar() {
        return;
    }

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None);
    let mut state = ScrollbarState::new(scroll.max_offset()).position(scroll.offset);
    f.render_stateful_widget(scrollbar, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_clamped_to_content() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);
        scroll.scroll_to_bottom();
        assert_eq!(scroll.offset(), 15);

        scroll.scroll_down();
        assert_eq!(scroll.offset(), 15);

        // Content shrank: the offset follows
        scroll.update_dimensions(8, 5);
        assert_eq!(scroll.offset(), 3);
    }

    #[test]
    fn test_paging() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(40, 10);

        scroll.page_down();
        assert_eq!(scroll.offset(), 10);
        scroll.page_down();
        scroll.page_down();
        scroll.page_down();
        assert_eq!(scroll.offset(), 30);

        scroll.page_up();
        assert_eq!(scroll.offset(), 20);
        scroll.scroll_to_top();
        assert_eq!(scroll.offset(), 0);
        scroll.scroll_up();
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_short_content_needs_no_scrollbar() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(4, 10);
        assert!(!scroll.needs_scrollbar());
        scroll.scroll_down();
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_scroll_down_before_first_frame() {
        let mut scroll = ScrollState::new();
        scroll.scroll_down();
        scroll.scroll_down();
        assert_eq!(scroll.offset(), 2);
        scroll.update_dimensions(3, 2);
        assert_eq!(scroll.offset(), 1);
    }
}
