//! # Pagination Bar
//!
//! Buttons rendered under a resource table: First, Previous, a window of
//! page numbers, Next and Last. Every button resolves to a target page that
//! is then passed through `change_page`, which alone decides validity.

/// Number of page buttons in the window
pub const WINDOW_SIZE: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButton {
    First,
    Previous,
    Page(u32),
    Next,
    Last,
}

impl PageButton {
    /// Page requested by pressing this button.
    ///
    /// Previous on page 1 yields 0, which `change_page` ignores.
    pub fn target(self, current: u32, total_pages: u32) -> u32 {
        match self {
            PageButton::First => 1,
            PageButton::Previous => current.saturating_sub(1),
            PageButton::Page(page) => page,
            PageButton::Next => current.saturating_add(1),
            PageButton::Last => total_pages,
        }
    }
}

/// Page numbers offered around the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub current: u32,
    pub total_pages: u32,
    pub pages: Vec<u32>,
}

impl PageWindow {
    /// Up to [`WINDOW_SIZE`] consecutive pages starting at `current`.
    ///
    /// Unclamped, the window may list pages past `total_pages`; clamped, it
    /// stops at the last page.
    pub fn compute(current: u32, total_pages: u32, clamp: bool) -> Self {
        let end = current.saturating_add(WINDOW_SIZE - 1);
        let end = if clamp { end.min(total_pages) } else { end };
        let pages = (current..=end).collect();

        Self {
            current,
            total_pages,
            pages,
        }
    }

    pub fn is_current(&self, page: u32) -> bool {
        page == self.current
    }

    /// Buttons in render order
    pub fn buttons(&self) -> Vec<PageButton> {
        let mut buttons = vec![PageButton::First, PageButton::Previous];
        buttons.extend(self.pages.iter().map(|&page| PageButton::Page(page)));
        buttons.extend([PageButton::Next, PageButton::Last]);
        buttons
    }
}
