//! # Resource List Controller
//!
//! Paginated view of one resource collection. The controller performs no I/O:
//! it issues [`LoadTicket`]s for the screen to fetch and applies the results
//! handed back to it.

use crate::dashboard::models::{Page, Resource};
use crate::dashboard::services::ApiError;
use crate::dashboard::view_models::pagination::{PageButton, PageWindow};

/// Launch receipt of one page load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    page: u32,
}

impl LoadTicket {
    /// Page requested by this load
    pub fn page(&self) -> u32 {
        self.page
    }
}

#[derive(Debug)]
pub struct ResourceListController<R> {
    records: Vec<R>,
    page: u32,
    total_pages: u32,
    loading: bool,
    generation: u64,
    clamp_window: bool,
}

impl<R: Resource> ResourceListController<R> {
    pub fn new(clamp_window: bool) -> Self {
        Self {
            records: Vec::new(),
            page: 1,
            total_pages: 1,
            loading: false,
            generation: 0,
            clamp_window,
        }
    }

    /// Start loading `page` (1-indexed); supersedes any load still in flight
    pub fn load(&mut self, page: u32) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        tracing::debug!(
            "Loading {} page {} (generation {})",
            R::COLLECTION,
            page,
            self.generation
        );
        LoadTicket {
            generation: self.generation,
            page,
        }
    }

    /// Load the current page again
    pub fn reload(&mut self) -> LoadTicket {
        self.load(self.page)
    }

    /// Navigate to `page` if it lies within `1..=total_pages`
    pub fn change_page(&mut self, page: u32) -> Option<LoadTicket> {
        if page < 1 || page > self.total_pages {
            tracing::debug!(
                "Ignoring page {} of {} (total {})",
                page,
                R::COLLECTION,
                self.total_pages
            );
            return None;
        }
        Some(self.load(page))
    }

    /// Navigate through a pagination button
    pub fn press(&mut self, button: PageButton) -> Option<LoadTicket> {
        self.change_page(button.target(self.page, self.total_pages))
    }

    /// Apply the outcome of a load. Returns false when the ticket is stale.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<Page<R>, ApiError>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                "Discarding stale {} page {} (generation {}, current {})",
                R::COLLECTION,
                ticket.page,
                ticket.generation,
                self.generation
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                self.records = page.records;
                self.total_pages = page.total_pages;
                self.page = ticket.page;
            }
            Err(e) => {
                tracing::warn!("Error fetching {} page {}: {}", R::COLLECTION, ticket.page, e);
            }
        }
        true
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::compute(self.page, self.total_pages, self.clamp_window)
    }
}
