//! Paginated listing of people

use serde::{Deserialize, Serialize};

use super::Person;

/// Number of results the catalog returns per page.
pub const PAGE_SIZE: u32 = 10;

/// `GET people/?page=N` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeoplePage {
    /// Total number of people across all pages.
    pub count: u32,
    /// URL of the next page, if any.
    pub next: Option<String>,
    /// URL of the previous page, if any.
    pub previous: Option<String>,
    /// People on this page.
    pub results: Vec<Person>,
}

impl PeoplePage {
    /// Total number of pages in the listing.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        total_pages(self.count)
    }

    /// Returns true if there is a page after this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns true if there is a page before this one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Pairs each person with its portrait seed, given this page's number.
    pub fn entries(&self, page: u32) -> impl Iterator<Item = (u32, &Person)> {
        self.results
            .iter()
            .enumerate()
            .map(move |(index, person)| (portrait_seed(page, index), person))
    }
}

/// Number of pages needed for `count` results.
#[must_use]
pub const fn total_pages(count: u32) -> u32 {
    count.div_ceil(PAGE_SIZE)
}

/// Stable seed for a character portrait: its 1-based position in the
/// full listing.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn portrait_seed(page: u32, index: usize) -> u32 {
    page.saturating_sub(1) * PAGE_SIZE + index as u32 + 1
}
