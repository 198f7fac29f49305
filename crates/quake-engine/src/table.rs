//! Sortable, paginated event table.
//!
//! The table never stores a reordered copy of the visible set. Sort and
//! page are presentation state applied on read.

use std::cmp::Ordering;

use quake_types::{EarthquakeEvent, PageAction, SortDirection, SortKey};
use serde::Serialize;

use crate::format;

/// Rows per page.
pub const PAGE_SIZE: usize = 10;

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableSort {
    /// Sorted column.
    pub key: SortKey,
    /// Sort direction.
    pub direction: SortDirection,
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    /// The full event record.
    pub event: EarthquakeEvent,
    /// Display time.
    pub time: String,
}

/// A rendered page of the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage {
    /// Rows on this page (at most [`PAGE_SIZE`]).
    pub rows: Vec<TableRow>,
    /// 1-based current page.
    pub page: usize,
    /// Number of pages (0 when there are no rows).
    pub total_pages: usize,
    /// Number of rows across all pages.
    pub total_rows: usize,
    /// Active sort, if any.
    pub sort: Option<TableSort>,
}

/// Sort and pagination state over the visible set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    sort: Option<TableSort>,
    current_page: usize,
    row_count: usize,
}

impl Default for TableView {
    fn default() -> Self {
        Self::new()
    }
}

impl TableView {
    /// Unsorted table on page 1.
    pub const fn new() -> Self {
        Self {
            sort: None,
            current_page: 1,
            row_count: 0,
        }
    }

    /// Select a sort column.
    ///
    /// Selecting the active column flips its direction; selecting a new
    /// column starts ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = Some(match self.sort {
            Some(active) if active.key == key => TableSort {
                key,
                direction: active.direction.flipped(),
            },
            _ => TableSort {
                key,
                direction: SortDirection::Ascending,
            },
        });
    }

    /// Active sort, if any.
    pub const fn sort(&self) -> Option<TableSort> {
        self.sort
    }

    /// 1-based current page.
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// `ceil(row_count / PAGE_SIZE)`.
    pub const fn total_pages(&self) -> usize {
        self.row_count.div_ceil(PAGE_SIZE)
    }

    /// Record the visible set's new size, pulling the current page back to
    /// the last valid page if it now points past the end. An empty set
    /// resets to page 1.
    pub fn set_row_count(&mut self, count: usize) {
        self.row_count = count;
        let last = self.total_pages();
        if last == 0 {
            self.current_page = 1;
        } else if self.current_page > last {
            self.current_page = last;
        }
    }

    /// Jump to a 1-based page. Out-of-range requests are ignored.
    ///
    /// Returns whether the page changed.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.total_pages() && page != self.current_page {
            self.current_page = page;
            return true;
        }
        false
    }

    /// Apply a pager button. Moves past either end are ignored.
    pub fn navigate(&mut self, action: PageAction) -> bool {
        let target = match action {
            PageAction::First => 1,
            PageAction::Prev => self.current_page.saturating_sub(1),
            PageAction::Next => self.current_page.saturating_add(1),
            PageAction::Last => self.total_pages(),
        };
        self.go_to(target)
    }

    /// The visible set in table order.
    ///
    /// The sort is stable: equal keys keep their visible-set order in
    /// either direction.
    pub fn sorted<'a>(&self, visible: &'a [EarthquakeEvent]) -> Vec<&'a EarthquakeEvent> {
        let mut rows: Vec<&EarthquakeEvent> = visible.iter().collect();
        if let Some(sort) = self.sort {
            rows.sort_by(|a, b| compare(a, b, sort));
        }
        rows
    }

    /// Events on the current page.
    pub fn page_rows<'a>(&self, visible: &'a [EarthquakeEvent]) -> Vec<&'a EarthquakeEvent> {
        let skip = self
            .current_page
            .saturating_sub(1)
            .saturating_mul(PAGE_SIZE);
        self.sorted(visible)
            .into_iter()
            .skip(skip)
            .take(PAGE_SIZE)
            .collect()
    }

    /// The event behind a clicked row (0-based within the current page).
    pub fn activate<'a>(
        &self,
        visible: &'a [EarthquakeEvent],
        row: usize,
    ) -> Option<&'a EarthquakeEvent> {
        self.page_rows(visible).get(row).copied()
    }

    /// Render the current page.
    pub fn render(&self, visible: &[EarthquakeEvent]) -> TablePage {
        TablePage {
            rows: self
                .page_rows(visible)
                .into_iter()
                .map(|event| TableRow {
                    event: event.clone(),
                    time: format::format_time_short(event.time),
                })
                .collect(),
            page: self.current_page,
            total_pages: self.total_pages(),
            total_rows: visible.len(),
            sort: self.sort,
        }
    }
}

/// Three-way compare on the raw numeric column.
fn compare(a: &EarthquakeEvent, b: &EarthquakeEvent, sort: TableSort) -> Ordering {
    let (left, right) = match sort.key {
        SortKey::Magnitude => (a.magnitude, b.magnitude),
        SortKey::Depth => (a.depth, b.depth),
    };
    match sort.direction {
        SortDirection::Ascending => left.total_cmp(&right),
        SortDirection::Descending => right.total_cmp(&left),
    }
}
