//! Paging and sorting options for catalog listings.

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 200;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Movie columns a listing can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MovieSortField {
    #[default]
    Id,
    Title,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sort {
    pub field: MovieSortField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn by(field: MovieSortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// `ORDER BY` body. Title ordering falls back to `id ASC` for ties.
    pub(crate) fn order_by_sql(&self) -> &'static str {
        match (self.field, self.direction) {
            (MovieSortField::Id, SortDirection::Asc) => "id ASC",
            (MovieSortField::Id, SortDirection::Desc) => "id DESC",
            (MovieSortField::Title, SortDirection::Asc) => "title ASC, id ASC",
            (MovieSortField::Title, SortDirection::Desc) => "title DESC, id ASC",
        }
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Sort,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Sort::default(),
        }
    }
}

impl PageRequest {
    pub fn of(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: Sort::default(),
        }
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Page size clamped into `1..=MAX_PAGE_SIZE`.
    pub fn effective_size(&self) -> u32 {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }

    pub(crate) fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.effective_size())
    }
}

/// One slice of a sorted listing plus the total row count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(self.size))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) + 1 < self.total_pages()
    }
}
