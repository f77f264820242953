//! Offset pagination types for list endpoints

use serde::{Deserialize, Serialize};

/// Smallest page size a caller may request
pub const MIN_LIMIT: u64 = 1;
/// Largest page size a caller may request
pub const MAX_LIMIT: u64 = 100;
/// Page size used when the caller does not pass one
pub const DEFAULT_LIMIT: u64 = 10;

/// Offset/limit window over an insertion-ordered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of matching rows to skip
    #[serde(default)]
    pub skip: u64,

    /// Maximum number of rows to return
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Create a page request as given; call [`PageRequest::is_valid`] before use
    pub fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }

    /// Whether `limit` is within `MIN_LIMIT..=MAX_LIMIT`
    pub fn is_valid(&self) -> bool {
        (MIN_LIMIT..=MAX_LIMIT).contains(&self.limit)
    }

    /// Offset as i64 for SQL queries
    pub fn offset_i64(&self) -> i64 {
        i64::try_from(self.skip).unwrap_or(i64::MAX)
    }

    /// Limit as i64 for SQL queries
    pub fn limit_i64(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }

    /// Cut this window out of an already filtered, ordered sequence.
    ///
    /// `total` is the length of the whole sequence, not of the window.
    pub fn slice<T, I>(&self, items: I) -> Page<T>
    where
        I: IntoIterator<Item = T>,
    {
        let all: Vec<T> = items.into_iter().collect();
        let total = all.len() as u64;
        let skip = usize::try_from(self.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        let items = all.into_iter().skip(skip).take(limit).collect();
        Page { items, total }
    }
}

/// One page of results plus the total number of matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in this window
    pub items: Vec<T>,

    /// Number of matching rows before pagination
    pub total: u64,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    /// Create an empty page
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// Transform the items using a function
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }

    /// Check if the page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items in this page
    pub fn count(&self) -> usize {
        self.items.len()
    }
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}
