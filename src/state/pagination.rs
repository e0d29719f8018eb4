use serde_json::Value;

use crate::utils::mappers::Mapping;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const PAGE_SIZE_OPTIONS: [u32; 3] = [10, 20, 50];

/// Server-side pagination position. `page` is 0-based here and 1-based on
/// the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationModel {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PaginationModel {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationModel {
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page: 0,
            page_size,
        }
    }

    /// Next model after the grid asks for `page`/`page_size`. A new page size
    /// starts over from the first page.
    pub fn change(&self, page: u32, page_size: u32) -> Self {
        let page = if page_size != self.page_size { 0 } else { page };

        Self { page, page_size }
    }

    pub fn params(&self) -> Mapping {
        let mut params = Mapping::new();
        params.insert("page".into(), Value::from(self.page.saturating_add(1)));
        params.insert("limit".into(), Value::from(self.page_size));
        params
    }
}
