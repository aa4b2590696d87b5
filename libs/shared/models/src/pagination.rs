use serde::Serialize;

/// Paginated response envelope: `{ "data": [...], "meta": {...} }`.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: usize, page: usize, limit: usize) -> Self {
        Self {
            data,
            meta: PaginationMeta {
                total,
                page,
                limit,
                total_pages: total.div_ceil(limit),
            },
        }
    }
}

/// Normalized page/limit pair. Page numbers are 1-based; limits are capped
/// at 100 rows per page.
#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    pub page: usize,
    pub limit: usize,
}

impl PageParams {
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1) as usize,
            limit: limit.unwrap_or(10).clamp(1, 100) as usize,
        }
    }

    pub fn offset(&self) -> usize {
        (self.page - 1) * self.limit
    }
}
