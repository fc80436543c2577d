use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct Pagination {
    pub page: i32,
    pub page_size: i32,
    pub total_items: i64,
    pub total_pages: i32,
}

impl Pagination {
    pub fn new(page: i32, page_size: i32, total_items: i64) -> Self {
        let total_pages = if page_size > 0 {
            ((total_items + page_size as i64 - 1) / page_size as i64) as i32
        } else {
            0
        };

        Self {
            page,
            page_size,
            total_items,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Pagination::new(1, 20, 41).total_pages, 3);
        assert_eq!(Pagination::new(1, 20, 40).total_pages, 2);
        assert_eq!(Pagination::new(1, 20, 0).total_pages, 0);
    }
}
