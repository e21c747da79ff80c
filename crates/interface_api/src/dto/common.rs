//! Shared DTO pieces: pagination and batch summaries

use serde::Serialize;

use domain_claims::ClaimRequest;

/// Upper bound on page size for listing endpoints
pub const MAX_PER_PAGE: usize = 100;

pub(crate) fn default_page() -> usize {
    1
}

pub(crate) fn default_per_page() -> usize {
    20
}

/// Pagination metadata attached to listing responses
#[derive(Debug, Serialize)]
pub struct Pagination {
    pub current_page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Aggregate counts for a batch operation
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Orders claims newest-first and returns the requested page
///
/// The sort is stable, so requests created at the same instant keep their
/// insertion order and pagination stays consistent across calls.
pub fn paginate_claims(
    mut claims: Vec<ClaimRequest>,
    page: usize,
    per_page: usize,
) -> (Vec<ClaimRequest>, Pagination) {
    let page = page.max(1);
    let per_page = per_page.clamp(1, MAX_PER_PAGE);

    claims.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let total = claims.len();
    let total_pages = total.div_ceil(per_page);
    let start = (page - 1).saturating_mul(per_page);
    let items = claims.into_iter().skip(start).take(per_page).collect();

    (
        items,
        Pagination {
            current_page: page,
            per_page,
            total,
            total_pages,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use core_kernel::{ContactId, UserId};

    fn request_created_at(offset_secs: i64) -> ClaimRequest {
        let mut request = ClaimRequest::new(UserId::new(), ContactId::new(), None);
        request.created_at = Utc::now() + Duration::seconds(offset_secs);
        request
    }

    #[test]
    fn test_paginate_orders_newest_first() {
        let oldest = request_created_at(-20);
        let middle = request_created_at(-10);
        let newest = request_created_at(0);

        let (items, pagination) =
            paginate_claims(vec![oldest.clone(), newest.clone(), middle.clone()], 1, 10);

        let ids: Vec<_> = items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![newest.id, middle.id, oldest.id]);
        assert_eq!(pagination.total, 3);
        assert_eq!(pagination.total_pages, 1);
    }

    #[test]
    fn test_paginate_slices_pages() {
        let requests: Vec<ClaimRequest> =
            (0..5).map(|i| request_created_at(-(i as i64))).collect();

        let (page_one, meta) = paginate_claims(requests.clone(), 1, 2);
        assert_eq!(page_one.len(), 2);
        assert_eq!(meta.total, 5);
        assert_eq!(meta.total_pages, 3);

        let (page_three, _) = paginate_claims(requests, 3, 2);
        assert_eq!(page_three.len(), 1);
    }

    #[test]
    fn test_paginate_ties_keep_insertion_order() {
        let now = Utc::now();
        let mut first = ClaimRequest::new(UserId::new(), ContactId::new(), None);
        first.created_at = now;
        let mut second = ClaimRequest::new(UserId::new(), ContactId::new(), None);
        second.created_at = now;

        let (items, _) = paginate_claims(vec![first.clone(), second.clone()], 1, 10);

        let ids: Vec<_> = items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn test_paginate_clamps_out_of_range_inputs() {
        let requests = vec![request_created_at(0)];

        let (items, meta) = paginate_claims(requests, 0, 0);

        assert_eq!(items.len(), 1);
        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.per_page, 1);
    }
}
