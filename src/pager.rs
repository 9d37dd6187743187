//! Cursor-based traversal that exhausts a remote paginated collection.

use std::future::Future;

use crate::error::Result;
use crate::repository::RecordId;

/// Drains a cursor-paginated collection into one ordered sequence.
///
/// One page is in flight at a time; the next cursor is the id of the last
/// item of the previous page, and a short page signals the end of the
/// collection. A well-behaved backend therefore costs ⌈N/limit⌉ requests,
/// with one extra empty round trip when N is an exact multiple of the limit.
/// A backend that always returns exactly `limit` items never terminates —
/// that is a backend contract requirement, not a pager concern.
pub struct CollectionPager {
    limit: usize,
}

impl CollectionPager {
    /// Page size used by the conformance suite.
    pub const DEFAULT_LIMIT: usize = 200;

    pub fn new(limit: usize) -> Self {
        assert!(limit > 0, "page limit must be positive");
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Fetch pages until a short page, accumulating items in response order.
    ///
    /// `fetch_page` receives the page limit and the current cursor (`None`
    /// for the first page). Any page-fetch error propagates immediately and
    /// the partial accumulation is dropped.
    pub async fn drain<T, F, Fut>(&self, mut fetch_page: F) -> Result<Vec<T>>
    where
        T: RecordId,
        F: FnMut(usize, Option<String>) -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        let mut items: Vec<T> = Vec::new();
        let mut starting_after: Option<String> = None;

        loop {
            let page = fetch_page(self.limit, starting_after.take()).await?;
            let exhausted = page.len() < self.limit;
            items.extend(page);
            if exhausted {
                break;
            }
            starting_after = items.last().map(|item| item.record_id().to_string());
        }

        Ok(items)
    }
}

impl Default for CollectionPager {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::error::Error;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(String);

    impl RecordId for Row {
        fn record_id(&self) -> &str {
            &self.0
        }
    }

    fn rows(n: usize) -> Vec<Row> {
        (0..n).map(|i| Row(format!("row-{i:04}"))).collect()
    }

    /// Serve `collection` in cursor slices, counting requests.
    async fn drain_collection(
        collection: Vec<Row>,
        limit: usize,
    ) -> (Result<Vec<Row>>, usize) {
        let requests = Cell::new(0usize);
        let pager = CollectionPager::new(limit);
        let result = pager
            .drain(|limit, starting_after| {
                requests.set(requests.get() + 1);
                let start = match &starting_after {
                    Some(cursor) => {
                        collection
                            .iter()
                            .position(|r| r.0 == *cursor)
                            .map(|i| i + 1)
                            .unwrap_or(collection.len())
                    }
                    None => 0,
                };
                let page: Vec<Row> = collection
                    .iter()
                    .skip(start)
                    .take(limit)
                    .cloned()
                    .collect();
                async move { Ok(page) }
            })
            .await;
        (result, requests.get())
    }

    #[tokio::test]
    async fn empty_collection_costs_one_request() {
        let (result, requests) = drain_collection(vec![], 10).await;
        assert_eq!(result.unwrap(), vec![]);
        assert_eq!(requests, 1);
    }

    #[tokio::test]
    async fn preserves_order_without_duplicates() {
        let collection = rows(23);
        let (result, requests) = drain_collection(collection.clone(), 10).await;
        assert_eq!(result.unwrap(), collection);
        assert_eq!(requests, 3);
    }

    #[tokio::test]
    async fn exact_multiple_costs_one_extra_empty_page() {
        let collection = rows(10);
        let (result, requests) = drain_collection(collection.clone(), 10).await;
        assert_eq!(result.unwrap(), collection);
        assert_eq!(requests, 2);
    }

    #[tokio::test]
    async fn single_short_page_terminates_immediately() {
        let collection = rows(7);
        let (result, requests) = drain_collection(collection.clone(), 10).await;
        assert_eq!(result.unwrap(), collection);
        assert_eq!(requests, 1);
    }

    #[tokio::test]
    async fn fetch_error_aborts_the_drain() {
        let requests = Cell::new(0usize);
        let pager = CollectionPager::new(5);
        let result: Result<Vec<Row>> = pager
            .drain(|_, starting_after| {
                requests.set(requests.get() + 1);
                let fail = starting_after.is_some();
                async move {
                    if fail {
                        Err(Error::transport("boom"))
                    } else {
                        Ok(rows(5))
                    }
                }
            })
            .await;
        assert!(matches!(result.unwrap_err(), Error::Transport(_)));
        assert_eq!(requests.get(), 2);
    }
}
