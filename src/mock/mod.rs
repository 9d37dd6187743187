//! In-memory mock backend.
//!
//! Fabricates schema-conformant records scoped to the account's supported
//! assets and serves them back through the same operations the conformance
//! suite exercises, so the harness can run without a real server.

mod liquidity;
mod withdrawals;

pub use liquidity::LiquidityService;
pub use withdrawals::WithdrawalsService;

use rand::seq::SliceRandom;

use crate::repository::RecordId;
use crate::types::AssetReference;

/// Replace an opaque asset id with one uniformly drawn from `known_ids`,
/// unless it is already a member — that keeps a re-run of the rewrite pass a
/// no-op. References under the other two schemes are untouched.
pub(crate) fn rewrite_opaque_id(reference: &mut AssetReference, known_ids: &[String]) {
    if let AssetReference::Other { asset_id } = reference {
        if known_ids.iter().any(|known| known == asset_id) {
            return;
        }
        match known_ids.choose(&mut rand::thread_rng()) {
            Some(known) => *asset_id = known.clone(),
            // Nothing to rewrite to; the resolver will report these.
            None => tracing::warn!(%asset_id, "no additional assets available for rewrite"),
        }
    }
}

/// Cursor slice of an already-ordered collection: everything after the
/// `starting_after` id, capped at `limit`. An unknown cursor yields an empty
/// page, terminating any drain.
pub(crate) fn page_slice<T: RecordId + Clone>(
    items: &[T],
    limit: usize,
    starting_after: Option<&str>,
) -> Vec<T> {
    let start = match starting_after {
        Some(cursor) => items
            .iter()
            .position(|item| item.record_id() == cursor)
            .map(|index| index + 1)
            .unwrap_or(items.len()),
        None => 0,
    };
    items.iter().skip(start).take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(String);

    impl RecordId for Row {
        fn record_id(&self) -> &str {
            &self.0
        }
    }

    fn rows(n: usize) -> Vec<Row> {
        (0..n).map(|i| Row(format!("r{i}"))).collect()
    }

    #[test]
    fn slices_are_disjoint_and_cover_the_collection() {
        let items = rows(7);

        let first = page_slice(&items, 3, None);
        assert_eq!(first, items[0..3]);

        let second = page_slice(&items, 3, Some("r2"));
        assert_eq!(second, items[3..6]);

        let third = page_slice(&items, 3, Some("r5"));
        assert_eq!(third, items[6..7]);
    }

    #[test]
    fn unknown_cursor_yields_empty_page() {
        let items = rows(3);
        assert!(page_slice(&items, 3, Some("ghost")).is_empty());
    }
}
