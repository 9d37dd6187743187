//! State-level tests for the mock backend services: seeding, the
//! known-additional-assets rewrite pass, ordered and categorized views, and
//! the create paths.

mod common;

use std::collections::HashSet;

use transfer_api_validator::{
    AssetCatalog, AssetReference, AssetsService, Error, LiquidityService, Order, QuoteRequest,
    QuoteStatus, RandomRecords, Withdrawal, WithdrawalStatus,
};

use common::{seeded_withdrawals, withdrawal_request};

fn opaque_ids(withdrawals: &[Withdrawal]) -> Vec<String> {
    withdrawals
        .iter()
        .flat_map(|w| {
            [
                w.balance_asset.asset_id(),
                w.destination.asset.asset_id(),
            ]
        })
        .flatten()
        .map(str::to_string)
        .collect()
}

#[test]
fn seeding_scopes_opaque_ids_to_the_catalog() {
    let (service, catalog) = seeded_withdrawals(5, 10, 3);
    let known: HashSet<String> = catalog.additional_asset_ids().into_iter().collect();
    assert_eq!(known.len(), 3);

    assert_eq!(service.capabilities().len(), 5);
    assert_eq!(service.withdrawals(Order::Asc).len(), 10);

    for id in opaque_ids(&service.withdrawals(Order::Asc)) {
        assert!(known.contains(&id), "unknown opaque asset id {id}");
    }
    for capability in service.capabilities() {
        for reference in [&capability.balance_asset, &capability.withdrawal.asset] {
            if let Some(id) = reference.asset_id() {
                assert!(known.contains(id), "unknown opaque asset id {id}");
            }
        }
    }
}

#[test]
fn rewrite_pass_is_a_no_op_on_rewritten_data() {
    let (service, catalog) = seeded_withdrawals(5, 10, 3);

    let before = service.withdrawals(Order::Asc);
    let capabilities_before = service.capabilities().len();
    service.apply_known_assets(&catalog).unwrap();

    assert_eq!(service.withdrawals(Order::Asc), before);
    assert_eq!(service.capabilities().len(), capabilities_before);
}

#[test]
fn withdrawals_are_ordered_by_created_at() {
    let (service, _) = seeded_withdrawals(0, 10, 2);

    let desc = service.withdrawals(Order::Desc);
    for pair in desc.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }

    let asc = service.withdrawals(Order::Asc);
    for pair in asc.windows(2) {
        assert!(pair[0].created_at <= pair[1].created_at);
    }
    assert_eq!(asc.len(), desc.len());
}

#[test]
fn categorized_views_partition_the_collection() {
    let (service, _) = seeded_withdrawals(0, 40, 2);

    let all: HashSet<String> = service
        .withdrawals(Order::Asc)
        .into_iter()
        .map(|w| w.id)
        .collect();

    let views = [
        service.internal_withdrawals(Order::Asc),
        service.peer_account_withdrawals(Order::Asc),
        service.fiat_withdrawals(Order::Asc),
        service.blockchain_withdrawals(Order::Asc),
    ];

    let mut seen: HashSet<String> = HashSet::new();
    for view in &views {
        for withdrawal in view {
            assert!(
                seen.insert(withdrawal.id.clone()),
                "withdrawal {} appears in more than one category",
                withdrawal.id
            );
        }
    }
    assert_eq!(seen, all, "categories must cover every withdrawal exactly once");
}

#[test]
fn create_withdrawal_forces_fresh_identity_and_pending_status() {
    let (service, _) = seeded_withdrawals(0, 0, 1);

    let first = service
        .create_withdrawal(withdrawal_request("key-1"))
        .unwrap();
    let second = service
        .create_withdrawal(withdrawal_request("key-1"))
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(first.status, WithdrawalStatus::Pending);
    assert_eq!(second.status, WithdrawalStatus::Pending);
    assert_eq!(first.balance_amount, "2.5");

    let found = service.withdrawal(&first.id).unwrap();
    assert_eq!(found, first);
}

#[test]
fn create_withdrawal_rejects_empty_fields() {
    let (service, _) = seeded_withdrawals(0, 0, 1);

    let mut request = withdrawal_request("");
    let err = service.create_withdrawal(request.clone()).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    request.idempotency_key = "key".to_string();
    request.balance_amount = String::new();
    let err = service.create_withdrawal(request).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn unknown_withdrawal_is_not_found() {
    let (service, _) = seeded_withdrawals(0, 3, 1);
    let err = service.withdrawal("no-such-id").unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

// ── Liquidity mock ──

fn seeded_liquidity(capabilities: usize, quotes: usize) -> (LiquidityService, AssetsService) {
    let mut generator = RandomRecords::new();
    let catalog = AssetsService::seed(3, &mut generator).unwrap();
    let service = LiquidityService::seed(capabilities, quotes, &catalog, &mut generator).unwrap();
    (service, catalog)
}

fn usd_to_btc(from_amount: Option<&str>, to_amount: Option<&str>) -> QuoteRequest {
    QuoteRequest {
        from_asset: AssetReference::national_currency("USD"),
        to_asset: AssetReference::cryptocurrency("BTC"),
        from_amount: from_amount.map(str::to_string),
        to_amount: to_amount.map(str::to_string),
    }
}

#[test]
fn create_quote_rejects_dual_amounts() {
    let (service, _) = seeded_liquidity(2, 0);
    let err = service
        .create_quote(usd_to_btc(Some("1"), Some("1")))
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn create_quote_requires_one_amount() {
    let (service, _) = seeded_liquidity(2, 0);
    let err = service.create_quote(usd_to_btc(None, None)).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn create_quote_rejects_unresolvable_assets() {
    let (service, _) = seeded_liquidity(2, 0);
    let request = QuoteRequest {
        from_asset: AssetReference::other("not-a-real-asset"),
        to_asset: AssetReference::other("also-not-real"),
        from_amount: None,
        to_amount: Some("1".to_string()),
    };
    let err = service.create_quote(request).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn created_quote_is_ready_and_retrievable() {
    let (service, _) = seeded_liquidity(2, 0);
    let created = service.create_quote(usd_to_btc(Some("1"), None)).unwrap();
    assert_eq!(created.status, QuoteStatus::Ready);
    assert_eq!(created.from_amount, "1");

    let found = service.quote(&created.id).unwrap();
    assert_eq!(found, created);
}

#[test]
fn execute_quote_transitions_out_of_ready_exactly_once() {
    let (service, _) = seeded_liquidity(2, 0);
    let created = service.create_quote(usd_to_btc(None, Some("3"))).unwrap();

    let executed = service.execute_quote(&created.id).unwrap();
    assert!(matches!(
        executed.status,
        QuoteStatus::Executing | QuoteStatus::Executed
    ));

    let err = service.execute_quote(&created.id).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn quote_pages_are_disjoint_ordered_slices() {
    let (service, _) = seeded_liquidity(0, 7);

    let first = service.quotes(3, None);
    assert_eq!(first.len(), 3);
    let second = service.quotes(3, Some(&first[2].id));
    assert_eq!(second.len(), 3);
    let third = service.quotes(3, Some(&second[2].id));
    assert_eq!(third.len(), 1);

    let mut ids = HashSet::new();
    for quote in first.iter().chain(&second).chain(&third) {
        assert!(ids.insert(quote.id.clone()), "duplicate quote in pages");
    }
    assert_eq!(ids.len(), 7);

    let all: Vec<_> = first.into_iter().chain(second).chain(third).collect();
    for pair in all.windows(2) {
        assert!(pair[0].created_at <= pair[1].created_at);
    }
}
