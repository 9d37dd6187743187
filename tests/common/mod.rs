//! Shared test harness: seeded mock backends and request fixtures.

use std::sync::Arc;

use transfer_api_validator::{
    AssetReference, AssetsService, ConformanceSuite, Destination, MockClient, RandomRecords,
    SeedCounts, TransferMethod, ValidatorConfig, WithdrawalRequest, WithdrawalsService,
};

/// Seeded in-process backend plus the pieces tests poke at directly.
#[allow(dead_code)]
pub struct TestBackend {
    pub client: Arc<MockClient>,
}

#[allow(dead_code)]
impl TestBackend {
    pub fn new() -> Self {
        Self::with_counts(SeedCounts::default())
    }

    pub fn with_counts(counts: SeedCounts) -> Self {
        let client = MockClient::seeded(counts).expect("failed to seed mock backend");
        Self {
            client: Arc::new(client),
        }
    }

    /// Conformance suite over this backend with a small page limit so
    /// drains exercise multiple cursor pages.
    pub fn suite(&self, page_limit: usize) -> ConformanceSuite<MockClient> {
        let config = ValidatorConfig::new("test-account").page_limit(page_limit);
        ConformanceSuite::new(self.client.clone(), config)
    }
}

/// Standalone withdrawal mock with its own catalog, for state-level tests.
#[allow(dead_code)]
pub fn seeded_withdrawals(
    capabilities: usize,
    withdrawals: usize,
    catalog_assets: usize,
) -> (WithdrawalsService, AssetsService) {
    let mut generator = RandomRecords::new();
    let catalog = AssetsService::seed(catalog_assets, &mut generator)
        .expect("failed to seed asset catalog");
    let service = WithdrawalsService::seed(capabilities, withdrawals, &catalog, &mut generator)
        .expect("failed to seed withdrawal mock");
    (service, catalog)
}

/// A valid blockchain withdrawal request.
#[allow(dead_code)]
pub fn withdrawal_request(idempotency_key: &str) -> WithdrawalRequest {
    WithdrawalRequest {
        idempotency_key: idempotency_key.to_string(),
        balance_asset: AssetReference::cryptocurrency("ETH"),
        balance_amount: "2.5".to_string(),
        destination: Destination {
            transfer_method: TransferMethod::PublicBlockchain,
            asset: AssetReference::cryptocurrency("ETH"),
            address: Some("0x52908400098527886e0f7030069857d2e4169ee7".to_string()),
            account_holder: None,
        },
    }
}
