//! Transport collaborator contract and the in-process mock implementation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::{AssetLookup, AssetsService};
use crate::error::Result;
use crate::fake::RandomRecords;
use crate::mock::{LiquidityService, WithdrawalsService};
use crate::types::{
    AdditionalAsset, Order, Quote, QuoteCapability, QuoteRequest, Withdrawal,
    WithdrawalCapability, WithdrawalRequest,
};

/// Per-resource-group operations the conformance suite drives.
///
/// Implementations return parsed, schema-validated response bodies or fail
/// with a transport/validation error. Pagination follows the cursor scheme:
/// `limit` items after `starting_after`, short page meaning end of
/// collection. The [`AssetLookup`] supertrait is the `getAssetDetails`
/// operation the asset resolver uses for opaque ids.
#[async_trait]
pub trait Client: AssetLookup + Send + Sync {
    async fn get_quote_capabilities(&self) -> Result<Vec<QuoteCapability>>;

    async fn create_quote(&self, account_id: &str, request: QuoteRequest) -> Result<Quote>;

    async fn get_quote_details(&self, account_id: &str, id: &str) -> Result<Quote>;

    async fn get_quotes(
        &self,
        account_id: &str,
        limit: usize,
        starting_after: Option<&str>,
    ) -> Result<Vec<Quote>>;

    async fn execute_quote(&self, account_id: &str, id: &str) -> Result<Quote>;

    async fn get_withdrawal_capabilities(&self, account_id: &str)
        -> Result<Vec<WithdrawalCapability>>;

    async fn get_withdrawals(
        &self,
        account_id: &str,
        limit: usize,
        starting_after: Option<&str>,
    ) -> Result<Vec<Withdrawal>>;

    async fn get_withdrawal_details(&self, account_id: &str, id: &str) -> Result<Withdrawal>;

    async fn create_withdrawal(
        &self,
        account_id: &str,
        request: WithdrawalRequest,
    ) -> Result<Withdrawal>;
}

/// Record counts for seeding a [`MockClient`].
#[derive(Debug, Clone, Copy)]
pub struct SeedCounts {
    pub additional_assets: usize,
    pub withdrawal_capabilities: usize,
    pub withdrawals: usize,
    pub quote_capabilities: usize,
    pub quotes: usize,
}

impl Default for SeedCounts {
    fn default() -> Self {
        Self {
            additional_assets: 5,
            withdrawal_capabilities: 10,
            withdrawals: 30,
            quote_capabilities: 10,
            quotes: 30,
        }
    }
}

/// In-process backend: answers [`Client`] calls from the mock services, so
/// the harness itself can be exercised without a real server.
pub struct MockClient {
    assets: Arc<AssetsService>,
    withdrawals: Arc<WithdrawalsService>,
    liquidity: Arc<LiquidityService>,
}

impl MockClient {
    pub fn new(
        assets: Arc<AssetsService>,
        withdrawals: Arc<WithdrawalsService>,
        liquidity: Arc<LiquidityService>,
    ) -> Self {
        Self {
            assets,
            withdrawals,
            liquidity,
        }
    }

    /// Build a fully seeded mock backend.
    pub fn seeded(counts: SeedCounts) -> Result<Self> {
        let mut generator = RandomRecords::new();
        let assets = Arc::new(AssetsService::seed(counts.additional_assets, &mut generator)?);
        let withdrawals = Arc::new(WithdrawalsService::seed(
            counts.withdrawal_capabilities,
            counts.withdrawals,
            assets.as_ref(),
            &mut generator,
        )?);
        let liquidity = Arc::new(LiquidityService::seed(
            counts.quote_capabilities,
            counts.quotes,
            assets.as_ref(),
            &mut generator,
        )?);
        Ok(Self::new(assets, withdrawals, liquidity))
    }

    pub fn withdrawals_service(&self) -> &WithdrawalsService {
        &self.withdrawals
    }

    pub fn liquidity_service(&self) -> &LiquidityService {
        &self.liquidity
    }

    pub fn assets_service(&self) -> &AssetsService {
        &self.assets
    }
}

#[async_trait]
impl AssetLookup for MockClient {
    async fn asset_details(&self, id: &str) -> Result<AdditionalAsset> {
        self.assets.asset_details(id).await
    }
}

#[async_trait]
impl Client for MockClient {
    async fn get_quote_capabilities(&self) -> Result<Vec<QuoteCapability>> {
        Ok(self.liquidity.capabilities())
    }

    async fn create_quote(&self, _account_id: &str, request: QuoteRequest) -> Result<Quote> {
        self.liquidity.create_quote(request)
    }

    async fn get_quote_details(&self, _account_id: &str, id: &str) -> Result<Quote> {
        self.liquidity.quote(id)
    }

    async fn get_quotes(
        &self,
        _account_id: &str,
        limit: usize,
        starting_after: Option<&str>,
    ) -> Result<Vec<Quote>> {
        Ok(self.liquidity.quotes(limit, starting_after))
    }

    async fn execute_quote(&self, _account_id: &str, id: &str) -> Result<Quote> {
        self.liquidity.execute_quote(id)
    }

    async fn get_withdrawal_capabilities(
        &self,
        _account_id: &str,
    ) -> Result<Vec<WithdrawalCapability>> {
        Ok(self.withdrawals.capabilities())
    }

    async fn get_withdrawals(
        &self,
        _account_id: &str,
        limit: usize,
        starting_after: Option<&str>,
    ) -> Result<Vec<Withdrawal>> {
        let ordered = self.withdrawals.withdrawals(Order::Asc);
        Ok(crate::mock::page_slice(&ordered, limit, starting_after))
    }

    async fn get_withdrawal_details(&self, _account_id: &str, id: &str) -> Result<Withdrawal> {
        self.withdrawals.withdrawal(id)
    }

    async fn create_withdrawal(
        &self,
        _account_id: &str,
        request: WithdrawalRequest,
    ) -> Result<Withdrawal> {
        self.withdrawals.create_withdrawal(request)
    }
}
