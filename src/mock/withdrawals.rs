//! Mock withdrawal backend: seeded capability and withdrawal stores with
//! categorized, ordered query views.

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use super::rewrite_opaque_id;
use crate::catalog::AssetCatalog;
use crate::error::{Error, Result};
use crate::fake::FakeRecordGenerator;
use crate::repository::Repository;
use crate::types::{
    Order, TransferMethod, Withdrawal, WithdrawalCapability, WithdrawalRequest, WithdrawalStatus,
};

/// In-memory mock of the withdrawal resource group.
///
/// Owns its two repositories explicitly so independent mock instances can
/// coexist within one test process.
pub struct WithdrawalsService {
    withdrawals: Repository<Withdrawal>,
    capabilities: Repository<WithdrawalCapability>,
}

impl WithdrawalsService {
    /// Fabricate `capabilities_count` withdrawal capabilities and
    /// `withdrawals_count` withdrawals, then rewrite every opaque asset id
    /// to one the catalog actually knows.
    pub fn seed(
        capabilities_count: usize,
        withdrawals_count: usize,
        catalog: &dyn AssetCatalog,
        generator: &mut dyn FakeRecordGenerator,
    ) -> Result<Self> {
        let service = Self {
            withdrawals: Repository::new(),
            capabilities: Repository::new(),
        };

        for _ in 0..capabilities_count {
            service.capabilities.create(generator.withdrawal_capability())?;
        }
        for _ in 0..withdrawals_count {
            service.withdrawals.create(generator.withdrawal())?;
        }

        service.apply_known_assets(catalog)?;
        tracing::debug!(
            capabilities = capabilities_count,
            withdrawals = withdrawals_count,
            "seeded withdrawal mock"
        );
        Ok(service)
    }

    /// Rewrite pass: every opaque asset id stored in a capability or
    /// withdrawal must come from the catalog's additional-asset set, so the
    /// asset resolver never fails on the mock's own data. Ids already in the
    /// set are left alone, making a re-run a no-op.
    pub fn apply_known_assets(&self, catalog: &dyn AssetCatalog) -> Result<()> {
        let known_ids = catalog.additional_asset_ids();

        for id in self.capabilities.ids() {
            self.capabilities.modify(&id, |capability| {
                rewrite_opaque_id(&mut capability.balance_asset, &known_ids);
                rewrite_opaque_id(&mut capability.withdrawal.asset, &known_ids);
            })?;
        }

        for id in self.withdrawals.ids() {
            self.withdrawals.modify(&id, |withdrawal| {
                rewrite_opaque_id(&mut withdrawal.balance_asset, &known_ids);
                rewrite_opaque_id(&mut withdrawal.destination.asset, &known_ids);
            })?;
        }

        Ok(())
    }

    /// All withdrawal capabilities, no ordering contract.
    pub fn capabilities(&self) -> Vec<WithdrawalCapability> {
        self.capabilities.list()
    }

    /// All withdrawals sorted by creation time. Ties break on id so paged
    /// reads see one stable order.
    pub fn withdrawals(&self, order: Order) -> Vec<Withdrawal> {
        let mut withdrawals = self.withdrawals.list();
        withdrawals.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        if order == Order::Desc {
            withdrawals.reverse();
        }
        withdrawals
    }

    pub fn withdrawal(&self, id: &str) -> Result<Withdrawal> {
        self.withdrawals
            .find(id)
            .ok_or_else(|| Error::not_found("Withdrawal not found"))
    }

    pub fn internal_withdrawals(&self, order: Order) -> Vec<Withdrawal> {
        self.filtered(order, |m| m == TransferMethod::InternalTransfer)
    }

    pub fn peer_account_withdrawals(&self, order: Order) -> Vec<Withdrawal> {
        self.filtered(order, |m| m == TransferMethod::PeerAccountTransfer)
    }

    pub fn fiat_withdrawals(&self, order: Order) -> Vec<Withdrawal> {
        self.filtered(order, |m| m.is_fiat())
    }

    pub fn blockchain_withdrawals(&self, order: Order) -> Vec<Withdrawal> {
        self.filtered(order, |m| m == TransferMethod::PublicBlockchain)
    }

    /// Create a withdrawal from a request: fresh id, status forced to
    /// `Pending`, `created_at` stamped now, idempotency key dropped.
    pub fn create_withdrawal(&self, request: WithdrawalRequest) -> Result<Withdrawal> {
        request
            .validate()
            .map_err(|e| Error::validation(e.to_string()))?;

        let withdrawal = Withdrawal {
            id: Uuid::new_v4().to_string(),
            balance_asset: request.balance_asset,
            balance_amount: request.balance_amount,
            status: WithdrawalStatus::Pending,
            created_at: Utc::now(),
            destination: request.destination,
        };
        let created = self.withdrawals.create(withdrawal)?;
        tracing::info!(id = %created.id, "created withdrawal");
        Ok(created)
    }

    fn filtered(&self, order: Order, predicate: impl Fn(TransferMethod) -> bool) -> Vec<Withdrawal> {
        self.withdrawals(order)
            .into_iter()
            .filter(|w| predicate(w.destination.transfer_method))
            .collect()
    }
}
