//! Fake-record generation for the mock backend.
//!
//! Produces schema-conformant instances of the domain types. The mock
//! services decide how many records to fabricate and which asset ids get
//! rewritten afterwards; this module only knows how to build one valid
//! record at a time.

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::asset::{LAYER_1_CRYPTOCURRENCIES, LAYER_2_CRYPTOCURRENCIES, NATIONAL_CURRENCY_CODES};
use crate::types::{
    AdditionalAsset, AssetReference, Destination, Quote, QuoteCapability, QuoteStatus,
    TransferMethod, Withdrawal, WithdrawalCapability, WithdrawalStatus,
    WithdrawalTransferCapability,
};

/// Seam for fabricating schema-conformant fake records.
pub trait FakeRecordGenerator: Send {
    fn withdrawal(&mut self) -> Withdrawal;
    fn withdrawal_capability(&mut self) -> WithdrawalCapability;
    fn additional_asset(&mut self) -> AdditionalAsset;
    fn quote_capability(&mut self) -> QuoteCapability;
    fn quote(&mut self) -> Quote;
}

const TRANSFER_METHODS: [TransferMethod; 5] = [
    TransferMethod::InternalTransfer,
    TransferMethod::PeerAccountTransfer,
    TransferMethod::Iban,
    TransferMethod::Swift,
    TransferMethod::PublicBlockchain,
];

/// Default generator backed by a seedable RNG.
pub struct RandomRecords {
    rng: StdRng,
}

impl RandomRecords {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for reproducible tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn asset_reference(&mut self) -> AssetReference {
        match self.rng.gen_range(0..3) {
            0 => AssetReference::national_currency(
                *NATIONAL_CURRENCY_CODES.choose(&mut self.rng).unwrap(),
            ),
            1 => {
                let symbol = if self.rng.gen_bool(0.5) {
                    LAYER_1_CRYPTOCURRENCIES.choose(&mut self.rng).unwrap()
                } else {
                    LAYER_2_CRYPTOCURRENCIES.choose(&mut self.rng).unwrap()
                };
                AssetReference::cryptocurrency(*symbol)
            }
            // Fresh opaque id; the mock's rewrite pass replaces these with
            // ids the catalog actually knows.
            _ => AssetReference::other(Uuid::new_v4().to_string()),
        }
    }

    fn amount(&mut self) -> String {
        format!(
            "{}.{:02}",
            self.rng.gen_range(1..10_000),
            self.rng.gen_range(0..100)
        )
    }

    fn transfer_method(&mut self) -> TransferMethod {
        *TRANSFER_METHODS.choose(&mut self.rng).unwrap()
    }

    fn destination(&mut self) -> Destination {
        let transfer_method = self.transfer_method();
        let address = match transfer_method {
            TransferMethod::PublicBlockchain => {
                Some(format!("0x{:040x}", self.rng.gen::<u128>()))
            }
            TransferMethod::Iban => Some(format!("DE{:020}", self.rng.gen_range(0..u64::MAX))),
            TransferMethod::Swift => Some(format!("ACCT{:010}", self.rng.gen_range(0..u32::MAX))),
            _ => None,
        };
        Destination {
            transfer_method,
            asset: self.asset_reference(),
            address,
            account_holder: None,
        }
    }
}

impl Default for RandomRecords {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeRecordGenerator for RandomRecords {
    fn withdrawal(&mut self) -> Withdrawal {
        // Spread creation times so ordered listings are non-trivial.
        let created_at = Utc::now() - Duration::minutes(self.rng.gen_range(1..60 * 24 * 30));
        Withdrawal {
            id: Uuid::new_v4().to_string(),
            balance_asset: self.asset_reference(),
            balance_amount: self.amount(),
            status: WithdrawalStatus::Pending,
            created_at,
            destination: self.destination(),
        }
    }

    fn withdrawal_capability(&mut self) -> WithdrawalCapability {
        WithdrawalCapability {
            id: Uuid::new_v4().to_string(),
            balance_asset: self.asset_reference(),
            withdrawal: WithdrawalTransferCapability {
                asset: self.asset_reference(),
                transfer_method: self.transfer_method(),
            },
        }
    }

    fn additional_asset(&mut self) -> AdditionalAsset {
        let serial = self.rng.gen_range(1..10_000u32);
        AdditionalAsset {
            id: Uuid::new_v4().to_string(),
            name: format!("Private Token {serial}"),
            symbol: format!("PT{serial}"),
            decimal_places: self.rng.gen_range(0..=18),
        }
    }

    fn quote_capability(&mut self) -> QuoteCapability {
        QuoteCapability {
            id: Uuid::new_v4().to_string(),
            from_asset: self.asset_reference(),
            to_asset: self.asset_reference(),
        }
    }

    fn quote(&mut self) -> Quote {
        let created_at = Utc::now() - Duration::minutes(self.rng.gen_range(1..60 * 24 * 30));
        Quote {
            id: Uuid::new_v4().to_string(),
            from_asset: self.asset_reference(),
            to_asset: self.asset_reference(),
            from_amount: self.amount(),
            to_amount: self.amount(),
            status: QuoteStatus::Ready,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_withdrawals_are_pending_with_unique_ids() {
        let mut generator = RandomRecords::seeded(7);
        let a = generator.withdrawal();
        let b = generator.withdrawal();
        assert_ne!(a.id, b.id);
        assert_eq!(a.status, WithdrawalStatus::Pending);
        assert_eq!(b.status, WithdrawalStatus::Pending);
    }

    #[test]
    fn seeded_generator_is_reproducible() {
        let a = RandomRecords::seeded(42).withdrawal_capability();
        let b = RandomRecords::seeded(42).withdrawal_capability();
        // Ids come from uuid, not the rng, so compare the drawn fields.
        assert_eq!(a.balance_asset, b.balance_asset);
        assert_eq!(a.withdrawal.transfer_method, b.withdrawal.transfer_method);
    }

    #[test]
    fn generated_references_use_known_sets_or_opaque_ids() {
        let mut generator = RandomRecords::seeded(1);
        for _ in 0..50 {
            match generator.asset_reference() {
                AssetReference::NationalCurrency {
                    national_currency_code,
                } => {
                    assert!(NATIONAL_CURRENCY_CODES.contains(&national_currency_code.as_str()))
                }
                AssetReference::Cryptocurrency {
                    cryptocurrency_symbol,
                } => assert!(
                    LAYER_1_CRYPTOCURRENCIES.contains(&cryptocurrency_symbol.as_str())
                        || LAYER_2_CRYPTOCURRENCIES.contains(&cryptocurrency_symbol.as_str())
                ),
                AssetReference::Other { asset_id } => assert!(!asset_id.is_empty()),
            }
        }
    }
}
