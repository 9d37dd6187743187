//! Asset reference classification and validation.
//!
//! National currency codes and cryptocurrency symbols validate against fixed
//! enumerated sets with no network access; opaque asset ids require one
//! round trip to the backend's asset catalog.

use std::sync::Arc;

use crate::catalog::AssetLookup;
use crate::types::AssetReference;

/// National currency codes accepted in asset references.
pub const NATIONAL_CURRENCY_CODES: &[&str] = &[
    "USD", "EUR", "GBP", "JPY", "CHF", "CAD", "AUD", "CNY", "SGD", "HKD", "NZD", "SEK", "NOK",
    "DKK", "PLN", "ZAR", "BRL", "MXN", "ILS", "AED",
];

/// Layer-1 cryptocurrency symbols accepted in asset references.
pub const LAYER_1_CRYPTOCURRENCIES: &[&str] = &[
    "BTC", "ETH", "SOL", "ADA", "DOT", "AVAX", "XRP", "LTC", "BCH", "XLM", "ALGO", "ATOM", "NEAR",
    "TRX",
];

/// Layer-2 cryptocurrency symbols accepted in asset references.
pub const LAYER_2_CRYPTOCURRENCIES: &[&str] = &["MATIC", "ARB", "OP", "IMX", "LRC", "METIS"];

/// Outcome of resolving a single asset reference.
///
/// Distinguishes "confirmed invalid" from "could not confirm": a catalog
/// lookup failure yields [`Resolution::LookupFailed`], never a hard error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Valid,
    Invalid,
    LookupFailed(String),
}

impl Resolution {
    pub fn is_valid(&self) -> bool {
        matches!(self, Resolution::Valid)
    }
}

/// Classifies and validates asset references against the enumerated code
/// sets and, for opaque ids, the backend's asset catalog.
pub struct AssetResolver<L: AssetLookup + ?Sized> {
    lookup: Arc<L>,
}

impl<L: AssetLookup + ?Sized> AssetResolver<L> {
    pub fn new(lookup: Arc<L>) -> Self {
        Self { lookup }
    }

    /// Resolve a reference to a [`Resolution`].
    ///
    /// Variant discrimination follows the wire's fixed priority order, which
    /// the [`AssetReference`] sum type already encodes. Only the opaque-id
    /// branch suspends.
    pub async fn resolve(&self, reference: &AssetReference) -> Resolution {
        match reference {
            AssetReference::NationalCurrency {
                national_currency_code,
            } => membership(NATIONAL_CURRENCY_CODES, national_currency_code),
            AssetReference::Cryptocurrency {
                cryptocurrency_symbol,
            } => {
                if membership(LAYER_1_CRYPTOCURRENCIES, cryptocurrency_symbol).is_valid()
                    || membership(LAYER_2_CRYPTOCURRENCIES, cryptocurrency_symbol).is_valid()
                {
                    Resolution::Valid
                } else {
                    Resolution::Invalid
                }
            }
            AssetReference::Other { asset_id } => match self.lookup.asset_details(asset_id).await
            {
                Ok(asset) if asset.id == *asset_id => Resolution::Valid,
                Ok(asset) => {
                    tracing::warn!(requested = %asset_id, returned = %asset.id, "catalog returned mismatched asset id");
                    Resolution::Invalid
                }
                Err(err) => Resolution::LookupFailed(err.to_string()),
            },
        }
    }

    /// Boolean form of [`AssetResolver::resolve`]: `LookupFailed` collapses
    /// to `false`.
    pub async fn validate(&self, reference: &AssetReference) -> bool {
        self.resolve(reference).await.is_valid()
    }
}

fn membership(set: &[&str], code: &str) -> Resolution {
    if set.contains(&code) {
        Resolution::Valid
    } else {
        Resolution::Invalid
    }
}
