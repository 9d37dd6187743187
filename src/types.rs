//! Wire-shaped domain models for the transfer API.
//!
//! Field names follow the API's camelCase wire form via per-field
//! `#[serde(rename)]`. Request bodies derive [`Validate`] for field-level
//! constraints; business invariants (e.g. the dual-amount rule on quote
//! requests) are enforced by the services that consume them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::repository::RecordId;

/// Reference to a balance asset, under one of three mutually exclusive
/// identification schemes.
///
/// The wire shape is structural (discriminated by field presence, not an
/// explicit tag). `#[serde(untagged)]` tries variants in declaration order,
/// which encodes the required priority: national currency code, then
/// cryptocurrency symbol, then opaque asset id.
///
/// Codes and symbols are kept as plain strings so that a conformance check
/// against a live backend remains a real membership check — the enumerated
/// sets live next to the resolver in [`crate::asset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetReference {
    /// A fiat currency, identified by an ISO-4217-style code.
    NationalCurrency {
        #[serde(rename = "nationalCurrencyCode")]
        national_currency_code: String,
    },
    /// A public-chain cryptocurrency, identified by its ticker symbol.
    Cryptocurrency {
        #[serde(rename = "cryptocurrencySymbol")]
        cryptocurrency_symbol: String,
    },
    /// An implementation-defined asset, resolvable only through the
    /// backend's asset catalog.
    Other {
        #[serde(rename = "assetId")]
        asset_id: String,
    },
}

impl AssetReference {
    pub fn national_currency(code: impl Into<String>) -> Self {
        Self::NationalCurrency {
            national_currency_code: code.into(),
        }
    }

    pub fn cryptocurrency(symbol: impl Into<String>) -> Self {
        Self::Cryptocurrency {
            cryptocurrency_symbol: symbol.into(),
        }
    }

    pub fn other(asset_id: impl Into<String>) -> Self {
        Self::Other {
            asset_id: asset_id.into(),
        }
    }

    /// The opaque asset id, when this reference uses the catalog scheme.
    pub fn asset_id(&self) -> Option<&str> {
        match self {
            Self::Other { asset_id } => Some(asset_id),
            _ => None,
        }
    }
}

/// Enumerated category of a withdrawal/deposit destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferMethod {
    InternalTransfer,
    PeerAccountTransfer,
    Iban,
    Swift,
    PublicBlockchain,
}

impl TransferMethod {
    /// Fiat methods, for the categorized fiat view.
    pub const FIAT: [TransferMethod; 2] = [TransferMethod::Iban, TransferMethod::Swift];

    pub fn is_fiat(&self) -> bool {
        Self::FIAT.contains(self)
    }
}

/// Withdrawal lifecycle status. Creation always forces [`Pending`];
/// subsequent transitions belong to an external execution process.
///
/// [`Pending`]: WithdrawalStatus::Pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WithdrawalStatus {
    Pending,
    Processing,
    Succeeded,
    Failed,
}

/// Destination of a withdrawal. `transfer_method` is the sole filter key
/// for categorized views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(rename = "transferMethod")]
    pub transfer_method: TransferMethod,
    pub asset: AssetReference,
    /// Blockchain address, IBAN or account number, depending on the method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "accountHolder", skip_serializing_if = "Option::is_none")]
    pub account_holder: Option<String>,
}

/// A withdrawal record. Immutable after creation except for status
/// transitions performed externally. `created_at` is the sole sort key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub id: String,
    #[serde(rename = "balanceAsset")]
    pub balance_asset: AssetReference,
    #[serde(rename = "balanceAmount")]
    pub balance_amount: String,
    pub status: WithdrawalStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub destination: Destination,
}

impl RecordId for Withdrawal {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Request body for creating a withdrawal. The idempotency key is
/// request-only and stripped before persistence.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WithdrawalRequest {
    #[serde(rename = "idempotencyKey")]
    #[validate(length(min = 1, message = "idempotencyKey must not be empty"))]
    pub idempotency_key: String,
    #[serde(rename = "balanceAsset")]
    pub balance_asset: AssetReference,
    #[serde(rename = "balanceAmount")]
    #[validate(length(min = 1, message = "balanceAmount must not be empty"))]
    pub balance_amount: String,
    pub destination: Destination,
}

/// The transfer side of a withdrawal capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalTransferCapability {
    pub asset: AssetReference,
    #[serde(rename = "transferMethod")]
    pub transfer_method: TransferMethod,
}

/// Capability to withdraw a balance asset over a specific transfer method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalCapability {
    pub id: String,
    #[serde(rename = "balanceAsset")]
    pub balance_asset: AssetReference,
    pub withdrawal: WithdrawalTransferCapability,
}

impl RecordId for WithdrawalCapability {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Quote lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteStatus {
    Ready,
    Executing,
    Executed,
    Expired,
}

/// A conversion quote between two assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    #[serde(rename = "fromAsset")]
    pub from_asset: AssetReference,
    #[serde(rename = "toAsset")]
    pub to_asset: AssetReference,
    #[serde(rename = "fromAmount")]
    pub from_amount: String,
    #[serde(rename = "toAmount")]
    pub to_amount: String,
    pub status: QuoteStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl RecordId for Quote {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Request body for creating a quote. Exactly one of `from_amount` /
/// `to_amount` must be set; the backend rejects requests carrying both.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuoteRequest {
    #[serde(rename = "fromAsset")]
    pub from_asset: AssetReference,
    #[serde(rename = "toAsset")]
    pub to_asset: AssetReference,
    #[serde(rename = "fromAmount", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "fromAmount must not be empty"))]
    pub from_amount: Option<String>,
    #[serde(rename = "toAmount", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "toAmount must not be empty"))]
    pub to_amount: Option<String>,
}

/// An advertised quotable asset pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteCapability {
    pub id: String,
    #[serde(rename = "fromAsset")]
    pub from_asset: AssetReference,
    #[serde(rename = "toAsset")]
    pub to_asset: AssetReference,
}

impl RecordId for QuoteCapability {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Catalog record backing an opaque asset id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalAsset {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(rename = "decimalPlaces")]
    pub decimal_places: u32,
}

impl RecordId for AdditionalAsset {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Sort order for `created_at`-ordered listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}
