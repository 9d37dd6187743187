//! # Transfer API Validator
//!
//! Conformance validation harness for a multi-capability financial transfer
//! API (deposits, withdrawals, quotes/liquidity). The suite exercises a
//! backend through the [`Client`] trait, asserts responses satisfy schema
//! and business invariants, and reports violations per offending item. The
//! [`mock`] module is an in-memory backend that fabricates schema-valid
//! records, so the harness itself can be exercised without a real server.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use transfer_api_validator::{ConformanceSuite, MockClient, SeedCounts, ValidatorConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(MockClient::seeded(SeedCounts::default())?);
//!     let config = ValidatorConfig::new("account-1").page_limit(10);
//!
//!     let report = ConformanceSuite::new(client, config).run().await;
//!     println!("{}", report.report());
//!     assert!(report.all_passed());
//!     Ok(())
//! }
//! ```

pub mod asset;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod fake;
pub mod mock;
pub mod pager;
pub mod repository;
pub mod suite;
pub mod types;

pub use asset::{AssetResolver, Resolution};
pub use catalog::{AssetCatalog, AssetLookup, AssetsService};
pub use client::{Client, MockClient, SeedCounts};
pub use config::{CapabilityFlags, ValidatorConfig};
pub use error::{Error, Result};
pub use fake::{FakeRecordGenerator, RandomRecords};
pub use mock::{LiquidityService, WithdrawalsService};
pub use pager::CollectionPager;
pub use repository::{RecordId, Repository};
pub use suite::{CheckResult, ConformanceSuite, SuiteReport, Violation};
pub use types::{
    AdditionalAsset, AssetReference, Destination, Order, Quote, QuoteCapability, QuoteRequest,
    QuoteStatus, TransferMethod, Withdrawal, WithdrawalCapability, WithdrawalRequest,
    WithdrawalStatus, WithdrawalTransferCapability,
};
