//! Conformance suite: drives the transport client through scenario-level
//! checks and collects per-item violations into a reportable result set.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::asset::{AssetResolver, Resolution};
use crate::client::Client;
use crate::config::ValidatorConfig;
use crate::error::Result;
use crate::pager::CollectionPager;
use crate::types::{AssetReference, QuoteRequest, QuoteStatus};

/// One observed conformance violation, with enough payload context to
/// reproduce.
#[derive(Debug, Clone)]
pub struct Violation {
    pub message: String,
}

impl Violation {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outcome of a single scenario-level check.
///
/// A check keeps validating remaining items after a violation; only
/// transport and internal-consistency failures abort it early.
#[derive(Debug)]
pub struct CheckResult {
    pub check: &'static str,
    /// The capability group was disabled or the backend advertised nothing
    /// to exercise. Skipped checks are excluded from pass/fail counts.
    pub skipped: bool,
    pub violations: Vec<Violation>,
    /// Failure that terminated the check before it could finish.
    pub aborted: Option<String>,
}

impl CheckResult {
    fn passed(check: &'static str) -> Self {
        Self {
            check,
            skipped: false,
            violations: Vec::new(),
            aborted: None,
        }
    }

    fn skipped(check: &'static str) -> Self {
        Self {
            skipped: true,
            ..Self::passed(check)
        }
    }

    pub fn is_pass(&self) -> bool {
        !self.skipped && self.violations.is_empty() && self.aborted.is_none()
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = if self.skipped {
            "SKIP"
        } else if self.is_pass() {
            "PASS"
        } else {
            "FAIL"
        };
        write!(f, "[{}] {}", icon, self.check)?;
        for violation in &self.violations {
            write!(f, "\n      {}", violation.message)?;
        }
        if let Some(reason) = &self.aborted {
            write!(f, "\n      ABORTED {}", reason)?;
        }
        Ok(())
    }
}

/// All check results from one suite run.
#[derive(Debug, Default)]
pub struct SuiteReport {
    pub results: Vec<CheckResult>,
}

impl SuiteReport {
    pub fn all_passed(&self) -> bool {
        self.results.iter().filter(|r| !r.skipped).all(|r| r.is_pass())
    }

    /// Human-readable conformance report, one line per check plus one line
    /// per violation.
    pub fn report(&self) -> String {
        let total = self.results.len();
        let skipped = self.results.iter().filter(|r| r.skipped).count();
        let passed = self.results.iter().filter(|r| r.is_pass()).count();
        let failed = total - passed - skipped;

        let mut lines = Vec::new();
        lines.push("=== API Conformance Report ===".to_string());
        lines.push(String::new());
        lines.push(format!("Checks run: {}", total));
        lines.push(format!("Passed: {}", passed));
        lines.push(format!("Failed: {}", failed));
        lines.push(format!("Skipped: {}", skipped));
        lines.push(String::new());
        for result in &self.results {
            lines.push(format!("{}", result));
        }
        lines.push(String::new());
        lines.push("==============================".to_string());
        lines.join("\n")
    }
}

/// Orchestrates the asset resolver and collection pager against a backend
/// and reports violations. Each check is independently retryable by
/// re-running the suite.
pub struct ConformanceSuite<C: Client> {
    client: Arc<C>,
    config: ValidatorConfig,
    resolver: AssetResolver<C>,
    pager: CollectionPager,
}

impl<C: Client> ConformanceSuite<C> {
    pub fn new(client: Arc<C>, config: ValidatorConfig) -> Self {
        let resolver = AssetResolver::new(client.clone());
        let pager = CollectionPager::new(config.page_limit);
        Self {
            client,
            config,
            resolver,
            pager,
        }
    }

    /// Run every check enabled by the configured capability flags.
    pub async fn run(&self) -> SuiteReport {
        let mut report = SuiteReport::default();

        if self.config.capabilities.liquidity {
            report.results.push(self.checked("quote-capability-assets", self.check_quote_capability_assets()).await);
            report.results.push(self.checked("quotes-collection-cross-check", self.check_quotes_collection()).await);
            report.results.push(self.checked("quote-create-execute-lifecycle", self.check_quote_lifecycle()).await);
        } else {
            report.results.push(CheckResult::skipped("quote-capability-assets"));
            report.results.push(CheckResult::skipped("quotes-collection-cross-check"));
            report.results.push(CheckResult::skipped("quote-create-execute-lifecycle"));
        }

        if self.config.capabilities.transfers {
            report.results.push(self.checked("withdrawal-capability-assets", self.check_withdrawal_capability_assets()).await);
            report.results.push(self.checked("withdrawals-collection-cross-check", self.check_withdrawals_collection()).await);
        } else {
            report.results.push(CheckResult::skipped("withdrawal-capability-assets"));
            report.results.push(CheckResult::skipped("withdrawals-collection-cross-check"));
        }

        for result in &report.results {
            if result.is_pass() || result.skipped {
                tracing::info!(check = result.check, skipped = result.skipped, "check done");
            } else {
                tracing::warn!(check = result.check, violations = result.violations.len(), "check failed");
            }
        }
        report
    }

    /// Convert a check's terminating failure into an aborted result instead
    /// of tearing down the whole run.
    async fn checked(
        &self,
        check: &'static str,
        fut: impl std::future::Future<Output = Result<CheckResult>>,
    ) -> CheckResult {
        match fut.await {
            Ok(result) => result,
            Err(err) => CheckResult {
                check,
                skipped: false,
                violations: Vec::new(),
                aborted: Some(err.to_string()),
            },
        }
    }

    /// Every advertised quote capability must carry valid asset references
    /// on both endpoints.
    async fn check_quote_capability_assets(&self) -> Result<CheckResult> {
        let mut result = CheckResult::passed("quote-capability-assets");
        let capabilities = self.client.get_quote_capabilities().await?;
        if capabilities.is_empty() {
            return Ok(CheckResult::skipped(result.check));
        }

        for capability in &capabilities {
            self.expect_valid_asset(&mut result, &capability.from_asset, "fromAsset", &capability.id)
                .await;
            self.expect_valid_asset(&mut result, &capability.to_asset, "toAsset", &capability.id)
                .await;
        }
        Ok(result)
    }

    /// Same as the quote check, for withdrawal capabilities: balance asset
    /// and the withdrawal-side asset.
    async fn check_withdrawal_capability_assets(&self) -> Result<CheckResult> {
        let mut result = CheckResult::passed("withdrawal-capability-assets");
        let capabilities = self
            .client
            .get_withdrawal_capabilities(&self.config.account_id)
            .await?;
        if capabilities.is_empty() {
            return Ok(CheckResult::skipped(result.check));
        }

        for capability in &capabilities {
            self.expect_valid_asset(&mut result, &capability.balance_asset, "balanceAsset", &capability.id)
                .await;
            self.expect_valid_asset(&mut result, &capability.withdrawal.asset, "withdrawal.asset", &capability.id)
                .await;
        }
        Ok(result)
    }

    /// Drain the quote collection and re-fetch every item by id.
    async fn check_quotes_collection(&self) -> Result<CheckResult> {
        let mut result = CheckResult::passed("quotes-collection-cross-check");
        let account_id = &self.config.account_id;
        let quotes = self
            .pager
            .drain(|limit, starting_after| async move {
                self.client
                    .get_quotes(account_id, limit, starting_after.as_deref())
                    .await
            })
            .await?;

        for quote in &quotes {
            match self.client.get_quote_details(account_id, &quote.id).await {
                Ok(details) if details.id == quote.id => {}
                Ok(details) => result.violations.push(Violation::new(format!(
                    "getQuoteDetails for quote {} returned id {}",
                    quote.id, details.id
                ))),
                Err(err) => result.violations.push(Violation::new(format!(
                    "Did not find quote {} on server: {}",
                    quote.id, err
                ))),
            }
        }
        Ok(result)
    }

    /// Drain the withdrawal collection and re-fetch every item by id.
    async fn check_withdrawals_collection(&self) -> Result<CheckResult> {
        let mut result = CheckResult::passed("withdrawals-collection-cross-check");
        let account_id = &self.config.account_id;
        let withdrawals = self
            .pager
            .drain(|limit, starting_after| async move {
                self.client
                    .get_withdrawals(account_id, limit, starting_after.as_deref())
                    .await
            })
            .await?;

        for withdrawal in &withdrawals {
            match self
                .client
                .get_withdrawal_details(account_id, &withdrawal.id)
                .await
            {
                Ok(details) if details.id == withdrawal.id => {}
                Ok(details) => result.violations.push(Violation::new(format!(
                    "getWithdrawalDetails for withdrawal {} returned id {}",
                    withdrawal.id, details.id
                ))),
                Err(err) => result.violations.push(Violation::new(format!(
                    "Did not find withdrawal {} on server: {}",
                    withdrawal.id, err
                ))),
            }
        }
        Ok(result)
    }

    /// Create/execute lifecycle: dual-amount and unresolvable-pair requests
    /// must be rejected; a valid create must be retrievable; execution must
    /// land in an executing-or-executed state.
    async fn check_quote_lifecycle(&self) -> Result<CheckResult> {
        let mut result = CheckResult::passed("quote-create-execute-lifecycle");
        let account_id = &self.config.account_id;

        let capabilities = self.client.get_quote_capabilities().await?;
        let Some(template) = capabilities.first() else {
            return Ok(CheckResult::skipped(result.check));
        };

        // Both amount-direction fields set: must be rejected.
        let dual = QuoteRequest {
            from_asset: template.from_asset.clone(),
            to_asset: template.to_asset.clone(),
            from_amount: Some("1".to_string()),
            to_amount: Some("1".to_string()),
        };
        if let Ok(quote) = self.client.create_quote(account_id, dual).await {
            result.violations.push(Violation::new(format!(
                "createQuote accepted fromAmount and toAmount together (created quote {})",
                quote.id
            )));
        }

        // Unresolvable asset pair: must be rejected.
        let bogus = QuoteRequest {
            from_asset: AssetReference::other(Uuid::new_v4().to_string()),
            to_asset: AssetReference::other(Uuid::new_v4().to_string()),
            from_amount: None,
            to_amount: Some("1".to_string()),
        };
        if let Ok(quote) = self.client.create_quote(account_id, bogus).await {
            result.violations.push(Violation::new(format!(
                "createQuote accepted an unresolvable asset pair (created quote {})",
                quote.id
            )));
        }

        // Valid create with fromAmount: must succeed and be retrievable.
        let valid = QuoteRequest {
            from_asset: template.from_asset.clone(),
            to_asset: template.to_asset.clone(),
            from_amount: Some("1".to_string()),
            to_amount: None,
        };
        match self.client.create_quote(account_id, valid).await {
            Ok(created) => {
                match self.client.get_quote_details(account_id, &created.id).await {
                    Ok(details) if details.id == created.id => {}
                    Ok(details) => result.violations.push(Violation::new(format!(
                        "created quote {} but getQuoteDetails returned id {}",
                        created.id, details.id
                    ))),
                    Err(err) => result.violations.push(Violation::new(format!(
                        "created quote {} is not retrievable: {}",
                        created.id, err
                    ))),
                }

                match self.client.execute_quote(account_id, &created.id).await {
                    Ok(executed)
                        if matches!(
                            executed.status,
                            QuoteStatus::Executing | QuoteStatus::Executed
                        ) => {}
                    Ok(executed) => result.violations.push(Violation::new(format!(
                        "executed quote {} has status {:?}, expected Executing or Executed",
                        executed.id, executed.status
                    ))),
                    Err(err) => result.violations.push(Violation::new(format!(
                        "executeQuote failed for quote {}: {}",
                        created.id, err
                    ))),
                }
            }
            Err(err) => result.violations.push(Violation::new(format!(
                "createQuote with only fromAmount was rejected: {}",
                err
            ))),
        }

        Ok(result)
    }

    async fn expect_valid_asset(
        &self,
        result: &mut CheckResult,
        reference: &AssetReference,
        field: &str,
        capability_id: &str,
    ) {
        match self.resolver.resolve(reference).await {
            Resolution::Valid => {}
            Resolution::Invalid => result.violations.push(Violation::new(format!(
                "Invalid {field} in capability {capability_id}: {}",
                payload(reference)
            ))),
            Resolution::LookupFailed(reason) => result.violations.push(Violation::new(format!(
                "Could not resolve {field} in capability {capability_id}: {} ({reason})",
                payload(reference)
            ))),
        }
    }
}

fn payload(reference: &AssetReference) -> String {
    serde_json::to_string(reference).unwrap_or_else(|_| format!("{reference:?}"))
}
