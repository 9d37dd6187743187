//! Mock liquidity backend: quote capabilities, cursor-paginated quote
//! listing, and the create/execute lifecycle the conformance suite asserts.

use chrono::Utc;
use rand::Rng;
use uuid::Uuid;
use validator::Validate;

use super::{page_slice, rewrite_opaque_id};
use crate::asset::{LAYER_1_CRYPTOCURRENCIES, LAYER_2_CRYPTOCURRENCIES, NATIONAL_CURRENCY_CODES};
use crate::catalog::AssetCatalog;
use crate::error::{Error, Result};
use crate::fake::FakeRecordGenerator;
use crate::repository::Repository;
use crate::types::{AssetReference, Quote, QuoteCapability, QuoteRequest, QuoteStatus};

/// In-memory mock of the liquidity resource group.
pub struct LiquidityService {
    quotes: Repository<Quote>,
    capabilities: Repository<QuoteCapability>,
    known_asset_ids: Vec<String>,
}

impl LiquidityService {
    /// Fabricate `capabilities_count` quote capabilities and `quotes_count`
    /// quotes, rewriting opaque asset ids to the catalog's set so the
    /// resolver accepts everything the mock advertises.
    pub fn seed(
        capabilities_count: usize,
        quotes_count: usize,
        catalog: &dyn AssetCatalog,
        generator: &mut dyn FakeRecordGenerator,
    ) -> Result<Self> {
        let service = Self {
            quotes: Repository::new(),
            capabilities: Repository::new(),
            known_asset_ids: catalog.additional_asset_ids(),
        };

        for _ in 0..capabilities_count {
            service.capabilities.create(generator.quote_capability())?;
        }
        for _ in 0..quotes_count {
            service.quotes.create(generator.quote())?;
        }

        for id in service.capabilities.ids() {
            service.capabilities.modify(&id, |capability| {
                rewrite_opaque_id(&mut capability.from_asset, &service.known_asset_ids);
                rewrite_opaque_id(&mut capability.to_asset, &service.known_asset_ids);
            })?;
        }
        for id in service.quotes.ids() {
            service.quotes.modify(&id, |quote| {
                rewrite_opaque_id(&mut quote.from_asset, &service.known_asset_ids);
                rewrite_opaque_id(&mut quote.to_asset, &service.known_asset_ids);
            })?;
        }

        tracing::debug!(
            capabilities = capabilities_count,
            quotes = quotes_count,
            "seeded liquidity mock"
        );
        Ok(service)
    }

    /// All advertised quotable asset pairs.
    pub fn capabilities(&self) -> Vec<QuoteCapability> {
        self.capabilities.list()
    }

    /// One cursor page of quotes, ordered by creation time ascending. Ties
    /// break on id so successive pages see one stable order.
    pub fn quotes(&self, limit: usize, starting_after: Option<&str>) -> Vec<Quote> {
        let mut quotes = self.quotes.list();
        quotes.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        page_slice(&quotes, limit, starting_after)
    }

    pub fn quote(&self, id: &str) -> Result<Quote> {
        self.quotes
            .find(id)
            .ok_or_else(|| Error::not_found("Quote not found"))
    }

    /// Create a quote. Rejects requests carrying both amount-direction
    /// fields, requests carrying neither, and asset pairs the backend cannot
    /// resolve.
    pub fn create_quote(&self, request: QuoteRequest) -> Result<Quote> {
        request
            .validate()
            .map_err(|e| Error::validation(e.to_string()))?;

        let (from_amount, to_amount) = match (&request.from_amount, &request.to_amount) {
            (Some(_), Some(_)) => {
                return Err(Error::validation(
                    "fromAmount and toAmount cannot both be set",
                ))
            }
            (None, None) => {
                return Err(Error::validation(
                    "either fromAmount or toAmount must be set",
                ))
            }
            // Mock conversion is 1:1; a real backend prices the other side.
            (Some(amount), None) | (None, Some(amount)) => (amount.clone(), amount.clone()),
        };

        self.require_known_asset(&request.from_asset, "fromAsset")?;
        self.require_known_asset(&request.to_asset, "toAsset")?;

        let quote = Quote {
            id: Uuid::new_v4().to_string(),
            from_asset: request.from_asset,
            to_asset: request.to_asset,
            from_amount,
            to_amount,
            status: QuoteStatus::Ready,
            created_at: Utc::now(),
        };
        let created = self.quotes.create(quote)?;
        tracing::info!(id = %created.id, "created quote");
        Ok(created)
    }

    /// Execute a ready quote, moving it to `Executing` or `Executed`.
    pub fn execute_quote(&self, id: &str) -> Result<Quote> {
        let quote = self.quote(id)?;
        if quote.status != QuoteStatus::Ready {
            return Err(Error::validation(format!(
                "Quote {id} is not ready for execution"
            )));
        }

        // Single-writer store: no transition can slip in between the read
        // above and this write.
        let status = if rand::thread_rng().gen_bool(0.5) {
            QuoteStatus::Executing
        } else {
            QuoteStatus::Executed
        };
        self.quotes.modify(id, |quote| quote.status = status)?;
        tracing::info!(id, ?status, "executed quote");
        self.quote(id)
    }

    fn require_known_asset(&self, reference: &AssetReference, field: &str) -> Result<()> {
        let known = match reference {
            AssetReference::NationalCurrency {
                national_currency_code,
            } => NATIONAL_CURRENCY_CODES.contains(&national_currency_code.as_str()),
            AssetReference::Cryptocurrency {
                cryptocurrency_symbol,
            } => {
                LAYER_1_CRYPTOCURRENCIES.contains(&cryptocurrency_symbol.as_str())
                    || LAYER_2_CRYPTOCURRENCIES.contains(&cryptocurrency_symbol.as_str())
            }
            AssetReference::Other { asset_id } => {
                self.known_asset_ids.iter().any(|known| known == asset_id)
            }
        };

        if known {
            Ok(())
        } else {
            Err(Error::validation(format!(
                "Unresolvable asset in {field}: {}",
                serde_json::to_string(reference).unwrap_or_default()
            )))
        }
    }
}
