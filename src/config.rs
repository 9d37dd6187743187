//! Suite configuration.

use crate::pager::CollectionPager;

/// Which capability groups the backend advertises and the suite should
/// exercise. Read once at suite start.
#[derive(Debug, Clone, Copy)]
pub struct CapabilityFlags {
    pub liquidity: bool,
    pub transfers: bool,
}

impl Default for CapabilityFlags {
    fn default() -> Self {
        Self {
            liquidity: true,
            transfers: true,
        }
    }
}

/// Configuration for a [`ConformanceSuite`](crate::suite::ConformanceSuite)
/// run.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Account whose collections are exercised.
    pub account_id: String,
    /// Page size for collection drains.
    pub page_limit: usize,
    pub capabilities: CapabilityFlags,
}

impl ValidatorConfig {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            page_limit: CollectionPager::DEFAULT_LIMIT,
            capabilities: CapabilityFlags::default(),
        }
    }

    pub fn page_limit(mut self, limit: usize) -> Self {
        self.page_limit = limit;
        self
    }

    pub fn liquidity(mut self, enabled: bool) -> Self {
        self.capabilities.liquidity = enabled;
        self
    }

    pub fn transfers(mut self, enabled: bool) -> Self {
        self.capabilities.transfers = enabled;
        self
    }
}
