//! Asset catalog collaborator contracts and the in-memory mock catalog.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::fake::FakeRecordGenerator;
use crate::repository::Repository;
use crate::types::AdditionalAsset;

/// Source of the additional-asset id set used by the mock services when
/// rewriting opaque asset references.
pub trait AssetCatalog: Send + Sync {
    fn additional_asset_ids(&self) -> Vec<String>;
}

/// Lookup-by-id seam used by the asset resolver for opaque asset ids.
///
/// In live-conformance mode this is the transport client; in mock mode it is
/// [`AssetsService`].
#[async_trait]
pub trait AssetLookup: Send + Sync {
    async fn asset_details(&self, id: &str) -> Result<AdditionalAsset>;
}

/// In-memory asset catalog backing the mock services.
pub struct AssetsService {
    assets: Repository<AdditionalAsset>,
}

impl AssetsService {
    /// Seed the catalog with `count` fake additional assets.
    pub fn seed(count: usize, generator: &mut dyn FakeRecordGenerator) -> Result<Self> {
        let assets = Repository::new();
        for _ in 0..count {
            assets.create(generator.additional_asset())?;
        }
        tracing::debug!(count, "seeded asset catalog");
        Ok(Self { assets })
    }

    pub fn all(&self) -> Vec<AdditionalAsset> {
        self.assets.list()
    }
}

impl AssetCatalog for AssetsService {
    fn additional_asset_ids(&self) -> Vec<String> {
        self.assets.ids()
    }
}

#[async_trait]
impl AssetLookup for AssetsService {
    async fn asset_details(&self, id: &str) -> Result<AdditionalAsset> {
        self.assets
            .find(id)
            .ok_or_else(|| Error::not_found(format!("Asset {id} not found")))
    }
}
