use async_trait::async_trait;
use wishlist_api::{
    ItemDraft, ItemId, ItemPatch, ListRequest, WishlistClient, WishlistError, WishlistItem,
};

use crate::{Error, Result};

/// The remote collection as seen by the controller
///
/// Kept as a trait so the controller can be driven by the HTTP client in
/// production and by mocks or an in-memory store in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WishlistStore: Send + Sync {
    async fn list(&self, request: &ListRequest) -> Result<Vec<WishlistItem>>;
    async fn create(&self, draft: &ItemDraft) -> Result<()>;
    async fn delete(&self, id: ItemId) -> Result<()>;
    async fn update(&self, id: ItemId, patch: &ItemPatch) -> Result<()>;
}

fn convert(err: WishlistError) -> Error {
    match err {
        WishlistError::NotFound(id) => Error::NotFound(id),
        other => Error::ApiError(other),
    }
}

#[async_trait]
impl WishlistStore for WishlistClient {
    async fn list(&self, request: &ListRequest) -> Result<Vec<WishlistItem>> {
        WishlistClient::list(self, request).await.map_err(convert)
    }

    async fn create(&self, draft: &ItemDraft) -> Result<()> {
        WishlistClient::create(self, draft).await.map_err(convert)
    }

    async fn delete(&self, id: ItemId) -> Result<()> {
        WishlistClient::delete(self, id).await.map_err(convert)
    }

    async fn update(&self, id: ItemId, patch: &ItemPatch) -> Result<()> {
        WishlistClient::update(self, id, patch).await.map_err(convert)
    }
}
