use thiserror::Error;
use wishlist_api::{ItemId, WishlistError};

/// Everything that can go wrong below the presentation layer
#[derive(Error, Debug)]
pub enum Error {
    #[error("API request failed: {0}")]
    ApiError(#[from] WishlistError),

    #[error("Item not found: {0}")]
    NotFound(ItemId),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Store call did not finish: {0}")]
    Interrupted(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
