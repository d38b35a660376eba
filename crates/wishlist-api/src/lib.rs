// HTTP client and request building for the wishlist API
pub mod client;
pub mod models;
pub mod query;

// Re-export common types
pub use client::{Result, WishlistClient, WishlistError, DEFAULT_API_BASE};
pub use models::{ItemDraft, ItemId, ItemPatch, WishlistItem};
pub use query::{build_request, DownloadedFilter, FilterState, ListRequest};
