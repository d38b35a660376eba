// Client-side state and sync logic for the wishlist
pub mod config;
pub mod controller;
pub mod error;
pub mod state;
pub mod store;

pub use config::Config;
pub use controller::{Completion, Controller, FetchOrigin, FetchTicket};
pub use error::Error;
pub use state::{MutationKind, Status, ViewError, ViewState};
pub use store::WishlistStore;

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
