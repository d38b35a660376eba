// Terminal UI implementation using ratatui
// The presentation side of the wishlist client

pub mod app;
pub mod form;
pub mod form_ui;
pub mod list_ui;
pub mod runner;
pub mod search_ui;
pub mod ui;

pub use app::{App, InputMode};
pub use form::{DraftForm, FormField};
pub use runner::run_tui;
