use wishlist_api::WishlistItem;

/// Which mutation an outcome belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Add,
    Delete,
    Update,
}

impl std::fmt::Display for MutationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MutationKind::Add => write!(f, "add"),
            MutationKind::Delete => write!(f, "delete"),
            MutationKind::Update => write!(f, "update"),
        }
    }
}

/// Last failure, as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewError {
    /// Reading the collection failed
    Fetch,
    /// The mutation itself failed; nothing changed server-side
    Mutation(MutationKind),
    /// The mutation went through but the follow-up refetch failed
    Resync(MutationKind),
}

impl ViewError {
    pub fn message(&self) -> &'static str {
        match self {
            ViewError::Fetch => "Failed to fetch wishlist items",
            ViewError::Mutation(MutationKind::Add) => "Failed to add item",
            ViewError::Mutation(MutationKind::Delete) => "Failed to delete item",
            ViewError::Mutation(MutationKind::Update) => "Failed to update item",
            ViewError::Resync(MutationKind::Add) => {
                "Item added, but failed to refresh the wishlist"
            }
            ViewError::Resync(MutationKind::Delete) => {
                "Item deleted, but failed to refresh the wishlist"
            }
            ViewError::Resync(MutationKind::Update) => {
                "Item updated, but failed to refresh the wishlist"
            }
        }
    }
}

impl std::fmt::Display for ViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Loading,
    Error,
}

/// The client's snapshot of the remote collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Store order, replaced wholesale on every applied fetch
    pub items: Vec<WishlistItem>,
    pub loading: bool,
    pub error: Option<ViewError>,
}

impl ViewState {
    pub fn status(&self) -> Status {
        if self.loading {
            Status::Loading
        } else if self.error.is_some() {
            Status::Error
        } else {
            Status::Idle
        }
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(|e| e.message())
    }
}
