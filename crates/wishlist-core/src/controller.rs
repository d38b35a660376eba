// View-state controller: owns the canonical item list and keeps it in sync
// with the remote store
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use wishlist_api::{
    DownloadedFilter, FilterState, ItemDraft, ItemId, ItemPatch, ListRequest, WishlistItem,
};

use crate::state::{MutationKind, ViewError, ViewState};
use crate::store::WishlistStore;
use crate::{Error, Result};

/// Why a fetch was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    /// Mount, explicit refresh or a filter change
    Filter,
    /// Resync after a successful mutation
    AfterMutation(MutationKind),
}

/// An issued fetch. Only the ticket carrying the latest sequence number is
/// allowed to touch the view state when it completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub origin: FetchOrigin,
    pub request: ListRequest,
}

/// A finished store call, reported back to the controller
#[derive(Debug)]
pub enum Completion {
    Fetched {
        ticket: FetchTicket,
        result: Result<Vec<WishlistItem>>,
    },
    Mutated {
        kind: MutationKind,
        result: Result<()>,
    },
}

fn interrupted() -> Error {
    Error::Interrupted("store task panicked or was cancelled".to_string())
}

/// Held by a spawned store call. If the task unwinds before reporting, the
/// drop sends a failed completion so the outstanding count still goes down.
struct CompletionReporter {
    tx: mpsc::UnboundedSender<Completion>,
    fallback: Option<Completion>,
}

impl CompletionReporter {
    fn new(tx: mpsc::UnboundedSender<Completion>, fallback: Completion) -> Self {
        Self {
            tx,
            fallback: Some(fallback),
        }
    }

    fn send(mut self, completion: Completion) {
        self.fallback = None;
        let _ = self.tx.send(completion);
    }
}

impl Drop for CompletionReporter {
    fn drop(&mut self) {
        if let Some(completion) = self.fallback.take() {
            warn!("Store call ended without a result");
            let _ = self.tx.send(completion);
        }
    }
}

/// Single owner of the view state and filter state
///
/// Store calls run as spawned tasks and report back over a channel; the owner
/// feeds those completions into [`Controller::apply`] from its event loop.
/// Every mutation is "mutate, then resynchronize": on success the list is
/// refetched with the current filters instead of patched locally.
pub struct Controller {
    store: Arc<dyn WishlistStore>,
    state: ViewState,
    filters: FilterState,
    last_issued: u64,
    outstanding: usize,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl Controller {
    pub fn new(store: Arc<dyn WishlistStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            store,
            state: ViewState::default(),
            filters: FilterState::default(),
            last_issued: 0,
            outstanding: 0,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Number of store calls issued but not yet applied
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    // --- filter setters -------------------------------------------------

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if self.filters.search_term != term {
            self.filters.search_term = term;
            self.refresh();
        }
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        let category = category.into();
        if self.filters.category != category {
            self.filters.category = category;
            self.refresh();
        }
    }

    pub fn set_downloaded_filter(&mut self, downloaded: DownloadedFilter) {
        if self.filters.downloaded != downloaded {
            self.filters.downloaded = downloaded;
            self.refresh();
        }
    }

    /// Replace all three dimensions at once, fetching only if anything changed
    pub fn set_filters(&mut self, filters: FilterState) {
        if self.filters != filters {
            self.filters = filters;
            self.refresh();
        }
    }

    /// Put every filter dimension back to "no constraint"
    pub fn reset_filters(&mut self) {
        if !self.filters.is_unconstrained() {
            self.filters = FilterState::default();
            self.refresh();
        }
    }

    // --- operations -----------------------------------------------------

    /// Fetch the collection with the current filters
    pub fn refresh(&mut self) {
        let ticket = self.begin_fetch(FetchOrigin::Filter);
        self.spawn_fetch(ticket);
    }

    pub fn add(&mut self, draft: ItemDraft) {
        self.begin_mutation(MutationKind::Add);
        let store = Arc::clone(&self.store);
        let reporter = self.mutation_reporter(MutationKind::Add);
        tokio::spawn(async move {
            let result = store.create(&draft).await;
            reporter.send(Completion::Mutated {
                kind: MutationKind::Add,
                result,
            });
        });
    }

    pub fn delete(&mut self, id: ItemId) {
        self.begin_mutation(MutationKind::Delete);
        let store = Arc::clone(&self.store);
        let reporter = self.mutation_reporter(MutationKind::Delete);
        tokio::spawn(async move {
            let result = store.delete(id).await;
            reporter.send(Completion::Mutated {
                kind: MutationKind::Delete,
                result,
            });
        });
    }

    /// Flip `downloaded`, sending only that field
    pub fn toggle_downloaded(&mut self, item: &WishlistItem) {
        self.begin_mutation(MutationKind::Update);
        let store = Arc::clone(&self.store);
        let reporter = self.mutation_reporter(MutationKind::Update);
        let id = item.id;
        let patch = ItemPatch::downloaded(!item.downloaded);
        tokio::spawn(async move {
            let result = store.update(id, &patch).await;
            reporter.send(Completion::Mutated {
                kind: MutationKind::Update,
                result,
            });
        });
    }

    // --- completion handling --------------------------------------------

    /// Fold a finished store call into the view state
    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Fetched { ticket, result } => self.finish_fetch(ticket, result),
            Completion::Mutated { kind, result } => {
                if let Some(ticket) = self.finish_mutation(kind, result) {
                    self.spawn_fetch(ticket);
                }
            }
        }
    }

    /// Wait for the next completion. `None` when nothing is outstanding.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        if self.outstanding == 0 {
            return None;
        }
        self.rx.recv().await
    }

    /// Apply whatever has already landed without waiting.
    /// Returns true if the state changed.
    pub fn try_apply_pending(&mut self) -> bool {
        let mut applied = false;
        while let Ok(completion) = self.rx.try_recv() {
            self.apply(completion);
            applied = true;
        }
        applied
    }

    /// Drive completions until no store call is outstanding
    pub async fn settle(&mut self) {
        while let Some(completion) = self.next_completion().await {
            self.apply(completion);
        }
    }

    // --- state machine --------------------------------------------------

    /// Issue a fetch: bump the sequence number and enter loading
    pub fn begin_fetch(&mut self, origin: FetchOrigin) -> FetchTicket {
        self.last_issued += 1;
        self.outstanding += 1;
        self.state.loading = true;

        let ticket = FetchTicket {
            seq: self.last_issued,
            origin,
            request: self.filters.to_request(),
        };
        debug!("Issuing fetch #{} ({:?}): {:?}", ticket.seq, origin, ticket.request);
        ticket
    }

    /// Apply a fetch result if it belongs to the latest issued fetch
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<WishlistItem>>) {
        self.complete_one();

        if ticket.seq != self.last_issued {
            debug!(
                "Discarding stale fetch #{} (latest is #{})",
                ticket.seq, self.last_issued
            );
            return;
        }

        match result {
            Ok(items) => {
                info!("Loaded {} wishlist items", items.len());
                self.state.items = items;
                self.state.error = None;
            }
            Err(err) => {
                let view_error = match ticket.origin {
                    FetchOrigin::Filter => ViewError::Fetch,
                    FetchOrigin::AfterMutation(kind) => ViewError::Resync(kind),
                };
                warn!("{}: {}", view_error, err);
                self.state.error = Some(view_error);
            }
        }
    }

    pub fn begin_mutation(&mut self, kind: MutationKind) {
        debug!("Issuing {}", kind);
        self.outstanding += 1;
        self.state.loading = true;
    }

    /// Record a mutation outcome. On success returns the resync fetch that
    /// the caller must run; on failure the collection stays as it was.
    pub fn finish_mutation(
        &mut self,
        kind: MutationKind,
        result: Result<()>,
    ) -> Option<FetchTicket> {
        match result {
            Ok(()) => {
                debug!("{} succeeded, resynchronizing", kind);
                // Issue the resync before releasing the mutation so loading
                // never drops in between.
                let ticket = self.begin_fetch(FetchOrigin::AfterMutation(kind));
                self.complete_one();
                Some(ticket)
            }
            Err(err) => {
                let view_error = ViewError::Mutation(kind);
                warn!("{}: {}", view_error, err);
                self.state.error = Some(view_error);
                self.complete_one();
                None
            }
        }
    }

    fn complete_one(&mut self) {
        self.outstanding = self.outstanding.saturating_sub(1);
        self.state.loading = self.outstanding > 0;
    }

    fn spawn_fetch(&self, ticket: FetchTicket) {
        let store = Arc::clone(&self.store);
        let reporter = CompletionReporter::new(
            self.tx.clone(),
            Completion::Fetched {
                ticket: ticket.clone(),
                result: Err(interrupted()),
            },
        );
        tokio::spawn(async move {
            let result = store.list(&ticket.request).await;
            reporter.send(Completion::Fetched { ticket, result });
        });
    }

    fn mutation_reporter(&self, kind: MutationKind) -> CompletionReporter {
        CompletionReporter::new(
            self.tx.clone(),
            Completion::Mutated {
                kind,
                result: Err(interrupted()),
            },
        )
    }
}
