// End-to-end controller flows against an in-memory store that behaves like
// the wishlist backend
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use wishlist_api::{DownloadedFilter, ItemDraft, ItemId, ItemPatch, ListRequest, WishlistItem};
use wishlist_core::{Controller, Error, MutationKind, Result, ViewError, WishlistStore};

#[derive(Default)]
struct MemoryStore {
    items: Mutex<Vec<WishlistItem>>,
    next_id: Mutex<u64>,
}

impl MemoryStore {
    fn snapshot(&self) -> Vec<WishlistItem> {
        self.items.lock().unwrap().clone()
    }
}

fn matches(item: &WishlistItem, request: &ListRequest) -> bool {
    if let Some(query) = request.param("query") {
        if !item.name.contains(query) {
            return false;
        }
    }
    if let Some(category) = request.param("category") {
        if item.category.as_deref() != Some(category) {
            return false;
        }
    }
    if let Some(downloaded) = request.param("downloaded") {
        if item.downloaded.to_string() != downloaded {
            return false;
        }
    }
    true
}

#[async_trait]
impl WishlistStore for MemoryStore {
    async fn list(&self, request: &ListRequest) -> Result<Vec<WishlistItem>> {
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .filter(|item| matches(item, request))
            .cloned()
            .collect())
    }

    async fn create(&self, draft: &ItemDraft) -> Result<()> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        self.items.lock().unwrap().push(WishlistItem {
            id: ItemId(*next_id),
            name: draft.name.clone(),
            description: draft.description.clone(),
            url: draft.url.clone(),
            category: draft.category.clone(),
            downloaded: draft.downloaded,
        });
        Ok(())
    }

    async fn delete(&self, id: ItemId) -> Result<()> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }

    async fn update(&self, id: ItemId, patch: &ItemPatch) -> Result<()> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(Error::NotFound(id))?;
        if let Some(downloaded) = patch.downloaded {
            item.downloaded = downloaded;
        }
        Ok(())
    }
}

#[tokio::test]
async fn created_item_shows_up_with_server_assigned_id() {
    let store = Arc::new(MemoryStore::default());
    let mut controller = Controller::new(store.clone());

    controller.refresh();
    controller.settle().await;
    assert!(controller.state().items.is_empty());

    controller.add(ItemDraft::new("Foo").category("Books").downloaded(false));
    controller.settle().await;

    let items = &controller.state().items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Foo");
    assert_eq!(items[0].category.as_deref(), Some("Books"));
    assert!(!items[0].downloaded);
    assert_eq!(items[0].id, store.snapshot()[0].id);
}

#[tokio::test]
async fn toggling_twice_restores_original_value() {
    let store = Arc::new(MemoryStore::default());
    let mut controller = Controller::new(store);

    controller.add(ItemDraft::new("Album"));
    controller.settle().await;
    let original = controller.state().items[0].clone();

    controller.toggle_downloaded(&original);
    controller.settle().await;
    let toggled = controller.state().items[0].clone();
    assert_eq!(toggled.downloaded, !original.downloaded);

    controller.toggle_downloaded(&toggled);
    controller.settle().await;
    assert_eq!(controller.state().items[0], original);
}

#[tokio::test]
async fn added_item_outside_active_filter_stays_hidden() {
    let store = Arc::new(MemoryStore::default());
    let mut controller = Controller::new(store.clone());

    controller.set_downloaded_filter(DownloadedFilter::Downloaded);
    controller.settle().await;

    controller.add(ItemDraft::new("Not yet").downloaded(false));
    controller.settle().await;

    assert!(controller.state().items.is_empty());
    assert_eq!(store.snapshot().len(), 1);

    controller.reset_filters();
    controller.settle().await;
    assert_eq!(controller.state().items.len(), 1);
}

#[tokio::test]
async fn deleting_unknown_id_leaves_collection_unchanged() {
    let store = Arc::new(MemoryStore::default());
    let mut controller = Controller::new(store);

    controller.add(ItemDraft::new("Keep me"));
    controller.settle().await;
    let before = controller.state().items.clone();

    controller.delete(ItemId(999));
    controller.settle().await;

    assert_eq!(
        controller.state().error,
        Some(ViewError::Mutation(MutationKind::Delete))
    );
    assert_eq!(controller.state().error_message(), Some("Failed to delete item"));
    assert_eq!(controller.state().items, before);
}

#[tokio::test]
async fn delete_then_refetch_removes_item() {
    let store = Arc::new(MemoryStore::default());
    let mut controller = Controller::new(store);

    controller.add(ItemDraft::new("Lamp"));
    controller.add(ItemDraft::new("Book"));
    controller.settle().await;
    assert_eq!(controller.state().items.len(), 2);

    let lamp = controller
        .state()
        .items
        .iter()
        .find(|item| item.name == "Lamp")
        .map(|item| item.id)
        .unwrap();
    controller.delete(lamp);
    controller.settle().await;

    let names: Vec<&str> = controller
        .state()
        .items
        .iter()
        .map(|item| item.name.as_str())
        .collect();
    assert_eq!(names, vec!["Book"]);
    assert_eq!(controller.state().error, None);
}
