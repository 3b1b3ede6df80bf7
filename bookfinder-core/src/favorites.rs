//! Persistent set of favorite books

use crate::error::StorageError;
use crate::storage::{KeyValueStore, LocalStorage};
use crate::types::Book;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Storage key holding the serialized favorites
pub const FAVORITES_KEY: &str = "favorites.json";

/// Process-wide favorites, kept in insertion order and written back to
/// durable storage after every change.
///
/// Operations never fail: unreadable storage yields an empty set and write
/// failures are logged while the in-memory set stays authoritative.
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStore>,
    books: RwLock<Vec<Book>>,
}

impl FavoritesStore {
    /// Open the favorites kept on disk under `data_dir`
    ///
    /// The directory is created if it does not exist yet.
    pub async fn open(data_dir: impl AsRef<Path>) -> crate::Result<Self> {
        let data_dir = data_dir.as_ref();
        tokio::fs::create_dir_all(data_dir).await?;
        info!("Favorites stored in {}", data_dir.display());

        Ok(Self::load(Arc::new(LocalStorage::new(data_dir))).await)
    }

    /// Load favorites from storage
    pub async fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let books = match storage.read(FAVORITES_KEY).await {
            Ok(data) => match serde_json::from_slice::<Vec<Book>>(&data) {
                Ok(books) => dedup(books),
                Err(e) => {
                    warn!("Stored favorites are malformed, starting empty: {}", e);
                    Vec::new()
                }
            },
            Err(StorageError::NotFound(_)) => Vec::new(),
            Err(e) => {
                warn!("Failed to read favorites, starting empty: {}", e);
                Vec::new()
            }
        };
        debug!("Loaded {} favorite(s)", books.len());

        Self {
            storage,
            books: RwLock::new(books),
        }
    }

    /// Add a book; returns false if it was already a favorite
    pub async fn add(&self, book: Book) -> bool {
        let mut books = self.books.write().await;
        if books.iter().any(|b| b.id == book.id) {
            return false;
        }
        debug!("Adding favorite {}", book.id);
        books.push(book);
        self.persist(&books).await;
        true
    }

    /// Remove a book by identifier; returns false if it was not a favorite
    pub async fn remove(&self, id: &str) -> bool {
        let mut books = self.books.write().await;
        let before = books.len();
        books.retain(|b| b.id != id);
        if books.len() == before {
            return false;
        }
        debug!("Removed favorite {}", id);
        self.persist(&books).await;
        true
    }

    /// Add the book if absent, remove it otherwise; returns whether it is now a favorite
    pub async fn toggle(&self, book: Book) -> bool {
        let mut books = self.books.write().await;
        let favorite = match books.iter().position(|b| b.id == book.id) {
            Some(index) => {
                books.remove(index);
                false
            }
            None => {
                books.push(book);
                true
            }
        };
        self.persist(&books).await;
        favorite
    }

    /// Check whether a book is a favorite
    pub async fn is_favorite(&self, id: &str) -> bool {
        self.books.read().await.iter().any(|b| b.id == id)
    }

    /// Look up a favorite by identifier
    pub async fn get(&self, id: &str) -> Option<Book> {
        self.books.read().await.iter().find(|b| b.id == id).cloned()
    }

    /// Current favorites in insertion order
    pub async fn list(&self) -> Vec<Book> {
        self.books.read().await.clone()
    }

    /// Number of favorites
    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }

    async fn persist(&self, books: &[Book]) {
        let data = match serde_json::to_vec_pretty(books) {
            Ok(data) => data,
            Err(e) => {
                warn!("Failed to serialize favorites: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.write(FAVORITES_KEY, data).await {
            warn!("Failed to persist favorites: {}", e);
        }
    }
}

fn dedup(books: Vec<Book>) -> Vec<Book> {
    let mut seen = std::collections::HashSet::new();
    books
        .into_iter()
        .filter(|b| seen.insert(b.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{LocalStorage, MemoryStorage, StorageResult};
    use async_trait::async_trait;

    fn book(id: &str) -> Book {
        Book::new(id, format!("Title {}", id)).with_author("Author")
    }

    async fn empty_store() -> (FavoritesStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (FavoritesStore::load(storage.clone()).await, storage)
    }

    #[tokio::test]
    async fn test_add_and_lookup() {
        let (store, _) = empty_store().await;
        assert!(store.is_empty().await);

        assert!(store.add(book("a")).await);
        assert!(store.is_favorite("a").await);
        assert!(!store.is_favorite("b").await);
        assert_eq!(store.get("a").await.unwrap().title, "Title a");
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let (store, _) = empty_store().await;
        store.add(book("a")).await;
        assert!(!store.add(book("a")).await);

        let list = store.list().await;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "a");
    }

    #[tokio::test]
    async fn test_add_then_remove_leaves_empty() {
        let (store, _) = empty_store().await;
        store.add(book("a")).await;
        assert!(store.remove("a").await);
        assert!(!store.is_favorite("a").await);
        assert!(store.list().await.is_empty());

        // Removing an absent id is a no-op
        assert!(!store.remove("a").await);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let (store, _) = empty_store().await;
        for id in ["c", "a", "b"] {
            store.add(book(id)).await;
        }
        store.remove("a").await;
        store.add(book("a")).await;

        let ids: Vec<String> = store.list().await.into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_toggle() {
        let (store, _) = empty_store().await;
        assert!(store.toggle(book("a")).await);
        assert!(store.is_favorite("a").await);
        assert!(!store.toggle(book("a")).await);
        assert!(!store.is_favorite("a").await);
    }

    #[tokio::test]
    async fn test_every_mutation_is_persisted() {
        let (store, storage) = empty_store().await;
        store.add(book("a")).await;
        store.add(book("b")).await;

        let reloaded = FavoritesStore::load(storage.clone()).await;
        assert_eq!(reloaded.list().await, vec![book("a"), book("b")]);

        store.remove("a").await;
        let reloaded = FavoritesStore::load(storage).await;
        assert_eq!(reloaded.list().await, vec![book("b")]);
    }

    #[tokio::test]
    async fn test_round_trip_through_local_storage() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage: Arc<dyn KeyValueStore> = Arc::new(LocalStorage::new(dir.path()));

        let store = FavoritesStore::load(storage.clone()).await;
        let dune = Book::new("dune", "Dune")
            .with_author("Frank Herbert")
            .with_thumbnail("https://img/dune")
            .with_description("Spice");
        store.add(dune.clone()).await;
        store.add(book("x")).await;

        let reloaded = FavoritesStore::load(storage).await;
        let list = reloaded.list().await;
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, "dune");
        assert_eq!(list[0].authors, dune.authors);
        assert_eq!(list[0].thumbnail, dune.thumbnail);
        assert_eq!(list[0].description, dune.description);
        assert_eq!(list[1].id, "x");
    }

    #[tokio::test]
    async fn test_open_creates_data_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let data_dir = dir.path().join("a/b");

        let store = FavoritesStore::open(&data_dir).await.unwrap();
        assert!(data_dir.is_dir());
        store.add(book("a")).await;
        assert!(data_dir.join(FAVORITES_KEY).is_file());

        let reopened = FavoritesStore::open(&data_dir).await.unwrap();
        assert_eq!(reopened.list().await, vec![book("a")]);
    }

    #[tokio::test]
    async fn test_open_fails_when_data_dir_is_a_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, b"").unwrap();

        let result = FavoritesStore::open(&file).await;
        assert!(matches!(result, Err(crate::BookfinderError::Io(_))));
    }

    #[tokio::test]
    async fn test_malformed_storage_is_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .write(FAVORITES_KEY, b"{not json".to_vec())
            .await
            .unwrap();

        let store = FavoritesStore::load(storage).await;
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_duplicate_entries_in_storage_are_collapsed() {
        let storage = Arc::new(MemoryStorage::new());
        let data = serde_json::to_vec(&vec![book("a"), book("b"), book("a")]).unwrap();
        storage.write(FAVORITES_KEY, data).await.unwrap();

        let store = FavoritesStore::load(storage).await;
        assert_eq!(store.len().await, 2);
    }

    struct FailingStorage;

    #[async_trait]
    impl KeyValueStore for FailingStorage {
        async fn read(&self, _key: &str) -> StorageResult<Vec<u8>> {
            Err(StorageError::BackendError("disk on fire".to_string()))
        }
        async fn write(&self, _key: &str, _data: Vec<u8>) -> StorageResult<()> {
            Err(StorageError::BackendError("disk on fire".to_string()))
        }
    }

    #[tokio::test]
    async fn test_storage_failures_do_not_fail_operations() {
        let store = FavoritesStore::load(Arc::new(FailingStorage)).await;
        assert!(store.is_empty().await);
        assert!(store.add(book("a")).await);
        assert!(store.is_favorite("a").await);
        assert!(store.remove("a").await);
    }
}
