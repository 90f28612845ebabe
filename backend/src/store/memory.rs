// In-memory book store
// Process-local stand-in for the database, used for demos and tests

use super::{Book, BookId, BookRepository, NewBook, StoreError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use tracing::debug;

/// Mutex-guarded ordered map keyed by book id
#[derive(Debug, Default)]
pub struct MemoryStore {
    books: Mutex<BTreeMap<BookId, Book>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with existing books
    ///
    /// Later books win when two share an id.
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        let books = books.into_iter().map(|book| (book.id, book)).collect();
        Self {
            books: Mutex::new(books),
        }
    }
}

#[async_trait]
impl BookRepository for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Book>, StoreError> {
        let books = self.books.lock().await;
        Ok(books.values().cloned().collect())
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StoreError> {
        let books = self.books.lock().await;
        Ok(books.get(&id).cloned())
    }

    async fn insert(&self, book: &NewBook) -> Result<Book, StoreError> {
        let mut books = self.books.lock().await;
        // max + 1, so ids freed by deleting the highest book are handed out again
        let id = books.last_key_value().map_or(1, |(id, _)| id + 1);
        let book = book.clone().into_book(id);
        books.insert(id, book.clone());

        debug!(book_id = id, "Inserted book into memory store");
        Ok(book)
    }

    async fn update(&self, id: BookId, book: &NewBook) -> Result<u64, StoreError> {
        let mut books = self.books.lock().await;
        match books.get_mut(&id) {
            Some(existing) => {
                *existing = book.clone().into_book(id);
                debug!(book_id = id, "Updated book in memory store");
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_id(&self, id: BookId) -> Result<u64, StoreError> {
        let mut books = self.books.lock().await;
        Ok(books.remove(&id).map_or(0, |_| {
            debug!(book_id = id, "Deleted book from memory store");
            1
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_book(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Author".to_string(),
            year: 2001,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_max_plus_one() {
        let store = MemoryStore::with_books(vec![new_book("Seeded").into_book(7)]);

        let book = store.insert(&new_book("Next")).await.unwrap();
        assert_eq!(book.id, 8);

        let empty = MemoryStore::new();
        assert_eq!(empty.insert(&new_book("First")).await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let store = MemoryStore::with_books(vec![
            new_book("C").into_book(3),
            new_book("A").into_book(1),
            new_book("B").into_book(2),
        ]);

        let ids: Vec<BookId> = store.list_all().await.unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_update_and_delete_report_affected_rows() {
        let store = MemoryStore::new();
        let book = store.insert(&new_book("Original")).await.unwrap();

        assert_eq!(store.update(book.id, &new_book("Changed")).await.unwrap(), 1);
        assert_eq!(store.update(99, &new_book("Missing")).await.unwrap(), 0);
        assert_eq!(
            store.find_by_id(book.id).await.unwrap().unwrap().title,
            "Changed"
        );

        assert_eq!(store.delete_by_id(book.id).await.unwrap(), 1);
        assert_eq!(store.delete_by_id(book.id).await.unwrap(), 0);
        assert!(store.find_by_id(book.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_inserts_get_unique_ids() {
        let store = Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.insert(&new_book(&format!("Book {i}"))).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 20);
        assert_eq!(store.list_all().await.unwrap().len(), 20);
    }
}
