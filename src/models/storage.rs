use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::book::BookRecord;

/// Seam for the catalog so a real datastore can replace the in-memory list
/// without touching the search handler.
#[async_trait]
pub trait CatalogStore {
    /// Appends a record. Always succeeds; the record is visible to every
    /// subsequent read.
    async fn append(&self, book: BookRecord);
    /// Every record added so far, in insertion order.
    async fn all(&self) -> Vec<BookRecord>;
}

pub type Catalog = Arc<dyn CatalogStore + Send + Sync>;

/// Process-lifetime book list. No uniqueness constraint; appends are atomic
/// single-record insertions, reads clone the current snapshot.
#[derive(Default)]
pub struct MemoryCatalog {
    books: Mutex<Vec<BookRecord>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn append(&self, book: BookRecord) {
        self.books.lock().unwrap().push(book);
    }

    async fn all(&self) -> Vec<BookRecord> {
        self.books.lock().unwrap().clone()
    }
}
