//! Books module: catalog state, search, pagination, and the service that
//! ties them to the on-disk store.

pub mod models;
pub mod pagination;
pub mod search;
pub mod seed;
pub mod state;

use anyhow::Context;
use bindery_kernel::{AppError, Settings};
use bindery_store::KvStore;

use models::{Book, BookDraft};
use pagination::{paginate, Page};
use search::{Facets, SearchFilters};
use state::Catalog;

/// The catalog plus its backing store. Every mutation rewrites the
/// serialized list under the configured key.
pub struct BookService {
    store: KvStore,
    key: String,
    catalog: Catalog,
}

impl BookService {
    /// Open the store and load the book list. A missing key seeds the
    /// catalog with the built-in samples and persists them; a payload that
    /// does not deserialize is an error.
    pub fn open(settings: &Settings) -> anyhow::Result<Self> {
        let store = KvStore::open(&settings.store.path)?;
        let key = settings.store.key.clone();

        let loaded = store.get(&key).map(str::to_owned);
        let service = match loaded {
            Some(raw) => {
                let books: Vec<Book> = serde_json::from_str(&raw)
                    .with_context(|| format!("stored book list under '{key}' is corrupt"))?;
                tracing::debug!(count = books.len(), "loaded catalog from store");
                Self {
                    store,
                    key,
                    catalog: Catalog::from_books(books),
                }
            }
            None => {
                let catalog = Catalog::from_books(seed::seed_books());
                tracing::info!(count = catalog.len(), "store empty, seeding catalog");
                let mut service = Self {
                    store,
                    key,
                    catalog,
                };
                service.persist()?;
                service
            }
        };

        Ok(service)
    }

    fn persist(&mut self) -> anyhow::Result<()> {
        let raw = serde_json::to_string(self.catalog.books())
            .context("failed to serialize book list")?;
        self.store.put(self.key.clone(), raw)
    }

    pub fn books(&self) -> &[Book] {
        self.catalog.books()
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn get(&self, id: u32) -> Result<&Book, AppError> {
        self.catalog.get(id).ok_or_else(|| AppError::not_found("Book not found"))
    }

    /// One page of the catalog, newest publication first.
    pub fn list_page(&self, page: usize, per_page: usize) -> Page<Book> {
        let ordered: Vec<Book> = self.catalog.by_recency().into_iter().cloned().collect();
        paginate(&ordered, page, per_page)
    }

    /// Quick text search, capped at `limit` results.
    pub fn search(&self, term: &str, limit: usize) -> Vec<&Book> {
        search::quick_search(self.catalog.books(), term, limit)
    }

    /// Advanced search: filtered collection in catalog order, paged.
    pub fn find_page(&self, filters: &SearchFilters, page: usize, per_page: usize) -> Page<Book> {
        let matched: Vec<Book> = filters
            .apply(self.catalog.books())
            .into_iter()
            .cloned()
            .collect();
        paginate(&matched, page, per_page)
    }

    pub fn facets(&self) -> Facets {
        search::facets(self.catalog.books())
    }

    /// Validate a draft and append it under a fresh id.
    pub fn create(&mut self, draft: BookDraft) -> Result<Book, AppError> {
        draft.validate()?;
        let book = draft.into_book(self.catalog.next_id(), None);
        self.catalog.add(book.clone())?;
        self.persist()?;
        tracing::info!(id = book.id, title = %book.title, "book added");
        Ok(book)
    }

    /// Validate a draft and replace the record with the given id.
    pub fn update(&mut self, id: u32, draft: BookDraft) -> Result<Book, AppError> {
        draft.validate()?;
        let existing = self.get(id)?.clone();
        let book = draft.into_book(id, Some(&existing));
        self.catalog.edit(book.clone())?;
        self.persist()?;
        tracing::info!(id, title = %book.title, "book updated");
        Ok(book)
    }

    /// Remove the record with the given id, returning it.
    pub fn remove(&mut self, id: u32) -> Result<Book, AppError> {
        let removed = self.catalog.delete(id)?;
        self.persist()?;
        tracing::info!(id, title = %removed.title, "book deleted");
        Ok(removed)
    }

    /// Replace the collection wholesale.
    pub fn set_books(&mut self, books: Vec<Book>) -> Result<(), AppError> {
        self.catalog.set(books);
        self.persist()?;
        Ok(())
    }
}
