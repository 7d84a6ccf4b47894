//! Catalog state: the in-memory book collection and its mutation ops.
//!
//! Every mutation goes through here so the id-uniqueness invariant holds in
//! one place; reads hand out slices or references and never copy the list.

use bindery_kernel::AppError;
use serde_json::json;

use super::models::Book;

#[derive(Debug, Default)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a loaded list. Duplicate ids are dropped with a
    /// warning, first occurrence wins.
    pub fn from_books(books: Vec<Book>) -> Self {
        let mut catalog = Self::new();
        for book in books {
            if catalog.get(book.id).is_some() {
                tracing::warn!(id = book.id, title = %book.title, "dropping duplicate id");
                continue;
            }
            catalog.books.push(book);
        }
        catalog
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Next free id, monotonic over the current collection.
    pub fn next_id(&self) -> u32 {
        self.books.iter().map(|book| book.id).max().unwrap_or(0) + 1
    }

    /// Replace the collection wholesale.
    pub fn set(&mut self, books: Vec<Book>) {
        *self = Self::from_books(books);
    }

    /// Append a record; the id must be unused.
    pub fn add(&mut self, book: Book) -> Result<(), AppError> {
        if self.get(book.id).is_some() {
            return Err(AppError::conflict(
                vec![json!({"field": "id", "error": "id already in use"})],
                format!("book #{} already exists", book.id),
            ));
        }
        self.books.push(book);
        Ok(())
    }

    /// Replace the record with the same id.
    pub fn edit(&mut self, book: Book) -> Result<(), AppError> {
        match self.books.iter_mut().find(|b| b.id == book.id) {
            Some(slot) => {
                *slot = book;
                Ok(())
            }
            None => Err(AppError::not_found("Book not found")),
        }
    }

    /// Remove a record by id, returning it.
    pub fn delete(&mut self, id: u32) -> Result<Book, AppError> {
        match self.books.iter().position(|book| book.id == id) {
            Some(index) => Ok(self.books.remove(index)),
            None => Err(AppError::not_found("Book not found")),
        }
    }

    /// The collection ordered by publication date, newest first. Records
    /// without a date sort last; ties keep insertion order.
    pub fn by_recency(&self) -> Vec<&Book> {
        let mut ordered: Vec<&Book> = self.books.iter().collect();
        ordered.sort_by(|a, b| b.recency_key().cmp(&a.recency_key()));
        ordered
    }
}
