//! Search over the catalog: the quick text search used by the search bar
//! and the multi-criteria filter behind the advanced search form. Both are
//! pure functions over the in-memory list.

use serde::Serialize;

use super::models::{Book, BookStatus};

/// Case-insensitive substring search across title, authors, and
/// categories. A blank term matches nothing; results are capped at `limit`.
pub fn quick_search<'a>(books: &'a [Book], term: &str, limit: usize) -> Vec<&'a Book> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    books
        .iter()
        .filter(|book| {
            book.title.to_lowercase().contains(&needle)
                || contains_ci(&book.authors, &needle)
                || contains_ci(&book.categories, &needle)
        })
        .take(limit)
        .collect()
}

fn contains_ci(haystack: &[String], needle: &str) -> bool {
    haystack.iter().any(|s| s.to_lowercase().contains(needle))
}

/// Criteria for the advanced search. Absent criteria match everything;
/// present ones are AND-combined.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub status: Option<BookStatus>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub page_min: Option<u32>,
    pub page_max: Option<u32>,
}

impl SearchFilters {
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(title) = &self.title {
            if !book.title.to_lowercase().contains(&title.to_lowercase()) {
                return false;
            }
        }

        if let Some(author) = &self.author {
            if !contains_ci(&book.authors, &author.to_lowercase()) {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if !book.categories.iter().any(|c| c == category) {
                return false;
            }
        }

        if let Some(status) = self.status {
            if book.status != status {
                return false;
            }
        }

        // A year bound excludes records without a publication date.
        if self.year_from.is_some() || self.year_to.is_some() {
            let Some(year) = book.published_year() else {
                return false;
            };
            if self.year_from.is_some_and(|from| year < from) {
                return false;
            }
            if self.year_to.is_some_and(|to| year > to) {
                return false;
            }
        }

        if self.page_min.is_some_and(|min| book.page_count < min) {
            return false;
        }
        if self.page_max.is_some_and(|max| book.page_count > max) {
            return false;
        }

        true
    }

    pub fn apply<'a>(&self, books: &'a [Book]) -> Vec<&'a Book> {
        books.iter().filter(|book| self.matches(book)).collect()
    }

    /// Number of criteria set, for the "N filters active" badge.
    pub fn active_count(&self) -> usize {
        [
            self.title.is_some(),
            self.author.is_some(),
            self.category.is_some(),
            self.status.is_some(),
            self.year_from.is_some(),
            self.year_to.is_some(),
            self.page_min.is_some(),
            self.page_max.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

/// Distinct values available for the advanced search dropdowns, in
/// first-seen order.
#[derive(Debug, Serialize)]
pub struct Facets {
    pub categories: Vec<String>,
    pub authors: Vec<String>,
    pub statuses: Vec<BookStatus>,
}

pub fn facets(books: &[Book]) -> Facets {
    let mut categories: Vec<String> = Vec::new();
    let mut authors: Vec<String> = Vec::new();
    let mut statuses: Vec<BookStatus> = Vec::new();

    for book in books {
        for category in &book.categories {
            if !categories.contains(category) {
                categories.push(category.clone());
            }
        }
        for author in &book.authors {
            if !authors.contains(author) {
                authors.push(author.clone());
            }
        }
        if !statuses.contains(&book.status) {
            statuses.push(book.status);
        }
    }

    Facets {
        categories,
        authors,
        statuses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::models::PublishedDate;
    use time::macros::datetime;

    fn shelf() -> Vec<Book> {
        vec![
            Book {
                id: 1,
                title: "Unlocking Android".to_string(),
                authors: vec!["W. Frank Ableson".to_string(), "Robi Sen".to_string()],
                categories: vec!["Open Source".to_string(), "Mobile".to_string()],
                status: BookStatus::Published,
                page_count: 416,
                published_date: Some(PublishedDate::new(datetime!(2009-04-01 0:00 UTC))),
                ..Book::default()
            },
            Book {
                id: 2,
                title: "Griffon in Action".to_string(),
                authors: vec!["Andres Almiray".to_string()],
                categories: vec!["Java".to_string()],
                status: BookStatus::Published,
                page_count: 375,
                published_date: Some(PublishedDate::new(datetime!(2012-06-04 0:00 UTC))),
                ..Book::default()
            },
            Book {
                id: 3,
                title: "Windows Phone 7 in Action".to_string(),
                authors: vec!["Timothy Binkley-Jones".to_string()],
                categories: vec!["Mobile".to_string()],
                status: BookStatus::Upcoming,
                page_count: 0,
                ..Book::default()
            },
        ]
    }

    fn titles<'a>(books: &[&'a Book]) -> Vec<&'a str> {
        books.iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn quick_search_matches_title_author_and_category() {
        let books = shelf();
        assert_eq!(
            titles(&quick_search(&books, "android", 5)),
            vec!["Unlocking Android"]
        );
        assert_eq!(
            titles(&quick_search(&books, "almiray", 5)),
            vec!["Griffon in Action"]
        );
        assert_eq!(
            titles(&quick_search(&books, "mobile", 5)),
            vec!["Unlocking Android", "Windows Phone 7 in Action"]
        );
    }

    #[test]
    fn quick_search_blank_term_matches_nothing() {
        let books = shelf();
        assert!(quick_search(&books, "", 5).is_empty());
        assert!(quick_search(&books, "   ", 5).is_empty());
    }

    #[test]
    fn quick_search_caps_results() {
        let books = shelf();
        assert_eq!(quick_search(&books, "action", 1).len(), 1);
    }

    #[test]
    fn empty_filters_match_everything() {
        let books = shelf();
        let filters = SearchFilters::default();
        assert!(filters.is_empty());
        assert_eq!(filters.apply(&books).len(), books.len());
    }

    #[test]
    fn criteria_are_and_combined() {
        let books = shelf();
        let filters = SearchFilters {
            title: Some("action".to_string()),
            category: Some("Mobile".to_string()),
            ..SearchFilters::default()
        };
        assert_eq!(
            titles(&filters.apply(&books)),
            vec!["Windows Phone 7 in Action"]
        );
    }

    #[test]
    fn category_match_is_exact_membership() {
        let books = shelf();
        let filters = SearchFilters {
            category: Some("Mob".to_string()),
            ..SearchFilters::default()
        };
        assert!(filters.apply(&books).is_empty());
    }

    #[test]
    fn status_filter_is_equality() {
        let books = shelf();
        let filters = SearchFilters {
            status: Some(BookStatus::Upcoming),
            ..SearchFilters::default()
        };
        assert_eq!(
            titles(&filters.apply(&books)),
            vec!["Windows Phone 7 in Action"]
        );
    }

    #[test]
    fn year_bounds_are_inclusive_and_exclude_dateless() {
        let books = shelf();
        let filters = SearchFilters {
            year_from: Some(2009),
            year_to: Some(2012),
            ..SearchFilters::default()
        };
        assert_eq!(
            titles(&filters.apply(&books)),
            vec!["Unlocking Android", "Griffon in Action"]
        );

        let from_only = SearchFilters {
            year_from: Some(2010),
            ..SearchFilters::default()
        };
        assert_eq!(titles(&from_only.apply(&books)), vec!["Griffon in Action"]);
    }

    #[test]
    fn page_bounds_are_inclusive() {
        let books = shelf();
        let filters = SearchFilters {
            page_min: Some(375),
            page_max: Some(416),
            ..SearchFilters::default()
        };
        assert_eq!(
            titles(&filters.apply(&books)),
            vec!["Unlocking Android", "Griffon in Action"]
        );
    }

    #[test]
    fn active_count_reflects_set_criteria() {
        let filters = SearchFilters {
            title: Some("x".to_string()),
            year_to: Some(2020),
            ..SearchFilters::default()
        };
        assert_eq!(filters.active_count(), 2);
    }

    #[test]
    fn facets_are_distinct_in_first_seen_order() {
        let books = shelf();
        let facets = facets(&books);
        assert_eq!(facets.categories, vec!["Open Source", "Mobile", "Java"]);
        assert_eq!(
            facets.statuses,
            vec![BookStatus::Published, BookStatus::Upcoming]
        );
        assert_eq!(facets.authors.len(), 4);
    }
}
