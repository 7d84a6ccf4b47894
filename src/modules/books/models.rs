use std::fmt;
use std::str::FromStr;

use bindery_kernel::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use url::Url;

use crate::utils::truncate_blurb;

/// Maximum length of a derived short description before it is elided.
const SHORT_DESCRIPTION_LEN: usize = 150;

const DISPLAY_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");

/// Publication status of a catalog record.
///
/// The wire names come from the catalog dump the application ships with:
/// `PUBLISH` for released titles, `MEAP` for titles announced but not yet
/// published.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum BookStatus {
    #[serde(rename = "PUBLISH")]
    Published,
    #[serde(rename = "MEAP")]
    #[default]
    Upcoming,
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Published => write!(f, "Published"),
            Self::Upcoming => write!(f, "Yet to be Published"),
        }
    }
}

impl FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "publish" | "published" => Ok(Self::Published),
            "meap" | "upcoming" => Ok(Self::Upcoming),
            other => Err(format!(
                "unknown status '{other}'; expected published or upcoming"
            )),
        }
    }
}

/// Publication date in the dump's `{"$date": "..."}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublishedDate {
    #[serde(rename = "$date", with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

impl PublishedDate {
    pub fn new(date: OffsetDateTime) -> Self {
        Self { date }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// A catalog entry.
///
/// Ids are unique within the catalog; every other field is tolerated empty
/// or missing and masked with a fallback at render time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: u32,
    pub title: String,
    pub authors: Vec<String>,
    pub categories: Vec<String>,
    pub status: BookStatus,
    pub page_count: u32,
    pub isbn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<PublishedDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl Book {
    pub fn published_year(&self) -> Option<i32> {
        self.published_date.as_ref().map(PublishedDate::year)
    }

    /// Sort key for recency ordering; records without a date sort last.
    pub fn recency_key(&self) -> OffsetDateTime {
        self.published_date
            .as_ref()
            .map(|d| d.date)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }

    pub fn display_authors(&self) -> String {
        if self.authors.is_empty() {
            "Unknown author".to_string()
        } else {
            self.authors.join(", ")
        }
    }

    pub fn display_date(&self) -> String {
        self.published_date
            .as_ref()
            .and_then(|d| d.date.format(DISPLAY_DATE_FORMAT).ok())
            .unwrap_or_else(|| "Unknown Date".to_string())
    }

    /// Short description, falling back to the long one.
    pub fn blurb(&self) -> &str {
        self.short_description
            .as_deref()
            .or(self.long_description.as_deref())
            .unwrap_or("No Description Available")
    }

    pub fn display_page_count(&self) -> u32 {
        if self.page_count == 0 {
            1
        } else {
            self.page_count
        }
    }

    pub fn thumbnail(&self) -> &str {
        self.thumbnail_url.as_deref().unwrap_or("/default.png")
    }
}

/// Create/edit input for a catalog entry. Authors and categories arrive as
/// comma-separated text, matching the entry form.
#[derive(Debug, Clone, Default)]
pub struct BookDraft {
    pub title: String,
    pub authors: String,
    pub description: String,
    pub thumbnail: String,
    pub categories: String,
    pub page_count: u32,
}

impl BookDraft {
    /// Prefill a draft from an existing record, for editing.
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            authors: book.authors.join(", "),
            description: book
                .long_description
                .clone()
                .or_else(|| book.short_description.clone())
                .unwrap_or_default(),
            thumbnail: book.thumbnail_url.clone().unwrap_or_default(),
            categories: book.categories.join(", "),
            page_count: book.page_count,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let mut details = Vec::new();

        if self.title.trim().is_empty() {
            details.push(json!({"field": "title", "error": "Title is required"}));
        }
        if split_list(&self.authors).is_empty() {
            details.push(json!({"field": "authors", "error": "At least one author is required"}));
        }
        if !self.thumbnail.trim().is_empty() && Url::parse(self.thumbnail.trim()).is_err() {
            details.push(json!({"field": "thumbnail", "error": "Please enter a valid URL"}));
        }

        if details.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(details, "book draft failed validation"))
        }
    }

    /// Turn a validated draft into a record. ISBN and publication date are
    /// carried over from `existing` when present, otherwise generated.
    pub fn into_book(self, id: u32, existing: Option<&Book>) -> Book {
        let description = self.description.trim().to_string();
        let mut categories = split_list(&self.categories);
        if categories.is_empty() {
            categories.push("General".to_string());
        }

        let (short_description, long_description) = if description.is_empty() {
            (None, None)
        } else {
            (
                Some(truncate_blurb(&description, SHORT_DESCRIPTION_LEN)),
                Some(description),
            )
        };

        Book {
            id,
            title: self.title.trim().to_string(),
            authors: split_list(&self.authors),
            categories,
            status: BookStatus::Published,
            page_count: self.page_count,
            isbn: existing
                .map(|b| b.isbn.clone())
                .filter(|isbn| !isbn.is_empty())
                .unwrap_or_else(generated_isbn),
            published_date: existing
                .and_then(|b| b.published_date.clone())
                .or_else(|| Some(PublishedDate::new(OffsetDateTime::now_utc()))),
            short_description,
            long_description,
            thumbnail_url: Some(self.thumbnail.trim().to_string()).filter(|t| !t.is_empty()),
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn generated_isbn() -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    format!("ISBN-{:06}", millis % 1_000_000)
}
