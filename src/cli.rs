//! Command-line surface: one subcommand per catalog page of the app
//! (list, quick search, advanced search, detail view, add/edit/delete).

use anyhow::Result;
use bindery_kernel::Settings;
use clap::{Parser, Subcommand};

use crate::modules::books::models::{Book, BookDraft, BookStatus};
use crate::modules::books::pagination::{page_strip, Page, PageMarker};
use crate::modules::books::search::SearchFilters;
use crate::modules::books::BookService;

#[derive(Debug, Parser)]
#[command(name = "bindery", version, about = "Local book catalog manager")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the catalog, newest publication first
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Cards per page (defaults to the configured page size)
        #[arg(long)]
        per_page: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Quick search across titles, authors, and categories
    Search {
        term: String,
        /// Result cap (defaults to the configured limit)
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Advanced search with per-field criteria
    Find {
        /// Title substring, case-insensitive
        #[arg(long)]
        title: Option<String>,
        /// Author substring, case-insensitive
        #[arg(long)]
        author: Option<String>,
        /// Exact category
        #[arg(long)]
        category: Option<String>,
        /// published or upcoming
        #[arg(long)]
        status: Option<BookStatus>,
        #[arg(long)]
        year_from: Option<i32>,
        #[arg(long)]
        year_to: Option<i32>,
        #[arg(long)]
        pages_min: Option<u32>,
        #[arg(long)]
        pages_max: Option<u32>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        per_page: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Show one record in full
    Show {
        id: u32,
        #[arg(long)]
        json: bool,
    },
    /// Add a record to the catalog
    Add {
        #[arg(long)]
        title: String,
        /// Comma-separated author names
        #[arg(long)]
        authors: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Thumbnail URL
        #[arg(long, default_value = "")]
        thumbnail: String,
        /// Comma-separated categories
        #[arg(long, default_value = "General")]
        categories: String,
        #[arg(long, default_value_t = 1)]
        page_count: u32,
    },
    /// Edit a record; omitted flags keep the current values
    Edit {
        id: u32,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        authors: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        thumbnail: Option<String>,
        #[arg(long)]
        categories: Option<String>,
        #[arg(long)]
        page_count: Option<u32>,
    },
    /// Delete a record
    Rm { id: u32 },
    /// Distinct categories, authors, and statuses in the catalog
    Facets,
}

pub fn run(cli: Cli, service: &mut BookService, settings: &Settings) -> Result<()> {
    match cli.command {
        Command::List {
            page,
            per_page,
            json,
        } => {
            let per_page = per_page.unwrap_or(settings.catalog.page_size);
            let listed = service.list_page(page, per_page);
            if json {
                print_json(&listed.items)?;
            } else {
                render_page(&listed);
            }
        }
        Command::Search { term, limit, json } => {
            let limit = limit.unwrap_or(settings.catalog.quick_search_limit);
            let results = service.search(&term, limit);
            if json {
                print_json(&results)?;
            } else if results.is_empty() {
                println!("No books found for \"{term}\"");
            } else {
                println!("Results for \"{term}\"");
                for book in results {
                    println!("  #{} {} ({})", book.id, book.title, book.display_authors());
                }
            }
        }
        Command::Find {
            title,
            author,
            category,
            status,
            year_from,
            year_to,
            pages_min,
            pages_max,
            page,
            per_page,
            json,
        } => {
            let filters = SearchFilters {
                title,
                author,
                category,
                status,
                year_from,
                year_to,
                page_min: pages_min,
                page_max: pages_max,
            };
            let per_page = per_page.unwrap_or(settings.catalog.page_size);
            let found = service.find_page(&filters, page, per_page);
            if json {
                print_json(&found.items)?;
            } else {
                let active = filters.active_count();
                println!(
                    "{} filter{} active, {} match{}",
                    active,
                    if active == 1 { "" } else { "s" },
                    found.total_items,
                    if found.total_items == 1 { "" } else { "es" },
                );
                render_page(&found);
            }
        }
        Command::Show { id, json } => {
            let book = service.get(id)?;
            if json {
                print_json(book)?;
            } else {
                render_details(book);
            }
        }
        Command::Add {
            title,
            authors,
            description,
            thumbnail,
            categories,
            page_count,
        } => {
            let draft = BookDraft {
                title,
                authors,
                description,
                thumbnail,
                categories,
                page_count,
            };
            let book = service.create(draft)?;
            println!("Added book #{}: {}", book.id, book.title);
        }
        Command::Edit {
            id,
            title,
            authors,
            description,
            thumbnail,
            categories,
            page_count,
        } => {
            let mut draft = BookDraft::from_book(service.get(id)?);
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(authors) = authors {
                draft.authors = authors;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(thumbnail) = thumbnail {
                draft.thumbnail = thumbnail;
            }
            if let Some(categories) = categories {
                draft.categories = categories;
            }
            if let Some(page_count) = page_count {
                draft.page_count = page_count;
            }
            let book = service.update(id, draft)?;
            println!("Updated book #{}: {}", book.id, book.title);
        }
        Command::Rm { id } => {
            let removed = service.remove(id)?;
            println!("Deleted book #{}: {}", removed.id, removed.title);
        }
        Command::Facets => {
            let facets = service.facets();
            println!("Categories: {}", facets.categories.join(", "));
            println!("Authors: {}", facets.authors.join(", "));
            let statuses: Vec<String> =
                facets.statuses.iter().map(ToString::to_string).collect();
            println!("Statuses: {}", statuses.join(", "));
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_page(page: &Page<Book>) {
    if page.is_empty() {
        println!("No books found");
        return;
    }

    for book in &page.items {
        render_card(book);
        println!();
    }

    println!(
        "Page {} of {} ({} book{})",
        page.current,
        page.total_pages,
        page.total_items,
        if page.total_items == 1 { "" } else { "s" },
    );
    if page.total_pages > 1 {
        println!("{}", render_strip(page.current, page.total_pages));
    }
}

fn render_card(book: &Book) {
    println!("#{} {} [{}]", book.id, book.title, book.status);
    println!("   by {}", book.display_authors());
    println!(
        "   Published: {} | {} page{} | ISBN: {}",
        book.display_date(),
        book.display_page_count(),
        if book.display_page_count() == 1 { "" } else { "s" },
        book.isbn,
    );
    if !book.categories.is_empty() {
        println!("   Categories: {}", book.categories.join(", "));
    }
    println!("   {}", book.blurb());
}

fn render_details(book: &Book) {
    println!("{} [{}]", book.title, book.status);
    println!("by {}", book.display_authors());
    println!();
    println!("Id:         #{}", book.id);
    println!("ISBN:       {}", book.isbn);
    println!("Published:  {}", book.display_date());
    println!("Pages:      {}", book.display_page_count());
    println!("Categories: {}", book.categories.join(", "));
    println!("Thumbnail:  {}", book.thumbnail());
    println!();
    println!(
        "{}",
        book.long_description.as_deref().unwrap_or_else(|| book.blurb())
    );
}

fn render_strip(current: usize, total_pages: usize) -> String {
    page_strip(current, total_pages)
        .into_iter()
        .map(|marker| match marker {
            PageMarker::Page(n) if n == current => format!("[{n}]"),
            PageMarker::Page(n) => n.to_string(),
            PageMarker::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
