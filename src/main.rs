// Library Catalog CLI

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use library_catalog::{
    count_by_genre, filter_books, genre_options, import_csv, init_logging, summary, write_csv,
    BookStore, CatalogError, Config, Genre, GenreCounts, GenreFilter, EXPORT_FILE_NAME,
};

const BAR_WIDTH: usize = 40;

#[derive(Parser)]
#[command(name = "library-catalog")]
#[command(about = "Personal library catalog: add, list, delete, export and summarize books", long_about = None)]
#[command(version)]
struct Cli {
    /// SQLite database file (overrides LIBRARY_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a book
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        author: String,
        /// Fiction, Non-fiction, Mystery, Fantasy, Sci-Fi, Biography, History or Other
        #[arg(short, long)]
        genre: Genre,
        /// Date added (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// List books
    List {
        /// Genre to show, or "All"
        #[arg(short, long, default_value = "All")]
        genre: GenreFilter,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Delete a book by id
    Delete { id: String },

    /// Export the catalog to CSV
    Export {
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: PathBuf,
    },

    /// Import books from a CSV export
    Import { path: PathBuf },

    /// Show totals and the books-by-genre chart
    Stats,

    /// Show the genre filter options for the current catalog
    Genres,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env().with_db_path(cli.db);
    init_logging(&config.log_filter)?;

    let store = BookStore::open(&config.db_path)
        .with_context(|| format!("failed to open database at {}", config.db_path.display()))?;

    match cli.command {
        Commands::Add {
            title,
            author,
            genre,
            date,
        } => cmd_add(&store, &title, &author, genre, date),
        Commands::List { genre, json } => cmd_list(&store, genre, json),
        Commands::Delete { id } => cmd_delete(&store, &id),
        Commands::Export { output } => cmd_export(&store, output),
        Commands::Import { path } => cmd_import(&store, path),
        Commands::Stats => cmd_stats(&store),
        Commands::Genres => cmd_genres(&store),
    }
}

fn cmd_add(
    store: &BookStore,
    title: &str,
    author: &str,
    genre: Genre,
    date: Option<NaiveDate>,
) -> Result<()> {
    let book = match date {
        Some(date) => store.add_on(title, author, genre, date)?,
        None => store.add(title, author, genre)?,
    };

    println!("Added '{}' by {}", book.title, book.author);
    println!("  id: {}", book.id);
    Ok(())
}

fn cmd_list(store: &BookStore, genre: GenreFilter, json: bool) -> Result<()> {
    let books = filter_books(&store.list_all()?, genre);

    if json {
        println!("{}", serde_json::to_string_pretty(&books)?);
        return Ok(());
    }

    if books.is_empty() {
        println!("No books match your filters.");
        return Ok(());
    }

    println!("{:<36}  {:<30}  {:<20}  {:<11}  {}", "ID", "Title", "Author", "Genre", "Added On");
    println!("{}", "-".repeat(112));
    for book in &books {
        println!(
            "{:<36}  {:<30}  {:<20}  {:<11}  {}",
            book.id,
            truncate(&book.title, 30),
            truncate(&book.author, 20),
            book.genre,
            book.added_on
        );
    }
    println!("\n{} book(s) shown (filter: {})", books.len(), genre);

    Ok(())
}

fn cmd_delete(store: &BookStore, id: &str) -> Result<()> {
    match store.delete(id) {
        Ok(()) => {
            println!("Deleted {id}");
            Ok(())
        }
        Err(CatalogError::NotFound { .. }) => {
            anyhow::bail!("No book with id {id}")
        }
        Err(e) => Err(e.into()),
    }
}

fn cmd_export(store: &BookStore, output: PathBuf) -> Result<()> {
    let books = store.list_all()?;
    write_csv(&books, &output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Exported {} book(s) to {}", books.len(), output.display());
    Ok(())
}

fn cmd_import(store: &BookStore, path: PathBuf) -> Result<()> {
    let added = import_csv(store, &path)
        .with_context(|| format!("failed to import {}", path.display()))?;

    println!("Imported {} book(s) from {}", added.len(), path.display());
    Ok(())
}

fn cmd_stats(store: &BookStore) -> Result<()> {
    let books = store.list_all()?;
    let totals = summary(&books);

    println!("Total Books:   {}", totals.total);
    println!("Unique Genres: {}", totals.unique_genres);
    println!();
    println!("Books by Genre");
    for line in render_bar_chart(&count_by_genre(&books), BAR_WIDTH) {
        println!("{line}");
    }

    Ok(())
}

fn cmd_genres(store: &BookStore) -> Result<()> {
    for option in genre_options(&store.list_all()?) {
        println!("{option}");
    }
    Ok(())
}

/// One line per genre, largest first; bars scale so the largest count fills
/// `width` cells.
fn render_bar_chart(counts: &GenreCounts, width: usize) -> Vec<String> {
    let ranked = counts.ranked();
    let max = ranked.first().map(|entry| entry.count).unwrap_or(0);
    if max == 0 {
        return vec!["(no books yet)".to_string()];
    }

    ranked
        .iter()
        .map(|entry| {
            let len = (entry.count * width).div_ceil(max);
            format!(
                "{:<11} {} {}",
                entry.genre.as_str(),
                "█".repeat(len),
                entry.count
            )
        })
        .collect()
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
