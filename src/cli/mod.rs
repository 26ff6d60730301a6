//! Command-line interface for audioshelf.
//!
//! Provides commands for browsing and searching the catalog, catalog
//! statistics, series completion and the resolved configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use crate::config::{self, ResolvedConfig};
use crate::core::{
    aggregate_with_top, analyze_series_completion, CatalogView, SeriesCompletion, SeriesFilter,
    Statistics, ViewQuery,
};
use crate::domain::{Book, PageSize, SortDirection, SortField, ViewMode};
use crate::library::{CatalogSource, CsvCatalogSource, JsonFilePreferences, ViewPreferences};

/// audioshelf - Browse and analyze an audiobook catalog
#[derive(Parser, Debug)]
#[command(name = "audioshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog CSV (overrides the configured catalog)
    #[arg(long, global = true, env = "AUDIOSHELF_CATALOG")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the catalog one page at a time
    List {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Search title, author, narrator, series and genre
    Search {
        /// Search terms (every term must match)
        #[arg(required = true)]
        query: Vec<String>,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Show catalog statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show series completion
    Series {
        /// Which series to show (all, complete, incomplete, gaps)
        #[arg(short, long, default_value = "all")]
        filter: SeriesFilter,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Listing flags shared by `list` and `search`
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Sort field (title, author, year, duration, series)
    #[arg(short, long)]
    pub sort: Option<SortField>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Items per page, or "all"
    #[arg(short = 'n', long)]
    pub page_size: Option<PageSize>,

    /// Page to show (1-based, clamped)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Layout (cards, table)
    #[arg(long)]
    pub view: Option<ViewMode>,

    /// Remember sort, page size and layout for next time
    #[arg(long)]
    pub save: bool,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

impl ViewArgs {
    /// Overlay flags on top of stored preferences
    pub fn apply(&self, prefs: ViewPreferences) -> ViewPreferences {
        let mut prefs = prefs;
        if let Some(field) = self.sort {
            prefs.sort.field = field;
            prefs.sort.direction = SortDirection::Asc;
        }
        if self.desc {
            prefs.sort.direction = SortDirection::Desc;
        }
        if let Some(page_size) = self.page_size {
            prefs.page_size = page_size;
        }
        if let Some(view_mode) = self.view {
            prefs.view_mode = view_mode;
        }
        prefs
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let cfg = config::config()?;
        let catalog_path = self.catalog.unwrap_or_else(|| cfg.catalog.clone());

        match self.command {
            Commands::List { view } => list_books(cfg, &catalog_path, "", &view).await,
            Commands::Search { query, view } => {
                list_books(cfg, &catalog_path, &query.join(" "), &view).await
            }
            Commands::Stats { json } => show_stats(cfg, &catalog_path, json).await,
            Commands::Series { filter, json } => show_series(cfg, &catalog_path, filter, json).await,
            Commands::Config => show_config(cfg, &catalog_path),
        }
    }
}

async fn load_catalog(path: &Path) -> Result<Vec<Book>> {
    let source = CsvCatalogSource::new(path);
    debug!(source = source.name(), path = %path.display(), "Loading catalog");
    source
        .load()
        .await
        .with_context(|| format!("Failed to load catalog from {}", path.display()))
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

/// "16h 10m" style duration
fn format_minutes(minutes: u32) -> String {
    if minutes == 0 {
        return "-".to_string();
    }
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

/// List or search the catalog
async fn list_books(
    cfg: &ResolvedConfig,
    catalog_path: &Path,
    query: &str,
    args: &ViewArgs,
) -> Result<()> {
    let mut store = JsonFilePreferences::open(cfg.preferences_path())?;
    let prefs = args.apply(ViewPreferences::load(&store, cfg.view)?);

    if args.save {
        prefs.save(&mut store)?;
        info!(path = %store.path().display(), "Saved view preferences");
    }

    let books = load_catalog(catalog_path).await?;
    let view_query = ViewQuery::new(prefs.sort, prefs.page_size)
        .with_search(query)
        .with_page(args.page);
    let view = CatalogView::build(&books, &view_query);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if view.matched == 0 {
        if query.trim().is_empty() {
            println!("Catalog is empty: {}", catalog_path.display());
        } else {
            println!("No results found for: {}", query);
        }
        return Ok(());
    }

    if !query.trim().is_empty() {
        println!("Found {} result(s) for \"{}\":\n", view.matched, query);
    }

    match prefs.view_mode {
        ViewMode::Table => print_table(view.items()),
        ViewMode::Cards => print_cards(view.items()),
    }

    let page = &view.page;
    if let Some((first, last)) = page.display_range() {
        println!(
            "\nShowing {}-{} of {} (page {}/{}, sorted by {} {})",
            first,
            last,
            view.matched,
            page.current_page,
            page.total_pages,
            prefs.sort.field,
            prefs.sort.direction.as_str()
        );
    }
    if view.matched != view.catalog_size {
        println!("Catalog total: {} books", view.catalog_size);
    }

    Ok(())
}

fn print_table(books: &[&Book]) {
    println!(
        "{:<5} {:<40} {:<24} {:<24} {:<6} {:>8}",
        "ID", "TITLE", "AUTHOR", "SERIES", "YEAR", "LENGTH"
    );
    println!("{}", "-".repeat(112));

    for book in books {
        let series = match book.series_key() {
            Some(name) if !book.series_index.is_empty() => {
                format!("{} #{}", name, book.series_index)
            }
            Some(name) => name.to_string(),
            None => String::new(),
        };
        println!(
            "{:<5} {:<40} {:<24} {:<24} {:<6} {:>8}",
            book.id,
            truncate(&book.title, 40),
            truncate(&book.author, 24),
            truncate(&series, 24),
            truncate(&book.year, 6),
            format_minutes(book.duration_minutes)
        );
    }
}

fn print_cards(books: &[&Book]) {
    for book in books {
        println!("{}", book.title);
        if !book.author.is_empty() {
            println!("  by {}", book.author);
        }
        if !book.narrator.is_empty() {
            println!("  narrated by {}", book.narrator);
        }
        if let Some(series) = book.series_key() {
            if book.series_index.is_empty() {
                println!("  {}", series);
            } else {
                println!("  {} #{}", series, book.series_index);
            }
        }

        let details: Vec<String> = [
            book.year.clone(),
            book.genre.clone(),
            if book.duration_minutes > 0 {
                format_minutes(book.duration_minutes)
            } else {
                String::new()
            },
        ]
        .into_iter()
        .filter(|d| !d.is_empty())
        .collect();
        if !details.is_empty() {
            println!("  {}", details.join(" · "));
        }
        println!();
    }
}

/// Show catalog statistics
async fn show_stats(cfg: &ResolvedConfig, catalog_path: &Path, json: bool) -> Result<()> {
    let books = load_catalog(catalog_path).await?;
    let stats = aggregate_with_top(&books, cfg.top_n);

    if json {
        let payload = serde_json::json!({
            "generated_at": Local::now().to_rfc3339(),
            "statistics": stats,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    print_stats(&stats);
    println!("\nGenerated: {}", Local::now().format("%Y-%m-%d %H:%M"));
    Ok(())
}

fn print_ranked(title: &str, entries: &[crate::core::stats::RankedEntry]) {
    if entries.is_empty() {
        return;
    }
    println!("\n{}:", title);
    for (i, entry) in entries.iter().enumerate() {
        println!("  {:>2}. {:<40} {:>5}", i + 1, truncate(&entry.name, 40), entry.count);
    }
}

fn print_stats(stats: &Statistics) {
    println!("Library Statistics");
    println!("{}", "=".repeat(60));
    println!("  Books:           {}", stats.total_books);
    println!(
        "  Total length:    {} hours ({})",
        stats.total_hours,
        stats.listening_time.summary()
    );
    println!(
        "  Average length:  {} ({:.1} hours)",
        format_minutes(stats.average_duration_minutes as u32),
        stats.average_duration_hours
    );
    println!("  Years:           {}", stats.year_range);
    println!(
        "  Unique:          {} authors, {} narrators, {} series, {} genres",
        stats.unique_authors, stats.unique_narrators, stats.unique_series, stats.unique_genres
    );

    println!("\nBy length:");
    for bucket in &stats.duration_categories {
        println!(
            "  {:<12} {:>5}  ({:.1}%)",
            bucket.category.label(),
            bucket.count,
            bucket.percentage
        );
    }

    print_ranked("Top authors", &stats.top_authors);
    print_ranked("Top narrators", &stats.top_narrators);
    print_ranked("Top series", &stats.top_series);
    print_ranked("Top genres", &stats.top_genres);
    print_ranked("Top years", &stats.top_years);

    let insights = &stats.insights;
    println!("\nInsights:");
    println!("  Books per author:    {:.1}", insights.books_per_author);
    println!("  Books per narrator:  {:.1}", insights.books_per_narrator);
    println!("  Series share:        {:.1}%", insights.series_percentage);
    println!("  Books per series:    {:.1}", insights.avg_books_per_series);
}

/// Show series completion
async fn show_series(
    cfg: &ResolvedConfig,
    catalog_path: &Path,
    filter: SeriesFilter,
    json: bool,
) -> Result<()> {
    let books = load_catalog(catalog_path).await?;
    let report = analyze_series_completion(&books, &cfg.series);
    let shown = report.filtered(filter);

    if json {
        let payload = serde_json::json!({
            "generated_at": Local::now().to_rfc3339(),
            "total_series": report.total_series,
            "complete_series": report.complete_series,
            "incomplete_series": report.incomplete_series,
            "standalone_books": report.standalone_books,
            "total_books": report.total_books,
            "series": shown,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if shown.is_empty() {
        println!("No series match filter: {:?}", filter);
        return Ok(());
    }

    println!(
        "{:<36} {:<22} {:>5} {:>7}  {:<16} {}",
        "SERIES", "AUTHOR", "BOOKS", "DONE", "STATUS", "MISSING"
    );
    println!("{}", "-".repeat(110));

    for series in &shown {
        println!(
            "{:<36} {:<22} {:>5} {:>7}  {:<16} {}",
            truncate(&series.name, 36),
            truncate(&series.author, 22),
            series.book_count,
            series
                .completion_pct
                .map_or_else(|| "-".to_string(), |pct| format!("{:.1}%", pct)),
            series.status.label(),
            format_gaps(series)
        );
    }

    println!(
        "\nSeries: {} ({} complete, {} incomplete), standalone books: {}, total books: {}",
        report.total_series,
        report.complete_series,
        report.incomplete_series,
        report.standalone_books,
        report.total_books
    );

    Ok(())
}

/// "3-4, 7" style list of missing positions
fn format_gaps(series: &SeriesCompletion) -> String {
    series
        .gap_ranges()
        .into_iter()
        .map(|(start, end)| {
            if start == end {
                start.to_string()
            } else {
                format!("{}-{}", start, end)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Show the resolved configuration (for debugging)
fn show_config(cfg: &ResolvedConfig, catalog_path: &Path) -> Result<()> {
    println!("Audioshelf Configuration");
    println!("{}", "=".repeat(60));
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:         {}", cfg.home.display());
    println!("  Catalog:      {}", catalog_path.display());
    println!("  Preferences:  {}", cfg.preferences_path().display());
    println!();
    println!("View defaults:");
    println!("  Sort:       {} {}", cfg.view.sort.field, cfg.view.sort.direction.as_str());
    println!("  Page size:  {}", cfg.view.page_size);
    println!("  Layout:     {}", cfg.view.view_mode);
    println!();
    println!("Series thresholds:");
    println!("  Mostly complete:  >= {}% or <= {} missing", cfg.series.mostly_complete_pct, cfg.series.mostly_complete_max_missing);
    println!("  In progress:      >= {}%", cfg.series.in_progress_pct);
    println!("  Max position:     {}", cfg.series.max_position);
    println!();
    println!("Statistics:");
    println!("  Top-N lists:  {}", cfg.top_n);

    Ok(())
}
