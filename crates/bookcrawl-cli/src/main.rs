use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bookcrawl_core::CrawlConfig;
use bookcrawl_scraper::Crawler;
use bookcrawl_store::{read_summary, write_records, WriteMode};

#[derive(Debug, Parser)]
#[command(name = "bookcrawl")]
#[command(about = "Crawl a paginated book catalog and export records to CSV")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl catalog list pages and write the records to a CSV file.
    Crawl {
        /// Page index to start from.
        #[arg(long, default_value_t = 1)]
        start_page: u32,
        /// Number of pages to crawl; crawls until the catalog ends when
        /// omitted.
        #[arg(long)]
        pages: Option<u32>,
        /// Destination CSV file.
        #[arg(long, default_value = "books.csv")]
        out: PathBuf,
        /// Append beneath an existing file instead of overwriting it.
        #[arg(long)]
        append: bool,
    },
    /// Scrape detail pages linked from the first catalog page.
    Details {
        /// Maximum number of detail pages to scrape.
        #[arg(long, default_value_t = 10)]
        max: usize,
        /// Destination CSV file.
        #[arg(long, default_value = "book_details.csv")]
        out: PathBuf,
        /// Append beneath an existing file instead of overwriting it.
        #[arg(long)]
        append: bool,
    },
    /// Print a summary of a previously written CSV file.
    Summary {
        /// CSV file to summarize.
        #[arg(long, default_value = "books.csv")]
        file: PathBuf,
    },
}

fn write_mode(append: bool) -> WriteMode {
    if append {
        WriteMode::Append
    } else {
        WriteMode::Overwrite
    }
}

fn print_summary(path: &Path) {
    // A file that cannot be summarized is logged, not fatal.
    match read_summary(path) {
        Ok(summary) => print!("{summary}"),
        Err(err) => tracing::warn!(path = %path.display(), error = %err, "could not summarize file"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = CrawlConfig::from_env()?;

    match cli.command {
        Commands::Crawl {
            start_page,
            pages,
            out,
            append,
        } => {
            let crawler = Crawler::new(&config)?;
            let records = match pages {
                Some(pages) => crawler.crawl_pages(start_page, pages).await,
                None => crawler.crawl_all(start_page).await,
            };
            if records.is_empty() {
                println!("No records scraped.");
                return Ok(());
            }
            let written = write_records(&records, &out, write_mode(append))?;
            println!("Saved {written} records to {}", out.display());
            print_summary(&out);
        }
        Commands::Details { max, out, append } => {
            let crawler = Crawler::new(&config)?;
            let details = crawler.scrape_details(max).await?;
            if details.is_empty() {
                println!("No details scraped.");
                return Ok(());
            }
            let written = write_records(&details, &out, write_mode(append))?;
            println!("Saved {written} detail records to {}", out.display());
            print_summary(&out);
        }
        Commands::Summary { file } => print_summary(&file),
    }

    Ok(())
}
