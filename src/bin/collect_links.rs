use std::io;
use std::sync::Arc;

use shelfdl::collect::LinkCollector;
use shelfdl::config::CollectorConfig;
use shelfdl::links::{link_list_filename, write_link_list};
use shelfdl::logging::init_tracing;
use shelfdl::prompt::{ask, ask_page_count};
use shelfdl::report::LineReporter;
use shelfdl::{Result, DEFAULT_NUM_PAGES};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let (search_term, num_pages) = {
        let mut stdin = io::stdin().lock();
        let mut stdout = io::stdout();
        let search_term = ask(&mut stdin, &mut stdout, "Enter search term: ")?;
        let num_pages = ask_page_count(
            &mut stdin,
            &mut stdout,
            &format!("Enter number of pages to search (default {DEFAULT_NUM_PAGES}): "),
            DEFAULT_NUM_PAGES,
        )?;
        (search_term, num_pages)
    };

    let collector = LinkCollector::new(CollectorConfig::default(), Arc::new(LineReporter::stderr()))?;
    let download_links = collector.search(&search_term, num_pages).await?;

    let filename = link_list_filename(&search_term);
    write_link_list(&filename, &download_links).await?;
    println!(
        "\nDownload links saved to {filename}. Total: {}",
        download_links.len()
    );

    Ok(())
}
