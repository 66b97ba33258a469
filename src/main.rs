use std::io::{self, ErrorKind};
use std::sync::Arc;

use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use shelfdl::config::DownloaderConfig;
use shelfdl::download::BatchDownloader;
use shelfdl::links::read_link_list;
use shelfdl::logging::init_tracing;
use shelfdl::prompt::ask_or_default;
use shelfdl::report::{Level, LineReporter};
use shelfdl::{record, Error, Result, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_DIR, DOWNLOAD_LOG_FILE};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let (input_file, output_dir) = {
        let mut stdin = io::stdin().lock();
        let mut stdout = io::stdout();
        let input_file = ask_or_default(
            &mut stdin,
            &mut stdout,
            &format!("Enter input file name (default: {DEFAULT_INPUT_FILE}): "),
            DEFAULT_INPUT_FILE,
        )?;
        let output_dir = ask_or_default(
            &mut stdin,
            &mut stdout,
            &format!("Enter output directory (default: {DEFAULT_OUTPUT_DIR}): "),
            DEFAULT_OUTPUT_DIR,
        )?;
        (input_file, output_dir)
    };

    let links = match read_link_list(&input_file).await {
        Ok(links) => links,
        Err(Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
            println!("{input_file} not found!");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let reporter = Arc::new(LineReporter::append_to(DOWNLOAD_LOG_FILE)?);
    let start_time = Local::now();
    let downloader = BatchDownloader::new(DownloaderConfig::new(output_dir), reporter.clone()).await?;

    // Ctrl-C stops handing out links; whatever is in flight gets dropped.
    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let progress_bar = ProgressBar::new(links.len() as u64);
    progress_bar.set_style(
        ProgressStyle::with_template("Downloading files {bar:40} {pos}/{len} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let summary = downloader
        .download_all(links, &cancel, |progress| {
            progress_bar.set_position(progress.completed as u64)
        })
        .await?;
    progress_bar.finish();

    println!("\n{summary}");
    record!(reporter, Level::INFO, start_time, "Full program time:");

    Ok(())
}
