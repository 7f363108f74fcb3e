//! Uploads the files given on the command line to a merge server.
//!
//! ```text
//! cargo run --example merge -- http://localhost:8000 cover.pdf scan.png
//! ```

use color_eyre::{eyre::eyre, Result};
use comfy_table::Table;
use mergeup::uploader::merge_endpoint;
use mergeup::{human_size, Attempt, FileSelection, TerminalView, UploaderBuilder};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let base = args
        .next()
        .ok_or_else(|| eyre!("usage: merge <server-url> <file>..."))?;
    let paths = args.collect::<Vec<_>>();

    let selection = FileSelection::from_paths(&paths)?;

    let mut table = Table::new();
    table.set_header(vec!["File", "Size", "Type"]);
    for file in selection.files() {
        table.add_row(vec![
            file.name.clone(),
            human_size(file.size),
            file.content_type().to_string(),
        ]);
    }
    println!("{table}");

    let mut uploader = UploaderBuilder::new()
        .endpoint(merge_endpoint(&base)?)
        .filename("merged.pdf")
        .build(Arc::new(TerminalView::default()))?;
    uploader.select(selection);

    match uploader.submit().await {
        Attempt::Completed(log) if log.is_error() => Err(eyre!(log.to_text())),
        Attempt::Completed(_) => {
            // Let the progress bar clear before exiting.
            tokio::time::sleep(uploader.config().hide_delay).await;
            Ok(())
        }
        Attempt::Rejected(notice) => Err(eyre!(notice)),
        Attempt::Busy => Ok(()),
    }
}
