use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::prompt::Checkpoint;

pub trait LinkOpener {
    fn open_link(&self, url: &str) -> Result<()>;
}

pub struct BrowserOpener;

impl LinkOpener for BrowserOpener {
    fn open_link(&self, url: &str) -> Result<()> {
        webbrowser::open(url)
            .with_context(|| format!("Failed to open '{url}' in the default browser"))
    }
}

pub struct PrintOpener;

impl LinkOpener for PrintOpener {
    fn open_link(&self, url: &str) -> Result<()> {
        println!("{url}");
        Ok(())
    }
}

pub fn open_in_batches(
    links: &[String],
    batch_size: usize,
    opener: &dyn LinkOpener,
    checkpoint: &dyn Checkpoint,
) -> Result<usize> {
    if batch_size == 0 {
        anyhow::bail!("Batch size must be greater than 0");
    }

    let mut batches = 0;
    for (index, batch) in links.chunks(batch_size).enumerate() {
        if index > 0 {
            checkpoint.wait("Press Enter to open the next batch...")?;
        }

        println!("\nOpening batch {} ({} links)...", index + 1, batch.len());
        info!(
            action = "open",
            component = "batch_opener",
            batch = index + 1,
            links = batch.len(),
            "Opening batch"
        );

        for link in batch {
            // Fire-and-forget: a failed open is logged, never retried.
            if let Err(e) = opener.open_link(link) {
                warn!(action = "open", component = "batch_opener", link = link.as_str(), error = %e, "Failed to open link");
            }
        }
        batches += 1;
    }

    Ok(batches)
}
