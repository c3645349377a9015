use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "followee",
    about = "Find the accounts you follow that do not follow you back and open their profiles",
    version,
    long_about = None
)]
pub struct Args {
    /// Path to the followers/following export file (discovered in the current directory when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Platform whose profile links are generated
    #[arg(short, long, default_value = "instagram")]
    pub platform: String,

    /// Number of profile links to open per batch
    #[arg(short, long, default_value_t = 20)]
    pub batch_size: usize,

    /// Skip the confirmation pauses between stages and batches
    #[arg(short, long)]
    pub yes: bool,

    /// Print the profile links instead of opening a browser
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
