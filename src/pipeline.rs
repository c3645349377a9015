use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::args::Args;
use crate::discover::{self, StageTag};
use crate::export::{self, ExportParser};
use crate::links::{self, Platform};
use crate::model::{DiffResult, NormalizedLists, RunSummary};
use crate::opener::{open_in_batches, LinkOpener};
use crate::prompt::Checkpoint;
use crate::utils::{self, format_number};

pub fn run_follow_audit(
    args: &Args,
    checkpoint: &dyn Checkpoint,
    opener: &dyn LinkOpener,
) -> Result<RunSummary> {
    let total_start_time = Instant::now();
    info!(action = "start", component = "pipeline", "Starting follow-back audit");

    let platform = links::resolve_platform(&args.platform)?;
    let input = resolve_input(args)?;

    let lists = stage_normalize(&input, &platform)?;
    println!("Stage 1 Complete ✅");
    println!(
        "Followers count: {}",
        format_number(lists.followers.len() as u32)
    );
    println!(
        "Following count: {}",
        format_number(lists.following.len() as u32)
    );
    checkpoint.wait("Press Enter to continue to Stage 2 (Comparing)...")?;

    // Stage 2 works from the in-memory lists, not a re-parse of the artifact.
    let diff = stage_diff(&input, &lists)?;
    println!("Stage 2 Complete ✅");
    println!(
        "Users not following back: {}",
        format_number(diff.not_following_back.len() as u32)
    );
    checkpoint.wait("Press Enter to continue to Stage 3 (Finalising)...")?;

    stage_links(&input, &platform)?;
    println!("Stage 3 Complete ✅");
    println!("All usernames converted to {} profile links.", platform.name);
    checkpoint.wait("Press Enter to continue to Stage 4 (Open Links)...")?;

    let (links_opened, batches) = match stage_open(&input, args.batch_size, opener, checkpoint)? {
        Some((links_opened, batches)) => {
            println!("\nStage 4 Complete ✅ All links opened.");
            (links_opened, batches)
        }
        None => (0, 0),
    };

    info!(
        action = "complete",
        component = "pipeline",
        duration_ms = total_start_time.elapsed().as_millis(),
        "Follow-back audit completed"
    );

    Ok(RunSummary {
        platform: platform.name.to_string(),
        followers: lists.followers.len(),
        following: lists.following.len(),
        not_following_back: diff.not_following_back.len(),
        links_opened,
        batches,
    })
}

fn resolve_input(args: &Args) -> Result<PathBuf> {
    match &args.input {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Export file not found at {:?}", path);
            }
            Ok(path.clone())
        }
        None => discover::find_export_file(Path::new(".")),
    }
}

fn stage_normalize(input: &Path, platform: &Platform) -> Result<NormalizedLists> {
    let start_time = Instant::now();
    info!(action = "start", component = "normalize", input = ?input, "Stage 1: parsing export");

    let raw = fs::read_to_string(input)
        .with_context(|| format!("Failed to read export file {:?}", input))?;

    let parser = ExportParser::new(platform)?;
    let lists = parser.parse(&raw)?;

    let artifact = discover::stage_path(input, StageTag::Normalized);
    export::write_canonical(&artifact, &lists)
        .with_context(|| format!("Failed to write normalized lists to {:?}", artifact))?;

    info!(
        action = "complete",
        component = "normalize",
        artifact = ?artifact,
        followers = lists.followers.len(),
        following = lists.following.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Stage 1 finished"
    );
    Ok(lists)
}

fn stage_diff(input: &Path, lists: &NormalizedLists) -> Result<DiffResult> {
    let start_time = Instant::now();
    info!(action = "start", component = "diff", "Stage 2: comparing lists");

    let diff = lists.not_following_back();

    let artifact = discover::stage_path(input, StageTag::NotFollowing);
    utils::write_lines(&artifact, &diff.not_following_back)
        .with_context(|| format!("Failed to write comparison result to {:?}", artifact))?;

    info!(
        action = "complete",
        component = "diff",
        artifact = ?artifact,
        not_following_back = diff.not_following_back.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Stage 2 finished"
    );
    Ok(diff)
}

fn stage_links(input: &Path, platform: &Platform) -> Result<()> {
    let start_time = Instant::now();
    info!(action = "start", component = "link_builder", "Stage 3: building profile links");

    let source = discover::stage_path(input, StageTag::NotFollowing);
    let usernames = utils::read_lines(&source)
        .with_context(|| format!("Failed to read usernames from {:?}", source))?;

    let link_list = links::build_links(platform, &usernames)?;

    let artifact = discover::stage_path(input, StageTag::Links);
    utils::write_lines(&artifact, &link_list.links)
        .with_context(|| format!("Failed to write profile links to {:?}", artifact))?;

    info!(
        action = "complete",
        component = "link_builder",
        artifact = ?artifact,
        links = link_list.links.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Stage 3 finished"
    );
    Ok(())
}

// None means the links artifact vanished and the stage was skipped.
fn stage_open(
    input: &Path,
    batch_size: usize,
    opener: &dyn LinkOpener,
    checkpoint: &dyn Checkpoint,
) -> Result<Option<(usize, usize)>> {
    info!(action = "start", component = "batch_opener", "Stage 4: opening links");

    let source = discover::stage_path(input, StageTag::Links);
    let links = match utils::read_lines(&source) {
        Ok(links) => links,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            println!("File '{}' not found.", source.display());
            return Ok(None);
        }
        Err(e) => {
            return Err(anyhow::Error::from(e)
                .context(format!("Failed to read profile links from {:?}", source)));
        }
    };

    let batches = open_in_batches(&links, batch_size, opener, checkpoint)?;
    Ok(Some((links.len(), batches)))
}

pub fn print_run_summary(summary: &RunSummary) {
    println!("\n--- {} Follow-Back Check ---", summary.platform);
    println!("Followers: {}", format_number(summary.followers as u32));
    println!("Following: {}", format_number(summary.following as u32));
    println!(
        "Not following back: {}",
        format_number(summary.not_following_back as u32)
    );
    println!(
        "Links opened: {} ({} batches)",
        format_number(summary.links_opened as u32),
        format_number(summary.batches as u32)
    );
}
