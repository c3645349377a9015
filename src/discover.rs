use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageTag {
    Normalized,
    NotFollowing,
    Links,
}

impl StageTag {
    pub const ALL: [StageTag; 3] = [StageTag::Normalized, StageTag::NotFollowing, StageTag::Links];

    pub fn as_str(self) -> &'static str {
        match self {
            StageTag::Normalized => "normalized",
            StageTag::NotFollowing => "notfollowing",
            StageTag::Links => "links",
        }
    }
}

pub fn stage_path(input: &Path, tag: StageTag) -> PathBuf {
    input.with_extension(format!("{}.txt", tag.as_str()))
}

fn is_stage_artifact(file_name: &str) -> bool {
    StageTag::ALL
        .iter()
        .any(|tag| file_name.ends_with(&format!(".{}.txt", tag.as_str())))
}

pub fn find_export_file(dir: &Path) -> Result<PathBuf> {
    info!(action = "scan", component = "discovery", dir = ?dir, "Scanning for a followers/following export");

    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let path = entry.path();
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };

        if path.extension().and_then(|e| e.to_str()) == Some("txt") && !is_stage_artifact(&name) {
            candidates.push(path);
        }
    }
    candidates.sort();

    if candidates.is_empty() {
        anyhow::bail!("No .txt file found in the current directory.");
    }

    if candidates.len() > 1 {
        warn!(action = "ambiguous", component = "discovery", files = ?candidates, "More than one candidate export file");
        anyhow::bail!("Multiple .txt files found. Please ensure only one .txt file is present.");
    }

    let found = candidates.remove(0);
    info!(action = "found", component = "discovery", file = ?found, "Export file located");
    Ok(found)
}
