use anyhow::Result;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use tracing::info;

use crate::links::Platform;
use crate::model::NormalizedLists;

const FOLLOWERS_MARKER: &str = "Followers";
const FOLLOWING_MARKER: &str = "Following";
const DESCRIPTIVE_BOILERPLATE: &str = "Profiles that you choose to see content from";
const DATE_LINE_PATTERN: &str = r"\b(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\b \d{1,2}, \d{4}";
const LIST_BLOCK_PATTERN: &str = r"(?s)\[(.*?)\]";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Could not find two complete lists in bracketed format.")]
    MissingListBlocks,

    #[error("unterminated string literal in bracketed list")]
    UnterminatedLiteral,

    #[error("unexpected character '{0}' in bracketed list")]
    UnexpectedCharacter(char),

    #[error("Could not find both 'Followers' and 'Following' headers.")]
    MissingMarkers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Bracketed,
    Legacy,
}

impl ExportFormat {
    pub fn detect(raw: &str) -> ExportFormat {
        if raw.trim_start().starts_with('[') {
            ExportFormat::Bracketed
        } else {
            ExportFormat::Legacy
        }
    }
}

pub struct ExportParser {
    platform_name: &'static str,
    date_line: Regex,
    list_block: Regex,
}

impl ExportParser {
    pub fn new(platform: &Platform) -> Result<Self> {
        Ok(Self {
            platform_name: platform.name,
            date_line: Regex::new(DATE_LINE_PATTERN)?,
            list_block: Regex::new(LIST_BLOCK_PATTERN)?,
        })
    }

    pub fn parse(&self, raw: &str) -> Result<NormalizedLists, ParseError> {
        let start_time = Instant::now();
        let format = ExportFormat::detect(raw);
        info!(action = "detect", component = "export_parser", format = ?format, "Export format detected");

        let lists = match format {
            ExportFormat::Bracketed => self.parse_bracketed(raw)?,
            ExportFormat::Legacy => self.parse_legacy(raw)?,
        };

        info!(
            action = "complete",
            component = "export_parser",
            followers = lists.followers.len(),
            following = lists.following.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Export parsed and normalized"
        );
        Ok(lists)
    }

    fn parse_bracketed(&self, raw: &str) -> Result<NormalizedLists, ParseError> {
        let blocks: Vec<&str> = self
            .list_block
            .captures_iter(raw)
            .filter_map(|captures| captures.get(1))
            .map(|block| block.as_str())
            .take(2)
            .collect();

        if blocks.len() < 2 {
            return Err(ParseError::MissingListBlocks);
        }

        Ok(NormalizedLists {
            followers: normalize(scan_items(blocks[0])?),
            following: normalize(scan_items(blocks[1])?),
        })
    }

    fn parse_legacy(&self, raw: &str) -> Result<NormalizedLists, ParseError> {
        let cleaned: Vec<&str> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| !line.eq_ignore_ascii_case(self.platform_name))
            .filter(|line| *line != DESCRIPTIVE_BOILERPLATE)
            .filter(|line| !self.date_line.is_match(line))
            .collect();

        let followers_start = cleaned
            .iter()
            .position(|line| *line == FOLLOWERS_MARKER)
            .ok_or(ParseError::MissingMarkers)?;
        let following_start = cleaned[followers_start + 1..]
            .iter()
            .position(|line| *line == FOLLOWING_MARKER)
            .map(|offset| followers_start + 1 + offset)
            .ok_or(ParseError::MissingMarkers)?;

        let followers = cleaned[followers_start + 1..following_start]
            .iter()
            .map(|line| line.to_string());
        let following = cleaned[following_start + 1..]
            .iter()
            .map(|line| line.to_string());

        Ok(NormalizedLists {
            followers: normalize(followers),
            following: normalize(following),
        })
    }
}

// Items are quoted literals separated by commas, possibly across lines.
fn scan_items(block: &str) -> Result<Vec<String>, ParseError> {
    let mut items = Vec::new();
    let mut chars = block.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() || c == ',' => {}
            quote @ ('\'' | '"') => {
                let mut item = String::new();
                loop {
                    match chars.next() {
                        None => return Err(ParseError::UnterminatedLiteral),
                        Some('\\') => match chars.next() {
                            None => return Err(ParseError::UnterminatedLiteral),
                            Some('n') => item.push('\n'),
                            Some('t') => item.push('\t'),
                            Some(escaped @ ('\\' | '\'' | '"')) => item.push(escaped),
                            Some(other) => {
                                item.push('\\');
                                item.push(other);
                            }
                        },
                        Some(c) if c == quote => break,
                        Some(c) => item.push(c),
                    }
                }
                items.push(item);
            }
            other => return Err(ParseError::UnexpectedCharacter(other)),
        }
    }

    Ok(items)
}

fn normalize<I: IntoIterator<Item = String>>(names: I) -> Vec<String> {
    let unique: BTreeSet<String> = names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    unique.into_iter().collect()
}

pub fn write_canonical(path: &Path, lists: &NormalizedLists) -> io::Result<()> {
    let mut content = String::new();
    content.push_str(FOLLOWERS_MARKER);
    content.push('\n');
    content.push_str(&lists.followers.join("\n"));
    content.push_str("\n\n");
    content.push_str(FOLLOWING_MARKER);
    content.push('\n');
    content.push_str(&lists.following.join("\n"));
    content.push('\n');
    fs::write(path, content)
}
