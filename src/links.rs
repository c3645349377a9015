use anyhow::{Context, Result};
use tracing::info;
use url::Url;

use crate::model::LinkList;

#[derive(Debug, Clone)]
pub struct Platform {
    pub name: &'static str,
    profile_base: Url,
}

impl Platform {
    pub fn profile_url(&self, username: &str) -> Result<String> {
        let link = format!("{}{}/", self.profile_base, username);
        Url::parse(&link).with_context(|| format!("Invalid profile link for '{username}'"))?;
        Ok(link)
    }
}

pub fn resolve_platform(name: &str) -> Result<Platform> {
    let (display_name, base) = match name.to_lowercase().as_str() {
        "instagram" => ("Instagram", "https://www.instagram.com/"),
        "twitter" | "x" => ("X", "https://x.com/"),
        _ => anyhow::bail!("Unsupported platform '{}'", name),
    };

    let profile_base = Url::parse(base)?;
    info!(action = "resolve", component = "link_builder", platform = display_name, base = %profile_base, "Platform resolved");

    Ok(Platform {
        name: display_name,
        profile_base,
    })
}

pub fn build_links(platform: &Platform, usernames: &[String]) -> Result<LinkList> {
    let links = usernames
        .iter()
        .map(|username| platform.profile_url(username))
        .collect::<Result<Vec<_>>>()?;

    Ok(LinkList { links })
}
