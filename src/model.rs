use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLists {
    pub followers: Vec<String>,
    pub following: Vec<String>,
}

impl NormalizedLists {
    pub fn not_following_back(&self) -> DiffResult {
        let followers: BTreeSet<&str> = self.followers.iter().map(String::as_str).collect();

        let not_following_back: BTreeSet<String> = self
            .following
            .iter()
            .filter(|name| !followers.contains(name.as_str()))
            .cloned()
            .collect();

        DiffResult {
            not_following_back: not_following_back.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffResult {
    pub not_following_back: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkList {
    pub links: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub platform: String,
    pub followers: usize,
    pub following: usize,
    pub not_following_back: usize,
    pub links_opened: usize,
    pub batches: usize,
}
