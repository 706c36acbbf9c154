//! Deduplication of search candidates across queries and pages.

use std::collections::HashSet;

use super::CandidateFile;

/// Tracks which candidates a search session has already seen.
///
/// Identity is structural: two records are the same candidate only when
/// every field matches.
#[derive(Debug, Default)]
pub struct CandidateSet {
    seen: HashSet<CandidateFile>,
    ordered: Vec<CandidateFile>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate. Returns false if an identical one was already seen.
    pub fn insert(&mut self, file: CandidateFile) -> bool {
        if self.seen.contains(&file) {
            return false;
        }
        self.seen.insert(file.clone());
        self.ordered.push(file);
        true
    }

    /// Add many candidates, returning how many were new.
    pub fn extend(&mut self, files: impl IntoIterator<Item = CandidateFile>) -> usize {
        files.into_iter().filter(|f| self.insert(f.clone())).count()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Candidates in first-seen order.
    pub fn into_vec(self) -> Vec<CandidateFile> {
        self.ordered
    }
}

/// Remove structural duplicates, keeping the first occurrence of each.
pub fn deduplicate_candidates(files: Vec<CandidateFile>) -> Vec<CandidateFile> {
    let mut set = CandidateSet::new();
    set.extend(files);
    set.into_vec()
}
