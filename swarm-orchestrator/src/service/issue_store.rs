//! Issue store
//!
//! Process-lifetime cache of the last issue listing fetched per repository.
//! Listings are replaced wholesale on every fetch; readers get an immutable
//! snapshot they can hold for as long as a batch runs.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use swarm_core::domain::issue::Issue;

/// Issues of one repository keyed by number
pub type RepoSnapshot = BTreeMap<u64, Issue>;

#[derive(Debug, Default)]
pub struct IssueStore {
    repos: RwLock<HashMap<String, Arc<RepoSnapshot>>>,
}

impl IssueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cached listing of `repo` and returns the new snapshot
    pub fn replace(&self, repo: &str, issues: Vec<Issue>) -> Arc<RepoSnapshot> {
        let snapshot: Arc<RepoSnapshot> = Arc::new(
            issues
                .into_iter()
                .map(|issue| (issue.number, issue))
                .collect(),
        );

        self.repos
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(repo.to_string(), Arc::clone(&snapshot));

        snapshot
    }

    pub fn snapshot(&self, repo: &str) -> Option<Arc<RepoSnapshot>> {
        self.repos
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(repo)
            .cloned()
    }

    pub fn get(&self, repo: &str, number: u64) -> Option<Issue> {
        self.snapshot(repo)?.get(&number).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{issue, pull_request};

    #[test]
    fn test_replace_and_lookup() {
        let store = IssueStore::new();
        store.replace("repo", vec![issue(3, "C"), pull_request(1, "A")]);

        assert_eq!(store.get("repo", 3).unwrap().title.as_deref(), Some("C"));
        assert!(store.get("repo", 1).unwrap().is_pull_request());
        assert!(store.get("repo", 2).is_none());
        assert!(store.get("other", 3).is_none());
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_refresh() {
        let store = IssueStore::new();
        store.replace("repo", vec![issue(1, "A")]);
        let before = store.snapshot("repo").unwrap();

        store.replace("repo", vec![issue(2, "B")]);

        assert!(before.contains_key(&1));
        assert!(!store.snapshot("repo").unwrap().contains_key(&1));
    }

    #[test]
    fn test_snapshot_is_ordered_by_number() {
        let store = IssueStore::new();
        let snapshot = store.replace("repo", vec![issue(5, "E"), issue(2, "B"), issue(9, "I")]);
        let numbers: Vec<u64> = snapshot.keys().copied().collect();
        assert_eq!(numbers, vec![2, 5, 9]);
    }
}
