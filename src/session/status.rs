//! session::status
//!
//! The status classifier. Raw per-file states from the backend are grouped
//! into the four [`StatusCategory`] buckets; each path lands in at most one.
//!
//! Queries through the session (`status`, `alterations`,
//! `files_with_status`, `file_with_status`) record the full classification
//! as the session's snapshot, even when the query itself is filtered.
//! [`Session::altered`] compares a fresh classification against that
//! snapshot.

use std::collections::BTreeMap;

use serde::Serialize;

use super::Session;
use crate::core::types::{RawStatus, StatusCategory};
use crate::git::{Backend, GitError, Repository};

/// Paths grouped by status category, in [`StatusCategory::ALL`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Classification(BTreeMap<StatusCategory, Vec<String>>);

impl Classification {
    /// Group `raw` states. With a filter only that key is present, otherwise
    /// all four keys are, empty or not.
    pub fn classify(raw: &[(String, RawStatus)], filter: Option<StatusCategory>) -> Self {
        let mut buckets: BTreeMap<StatusCategory, Vec<String>> = StatusCategory::ALL
            .into_iter()
            .filter(|c| filter.is_none_or(|f| f == *c))
            .map(|c| (c, Vec::new()))
            .collect();

        for (path, state) in raw {
            if let Some(files) = state.category().and_then(|c| buckets.get_mut(&c)) {
                files.push(path.clone());
            }
        }
        Classification(buckets)
    }

    /// Keep only `category`.
    pub fn only(&self, category: StatusCategory) -> Self {
        Classification(
            self.0
                .iter()
                .filter(|(c, _)| **c == category)
                .map(|(c, files)| (*c, files.clone()))
                .collect(),
        )
    }

    /// Drop categories without files.
    pub fn without_empty(self) -> Self {
        Classification(
            self.0
                .into_iter()
                .filter(|(_, files)| !files.is_empty())
                .collect(),
        )
    }

    /// Files of one category; empty when the key is absent.
    pub fn files(&self, category: StatusCategory) -> &[String] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn categories(&self) -> impl Iterator<Item = StatusCategory> + '_ {
        self.0.keys().copied()
    }

    /// Every `(category, path)` pair.
    pub fn entries(&self) -> impl Iterator<Item = (StatusCategory, &str)> + '_ {
        self.0
            .iter()
            .flat_map(|(c, files)| files.iter().map(move |f| (*c, f.as_str())))
    }

    /// True when no category holds a file.
    pub fn is_clean(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// Number of keys present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<B: Backend> Session<B> {
    fn classify(&self) -> Result<Classification, GitError> {
        let raw = self.layer()?.status()?;
        Ok(Classification::classify(&raw, None))
    }

    /// Classify the working tree and record the snapshot.
    pub fn status(&mut self, filter: Option<StatusCategory>) -> Result<Classification, GitError> {
        let full = self.classify()?;
        let result = match filter {
            Some(category) => full.only(category),
            None => full.clone(),
        };
        self.snapshot = Some(full);
        Ok(result)
    }

    /// Like [`Session::status`], without the empty categories.
    pub fn alterations(
        &mut self,
        filter: Option<StatusCategory>,
    ) -> Result<Classification, GitError> {
        Ok(self.status(filter)?.without_empty())
    }

    pub fn files_with_status(&mut self, category: StatusCategory) -> Result<Vec<String>, GitError> {
        Ok(self.status(Some(category))?.files(category).to_vec())
    }

    pub fn file_with_status(
        &mut self,
        path: &str,
        category: StatusCategory,
    ) -> Result<bool, GitError> {
        Ok(self.files_with_status(category)?.iter().any(|f| f == path))
    }

    /// Whether the working tree changed since the last recorded snapshot.
    /// Always true when no snapshot was taken.
    pub fn altered(&self) -> Result<bool, GitError> {
        let fresh = self.classify()?;
        Ok(self.snapshot.as_ref() != Some(&fresh))
    }

    /// The last recorded classification.
    pub fn snapshot(&self) -> Option<&Classification> {
        self.snapshot.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::covered_session;
    use StatusCategory::*;

    fn raw(entries: &[(&str, &str)]) -> Vec<(String, RawStatus)> {
        entries
            .iter()
            .map(|(p, c)| (p.to_string(), RawStatus::from_porcelain(c).unwrap()))
            .collect()
    }

    mod classify {
        use super::*;

        #[test]
        fn unfiltered_has_all_four_keys() {
            let c = Classification::classify(&[], None);
            assert_eq!(c.categories().collect::<Vec<_>>(), StatusCategory::ALL.to_vec());
            assert!(c.is_clean());
        }

        #[test]
        fn filtered_has_one_key() {
            let c = Classification::classify(&raw(&[("a", "??"), ("b", " M")]), Some(Untracked));
            assert_eq!(c.len(), 1);
            assert_eq!(c.files(Untracked), ["a"]);
            assert!(c.files(Changed).is_empty());
        }

        #[test]
        fn each_path_in_one_category() {
            let c = Classification::classify(
                &raw(&[
                    ("staged-new", "A "),
                    ("staged-new-then-edited", "AM"),
                    ("removed", "D "),
                    ("missing", " D"),
                    ("edited", " M"),
                    ("staged-edit", "M "),
                    ("fresh", "??"),
                    ("clean", "  "),
                ]),
                None,
            );
            assert_eq!(c.files(Added), ["staged-new", "staged-new-then-edited"]);
            assert_eq!(c.files(Deleted), ["removed", "missing"]);
            assert_eq!(c.files(Changed), ["edited", "staged-edit"]);
            assert_eq!(c.files(Untracked), ["fresh"]);
            assert_eq!(c.entries().count(), 7);
        }

        #[test]
        fn without_empty_drops_keys() {
            let c = Classification::classify(&raw(&[("a", " M")]), None).without_empty();
            assert_eq!(c.categories().collect::<Vec<_>>(), vec![Changed]);
        }

        #[test]
        fn serializes_as_lowercase_map() {
            let c = Classification::classify(&raw(&[("a", "??")]), None);
            let json = serde_json::to_string(&c).unwrap();
            assert_eq!(
                json,
                r#"{"changed":[],"added":[],"deleted":[],"untracked":["a"]}"#
            );
        }
    }

    mod queries {
        use super::*;

        #[test]
        fn modified_and_untracked_scenario() {
            let (_dir, _backend, repo, mut session) = covered_session();
            repo.with_status([("README.md", " M"), ("notes.txt", "??")]);

            let status = session.status(None).unwrap();
            let expected: Vec<(StatusCategory, Vec<String>)> = vec![
                (Changed, vec!["README.md".to_string()]),
                (Added, vec![]),
                (Deleted, vec![]),
                (Untracked, vec!["notes.txt".to_string()]),
            ];
            let actual: Vec<(StatusCategory, Vec<String>)> = status
                .categories()
                .map(|c| (c, status.files(c).to_vec()))
                .collect();
            assert_eq!(actual, expected);
        }

        #[test]
        fn alterations_and_file_queries() {
            let (_dir, _backend, repo, mut session) = covered_session();
            repo.with_status([("README.md", " M"), ("notes.txt", "??")]);

            let alterations = session.alterations(None).unwrap();
            assert_eq!(alterations.categories().collect::<Vec<_>>(), vec![Changed, Untracked]);
            assert!(session.alterations(Some(Added)).unwrap().is_empty());

            assert_eq!(session.files_with_status(Untracked).unwrap(), vec!["notes.txt"]);
            assert!(session.file_with_status("README.md", Changed).unwrap());
            assert!(!session.file_with_status("README.md", Untracked).unwrap());
        }

        #[test]
        fn snapshot_starts_empty_and_altered_is_true() {
            let (_dir, _backend, _repo, session) = covered_session();
            assert!(session.snapshot().is_none());
            assert!(session.altered().unwrap());
        }

        #[test]
        fn altered_detects_external_change() {
            let (_dir, _backend, repo, mut session) = covered_session();
            repo.with_status([("README.md", " M")]);

            session.status(None).unwrap();
            assert!(!session.altered().unwrap());

            repo.with_status([("README.md", " M"), ("new.txt", "??")]);
            assert!(session.altered().unwrap());
        }

        #[test]
        fn filtered_query_still_records_full_snapshot() {
            let (_dir, _backend, repo, mut session) = covered_session();
            repo.with_status([("README.md", " M"), ("notes.txt", "??")]);

            session.files_with_status(Untracked).unwrap();
            assert_eq!(session.snapshot().map(Classification::len), Some(4));
            assert!(!session.altered().unwrap());
        }

        #[test]
        fn reopening_clears_snapshot() {
            let (dir, _backend, _repo, mut session) = covered_session();
            session.status(None).unwrap();
            assert!(session.snapshot().is_some());

            session
                .cover(dir.path(), &crate::session::CoverOptions::default())
                .unwrap();
            assert!(session.snapshot().is_none());
        }
    }
}
