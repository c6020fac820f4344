// src/suite/list.rs

use std::collections::HashSet;

use crate::errors::{Result, SuiteRunError};

use super::SuiteDescriptor;

/// Ordered run list. Execution order is list order; ids are unique.
///
/// An empty list is valid and runs nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteList {
    suites: Vec<SuiteDescriptor>,
}

impl SuiteList {
    /// Build a list, rejecting duplicate ids.
    pub fn new(suites: Vec<SuiteDescriptor>) -> Result<Self> {
        let mut seen = HashSet::new();
        for suite in &suites {
            if !seen.insert(suite.id()) {
                return Err(SuiteRunError::DuplicateSuite(suite.id().to_string()));
            }
        }
        Ok(Self { suites })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.suites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SuiteDescriptor> {
        self.suites.iter()
    }

    pub fn get(&self, id: &str) -> Option<&SuiteDescriptor> {
        self.suites.iter().find(|s| s.id() == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.suites.iter().map(|s| s.id())
    }
}

impl<'a> IntoIterator for &'a SuiteList {
    type Item = &'a SuiteDescriptor;
    type IntoIter = std::slice::Iter<'a, SuiteDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.suites.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suite::Invocation;

    fn suite(id: &str) -> SuiteDescriptor {
        SuiteDescriptor::new(id, Invocation::interpreted("node", format!("{id}.mjs")))
    }

    #[test]
    fn keeps_insertion_order() {
        let list = SuiteList::new(vec![suite("c"), suite("a"), suite("b")]).unwrap();
        assert_eq!(list.ids().collect::<Vec<_>>(), vec!["c", "a", "b"]);
        assert_eq!(list.get("a").map(|s| s.id()), Some("a"));
        assert!(list.get("zzz").is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = SuiteList::new(vec![suite("a"), suite("b"), suite("a")]).unwrap_err();
        match err {
            SuiteRunError::DuplicateSuite(id) => assert_eq!(id, "a"),
            other => panic!("expected DuplicateSuite, got {other:?}"),
        }
    }

    #[test]
    fn empty_list_is_valid() {
        let list = SuiteList::new(Vec::new()).unwrap();
        assert!(list.is_empty());
        assert_eq!(list, SuiteList::empty());
    }
}
