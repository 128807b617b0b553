//! Slash-separated dataset keys.

use std::fmt;

use crate::error::{PlotStoreError, Result};

/// A normalized path to a record: at least one component, no empty parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetKey {
    parts: Vec<String>,
}

impl DatasetKey {
    /// Parse a key such as `/a/b/curve`. Leading, trailing and repeated
    /// slashes are ignored; a key naming the root is rejected.
    pub fn parse(key: &str) -> Result<Self> {
        let parts: Vec<String> = key
            .split('/')
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();

        if parts.is_empty() {
            return Err(PlotStoreError::invalid_target(key, "Cannot write to root"));
        }
        if parts.iter().any(|part| part == "." || part == "..") {
            return Err(PlotStoreError::invalid_target(key, "Relative components are not allowed"));
        }

        Ok(Self { parts })
    }

    /// Last component: the dataset name.
    pub fn name(&self) -> &str {
        &self.parts[self.parts.len() - 1]
    }

    /// Components of the enclosing groups, outermost first.
    pub fn parents(&self) -> &[String] {
        &self.parts[..self.parts.len() - 1]
    }

    /// Path of the enclosing group, `None` at the root.
    pub fn parent_path(&self) -> Option<String> {
        let parents = self.parents();
        (!parents.is_empty()).then(|| parents.join("/"))
    }

    /// All components.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Full path without a leading slash.
    pub fn path(&self) -> String {
        self.parts.join("/")
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_slashes() {
        let key = DatasetKey::parse("//data/run_1//curve/").unwrap();
        assert_eq!(key.path(), "data/run_1/curve");
        assert_eq!(key.name(), "curve");
        assert_eq!(key.parent_path().as_deref(), Some("data/run_1"));
        assert_eq!(key.to_string(), "/data/run_1/curve");
    }

    #[test]
    fn test_top_level_key() {
        let key = DatasetKey::parse("mycurve").unwrap();
        assert!(key.parents().is_empty());
        assert_eq!(key.parent_path(), None);
    }

    #[test]
    fn test_root_is_invalid_target() {
        for root in ["/", "", "///"] {
            assert!(matches!(
                DatasetKey::parse(root),
                Err(PlotStoreError::InvalidTarget { .. })
            ));
        }
    }

    #[test]
    fn test_relative_components_rejected() {
        assert!(DatasetKey::parse("a/../b").is_err());
    }
}
