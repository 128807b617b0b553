//! In-memory nested mapping.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DatasetKey, Record, Store};
use crate::error::{PlotStoreError, Result};

/// An entry of the nested mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// A stored plot element.
    Record(Record),
    /// A group of named entries.
    Group(BTreeMap<String, Node>),
}

/// Records held in a nested mapping addressed by slash-separated keys.
///
/// Serializes to JSON as plain nested objects; a record is an object with
/// `data` and `attrs` members.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryStore {
    root: BTreeMap<String, Node>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level entries.
    pub fn root(&self) -> &BTreeMap<String, Node> {
        &self.root
    }

    /// Look up an entry by path. The root path yields `None`.
    pub fn get(&self, key: &str) -> Option<&Node> {
        let key = DatasetKey::parse(key).ok()?;
        let mut group = &self.root;
        for part in key.parents() {
            match group.get(part)? {
                Node::Group(children) => group = children,
                Node::Record(_) => return None,
            }
        }
        group.get(key.name())
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the mapping to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        tracing::debug!("Saved nested mapping to {}", path.display());
        Ok(())
    }

    /// Read a mapping from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl Store for MemoryStore {
    fn write_record(&mut self, key: &str, record: &Record) -> Result<()> {
        let key = DatasetKey::parse(key)?;
        let mut group = &mut self.root;

        for part in key.parents() {
            let node = group
                .entry(part.clone())
                .or_insert_with(|| Node::Group(BTreeMap::new()));
            group = match node {
                Node::Group(children) => children,
                Node::Record(_) => {
                    return Err(PlotStoreError::invalid_target(
                        key.to_string(),
                        format!("'{}' is a record, not a group", part),
                    ))
                }
            };
        }

        if group.contains_key(key.name()) {
            return Err(PlotStoreError::invalid_target(
                key.to_string(),
                "Entry already exists",
            ));
        }

        group.insert(key.name().to_string(), Node::Record(record.clone()));
        tracing::debug!("Stored {} ({} points) in memory", key, record.len());
        Ok(())
    }

    fn read_record(&self, key: &str) -> Result<Record> {
        let parsed = DatasetKey::parse(key)?;
        match self.get(key) {
            Some(Node::Record(record)) => Ok(record.clone()),
            Some(Node::Group(_)) => Err(PlotStoreError::data(format!(
                "{} is a group, not a record",
                parsed
            ))),
            None => Err(PlotStoreError::not_found(parsed.to_string())),
        }
    }

    fn contains(&self, key: &str) -> bool {
        matches!(self.get(key), Some(Node::Record(_)))
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        collect_keys(&self.root, "", &mut keys);
        Ok(keys)
    }
}

fn collect_keys(group: &BTreeMap<String, Node>, prefix: &str, keys: &mut Vec<String>) {
    for (name, node) in group {
        let path = format!("{}/{}", prefix, name);
        match node {
            Node::Record(_) => keys.push(path),
            Node::Group(children) => collect_keys(children, &path, keys),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn record() -> Record {
        let mut record = Record::new(array![[0.0, 1.0], [2.0, 3.0]]).unwrap();
        record.set("label", "curve");
        record
    }

    #[test]
    fn test_nested_write_and_read() {
        let mut store = MemoryStore::new();
        store.write_record("/fig/a/curve", &record()).unwrap();
        store.write_record("top", &record()).unwrap();

        assert!(store.contains("fig/a/curve"));
        assert!(!store.contains("fig/a"));
        assert_eq!(store.read_record("fig/a/curve").unwrap(), record());
        assert_eq!(store.keys().unwrap(), vec!["/fig/a/curve", "/top"]);
        assert!(matches!(store.get("fig"), Some(Node::Group(_))));
    }

    #[test]
    fn test_existing_entry_is_invalid_target() {
        let mut store = MemoryStore::new();
        store.write_record("curve", &record()).unwrap();
        assert!(matches!(
            store.write_record("curve", &record()),
            Err(PlotStoreError::InvalidTarget { .. })
        ));
        assert!(matches!(
            store.write_record("curve/child", &record()),
            Err(PlotStoreError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn test_read_errors() {
        let mut store = MemoryStore::new();
        store.write_record("g/curve", &record()).unwrap();
        assert!(matches!(store.read_record("missing"), Err(PlotStoreError::NotFound { .. })));
        assert!(matches!(store.read_record("g"), Err(PlotStoreError::Data(_))));
        assert!(matches!(store.read_record("/"), Err(PlotStoreError::InvalidTarget { .. })));
    }

    #[test]
    fn test_nan_coordinate_survives_save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("gaps.json");
        let mut store = MemoryStore::new();
        let record = Record::new(array![[0.0, 1.0], [1.0, f64::NAN]]).unwrap();
        store.write_record("g/gap", &record).unwrap();
        store.save(&path).unwrap();

        let loaded = MemoryStore::load(&path).unwrap();
        let data = loaded.read_record("g/gap").unwrap().data;
        assert_eq!(data.row(0).to_vec(), vec![0.0, 1.0]);
        assert_eq!(data[[1, 0]], 1.0);
        assert!(data[[1, 1]].is_nan());
    }

    #[test]
    fn test_json_round_trip() {
        let mut store = MemoryStore::new();
        store.write_record("g/curve", &record()).unwrap();
        let json = store.to_json().unwrap();
        assert!(json.contains("\"curve\""));
        assert_eq!(MemoryStore::from_json(&json).unwrap(), store);
    }

    #[test]
    fn test_group_named_like_record_fields() {
        let json = r#"{"data": {"inner": {"data": [[1.0, 2.0]], "attrs": {}}}}"#;
        let store = MemoryStore::from_json(json).unwrap();
        assert!(store.contains("data/inner"));
    }
}
