//! Container reader.

use super::{DataNode, DatasetInfo, NodeType};
use crate::error::Result;
use crate::store::{AttrValue, Container, Store};
use std::path::Path;

/// Builds the node tree of a container.
#[derive(Debug)]
pub struct DataReader;

impl DataReader {
    /// Read the layout of a container file.
    pub fn read_file(path: &Path) -> Result<DatasetInfo> {
        let container = Container::open_read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let mut info = Self::read_store(&container, name)?;
        info.file_path = Some(path.to_path_buf());
        Ok(info)
    }

    /// Read the layout of any store.
    pub fn read_store<S: Store + ?Sized>(store: &S, name: String) -> Result<DatasetInfo> {
        let mut root_node = DataNode::new(name, "/".to_string(), NodeType::Root);

        for key in store.keys()? {
            let record = store.read_record(&key)?;
            let mut parts: Vec<&str> = key.split('/').filter(|p| !p.is_empty()).collect();
            let Some(record_name) = parts.pop() else {
                continue;
            };

            let mut group = &mut root_node;
            for part in parts {
                group = group.child_group(part);
            }

            let mut record_node =
                DataNode::new(record_name.to_string(), key.clone(), NodeType::Record);
            record_node.shape = Some(record.data.shape().to_vec());
            for (attr_name, value) in &record.attrs {
                record_node
                    .attributes
                    .insert(attr_name.clone(), Self::attr_value_to_string(value));
            }
            group.add_child(record_node);
        }

        tracing::debug!("Read layout with {} records", root_node.record_count());
        Ok(DatasetInfo::new(None, root_node))
    }

    /// Render an attribute value as text.
    pub fn attr_value_to_string(value: &AttrValue) -> String {
        match value {
            AttrValue::Str(v) => v.clone(),
            AttrValue::Float(v) => format!("{}", v),
            AttrValue::Strings(v) => v.join(", "),
            AttrValue::Array(v) => format!("{:?}", v.to_vec()),
            AttrValue::Matrix(v) => {
                let rows: Vec<String> = v
                    .outer_iter()
                    .map(|row| format!("{:?}", row.to_vec()))
                    .collect();
                format!("[{}]", rows.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, Record};
    use ndarray::array;

    #[test]
    fn test_tree_from_keys() {
        let mut store = MemoryStore::new();
        let mut record = Record::new(array![[0.0, 1.0]]).unwrap();
        record.set("artist", "Line2D");
        record.set("xerr", array![[0.5], [1.5]]);
        store.write_record("fig/a", &record).unwrap();
        store.write_record("fig/b", &record).unwrap();
        store.write_record("top", &record).unwrap();

        let info = DataReader::read_store(&store, "mem".to_string()).unwrap();
        let root = &info.root_node;
        assert_eq!(info.record_count(), 3);
        assert_eq!(root.children.len(), 2);

        let fig = &root.children[0];
        assert!(fig.is_group());
        assert_eq!(fig.path, "/fig");
        assert_eq!(fig.children[1].path, "/fig/b");
        assert_eq!(fig.children[1].attributes["xerr"], "[[0.5], [1.5]]");
        assert!(root.children[1].is_record());
    }
}
