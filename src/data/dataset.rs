//! Dataset information.

use super::DataNode;
use std::path::PathBuf;

/// Information about a loaded container.
#[derive(Debug, Clone)]
pub struct DatasetInfo {
    /// Path to the source file, if it came from one.
    pub file_path: Option<PathBuf>,
    /// Root node of the data tree.
    pub root_node: DataNode,
}

impl DatasetInfo {
    /// Create a new dataset info.
    pub fn new(file_path: Option<PathBuf>, root_node: DataNode) -> Self {
        Self {
            file_path,
            root_node,
        }
    }

    /// Number of records in the tree.
    pub fn record_count(&self) -> usize {
        self.root_node.record_count()
    }
}
