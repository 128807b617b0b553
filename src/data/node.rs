//! Data node types and structures.

use std::collections::BTreeMap;

/// Type of node in the container hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// Root node (container level).
    Root,
    /// Group node.
    Group,
    /// Stored plot element.
    Record,
}

/// A node in the container tree.
#[derive(Debug, Clone)]
pub struct DataNode {
    /// Node name.
    pub name: String,
    /// Full path to this node.
    pub path: String,
    /// Type of node.
    pub node_type: NodeType,
    /// Child nodes.
    pub children: Vec<DataNode>,
    /// Record attributes, rendered as text.
    pub attributes: BTreeMap<String, String>,
    /// Shape for record nodes.
    pub shape: Option<Vec<usize>>,
}

impl DataNode {
    /// Create a new data node.
    pub fn new(name: String, path: String, node_type: NodeType) -> Self {
        Self {
            name,
            path,
            node_type,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            shape: None,
        }
    }

    /// Check if this node is a record.
    pub fn is_record(&self) -> bool {
        self.node_type == NodeType::Record
    }

    /// Check if this node is a group (or root).
    pub fn is_group(&self) -> bool {
        matches!(self.node_type, NodeType::Group | NodeType::Root)
    }

    /// Add a child node.
    pub fn add_child(&mut self, child: DataNode) {
        self.children.push(child);
    }

    /// Get the child group called `name`, creating it if needed.
    pub fn child_group(&mut self, name: &str) -> &mut DataNode {
        let index = match self
            .children
            .iter()
            .position(|child| child.is_group() && child.name == name)
        {
            Some(index) => index,
            None => {
                let path = if self.path == "/" {
                    format!("/{}", name)
                } else {
                    format!("{}/{}", self.path, name)
                };
                self.children
                    .push(DataNode::new(name.to_string(), path, NodeType::Group));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }

    /// Number of records at or below this node.
    pub fn record_count(&self) -> usize {
        let own = usize::from(self.is_record());
        own + self.children.iter().map(DataNode::record_count).sum::<usize>()
    }

    /// Get display name with metadata.
    pub fn display_name(&self) -> String {
        let suffix = match self.node_type {
            NodeType::Record => {
                let mut parts = Vec::new();

                if let Some(shape) = &self.shape {
                    let dims: Vec<String> = shape.iter().map(|d| d.to_string()).collect();
                    parts.push(format!("({})", dims.join(", ")));
                }

                if let Some(artist) = self.attributes.get("artist") {
                    parts.push(artist.clone());
                }

                if !parts.is_empty() {
                    format!(" {}", parts.join(" "))
                } else {
                    String::new()
                }
            }
            NodeType::Group | NodeType::Root => {
                format!(" ({})", self.children.len())
            }
        };

        format!("{}{}", self.name, suffix)
    }

    /// Check if this node matches a search query.
    pub fn matches_search(&self, query: &str) -> bool {
        let query_lower = query.to_lowercase();

        if self.name.to_lowercase().contains(&query_lower) {
            return true;
        }

        if self.path.to_lowercase().contains(&query_lower) {
            return true;
        }

        self.attributes.iter().any(|(key, value)| {
            key.to_lowercase().contains(&query_lower)
                || value.to_lowercase().contains(&query_lower)
        })
    }
}
