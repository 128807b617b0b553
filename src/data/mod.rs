//! Container structure as a tree of nodes.
//!
//! This module walks the records of a container and represents their
//! layout as a tree of groups and records, for listing.

mod dataset;
mod node;
mod reader;

pub use dataset::DatasetInfo;
pub use node::{DataNode, NodeType};
pub use reader::DataReader;
