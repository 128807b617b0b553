//! Text rendering of container layouts and records.

use crate::data::{DataNode, DataReader};
use crate::store::Record;

/// Render a container tree, one node per line.
pub fn format_tree(node: &DataNode, file_name: Option<&str>) -> String {
    let mut text = String::new();

    if let Some(name) = file_name {
        text.push_str(&format!("Tree Structure: {}\n", name));
    } else {
        text.push_str("Tree Structure\n");
    }

    text.push_str(&"=".repeat(80));
    text.push_str("\n\n");

    text.push_str(&format!("{}\n", node.display_name()));
    for (i, child) in node.children.iter().enumerate() {
        let is_last = i == node.children.len() - 1;
        text.push_str(&format_tree_recursive(child, "", is_last));
    }

    text
}

/// Render a single record with its attributes.
pub fn format_record(key: &str, record: &Record) -> String {
    let shape: Vec<String> = record.data.shape().iter().map(|d| d.to_string()).collect();
    let mut text = format!("Record: {}\n", key);
    text.push_str(&format!("Shape: ({})\n", shape.join(", ")));

    if !record.attrs.is_empty() {
        text.push_str("\nAttributes:\n");
        for (name, value) in &record.attrs {
            text.push_str(&format!(
                "  {}: {}\n",
                name,
                DataReader::attr_value_to_string(value)
            ));
        }
    }

    text.push_str("\nData:\n");
    for row in record.data.outer_iter() {
        text.push_str(&format!("  {:>14} {:>14}\n", format_value(row[0]), format_value(row[1])));
    }

    text
}

/// Format a number compactly, switching to scientific notation for
/// very large or very small magnitudes.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Inf" } else { "-Inf" }.to_string()
    } else if value != 0.0 && (value.abs() >= 1e6 || value.abs() < 1e-4) {
        format!("{:.4e}", value)
    } else {
        format!("{}", value)
    }
}

fn format_tree_recursive(node: &DataNode, prefix: &str, is_last: bool) -> String {
    let mut result = String::new();

    let connector = if is_last { "└── " } else { "├── " };
    result.push_str(&format!("{}{}{}\n", prefix, connector, node.display_name()));

    let new_prefix = format!("{}{}   ", prefix, if is_last { " " } else { "│" });

    for (i, child) in node.children.iter().enumerate() {
        let is_last_child = i == node.children.len() - 1;
        result.push_str(&format_tree_recursive(child, &new_prefix, is_last_child));
    }

    result
}
