//! Table block collection from the converted document tree.
//!
//! Nodes carry a `block_type` and an optional `children` list. Tables can
//! sit at any depth (page → section → table), so every node's children are
//! visited regardless of its own type.

use serde_json::Value;

const TABLE_BLOCK: &str = "Table";

fn children(node: &Value) -> &[Value] {
    node.get("children")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// All `Table` blocks below `root`, in document order.
///
/// Walks with an explicit stack, so deeply nested documents cannot
/// overflow the call stack.
pub fn collect_table_blocks(root: &Value) -> Vec<&Value> {
    let mut found = Vec::new();
    let mut stack: Vec<&Value> = children(root).iter().rev().collect();

    while let Some(node) = stack.pop() {
        if node.get("block_type").and_then(Value::as_str) == Some(TABLE_BLOCK) {
            found.push(node);
        }
        stack.extend(children(node).iter().rev());
    }

    found
}

/// The `html` of every table block; blocks without one yield `""`.
pub fn table_html(root: &Value) -> Vec<&str> {
    collect_table_blocks(root)
        .into_iter()
        .map(|block| block.get("html").and_then(Value::as_str).unwrap_or(""))
        .collect()
}
