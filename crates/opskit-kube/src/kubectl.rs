//! kubectl: node readiness and namespace provisioning.

use crate::exec;
use opskit_core::ensure::ensure_with;
use opskit_core::render::lookup;
use opskit_core::wait::{self, Probe, WaitOpts};
use opskit_core::{Ensure, Result};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeReadiness {
    pub total: usize,
    pub not_ready: usize,
}

impl NodeReadiness {
    /// A cluster with no nodes at all is not ready — readiness needs both
    /// zero not-ready nodes and at least one node to exist.
    pub fn ready(self) -> bool {
        self.total > 0 && self.not_ready == 0
    }
}

/// True when the node document's conditions report `Ready=True`.
fn node_is_ready(node: &Value) -> bool {
    let Some(Value::Array(conditions)) = lookup(node, "status.conditions") else {
        return false;
    };
    conditions.iter().any(|c| {
        lookup(c, "type").and_then(Value::as_str) == Some("Ready")
            && lookup(c, "status").and_then(Value::as_str) == Some("True")
    })
}

/// Count ready/not-ready nodes in a `kubectl get nodes -o json` document.
pub fn readiness(doc: &Value) -> NodeReadiness {
    let items = match lookup(doc, "items") {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    };
    NodeReadiness {
        total: items.len(),
        not_ready: items.iter().filter(|n| !node_is_ready(n)).count(),
    }
}

/// The node list as JSON rows for the renderer.
pub fn node_rows(doc: &Value) -> Vec<Value> {
    match lookup(doc, "items") {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}

pub async fn nodes() -> Result<Value> {
    exec::run_json("kubectl", &["get", "nodes", "-o", "json"]).await
}

/// Poll until every node is Ready and at least one node exists.
pub async fn wait_nodes_ready(opts: WaitOpts) -> Result<NodeReadiness> {
    wait::until_ready("all nodes to be Ready", opts, || async {
        let doc = nodes().await?;
        let state = readiness(&doc);
        if state.ready() {
            Ok(Probe::Ready(state))
        } else {
            Ok(Probe::Pending(format!(
                "{}/{} nodes ready",
                state.total - state.not_ready,
                state.total
            )))
        }
    })
    .await
}

pub async fn namespace_exists(namespace: &str) -> Result<bool> {
    exec::probe("kubectl", &["get", "namespace", namespace]).await
}

pub async fn ensure_namespace(namespace: &str) -> Result<Ensure> {
    ensure_with(
        || namespace_exists(namespace),
        || async {
            exec::run("kubectl", &["create", "namespace", namespace]).await?;
            Ok(())
        },
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(name: &str, ready: &str) -> Value {
        json!({
            "metadata": {"name": name},
            "status": {
                "conditions": [
                    {"type": "MemoryPressure", "status": "False"},
                    {"type": "Ready", "status": ready},
                ],
                "nodeInfo": {"kubeletVersion": "v1.30.0"},
            }
        })
    }

    #[test]
    fn all_nodes_ready() {
        let doc = json!({"items": [node("a", "True"), node("b", "True")]});
        let state = readiness(&doc);
        assert_eq!(state, NodeReadiness { total: 2, not_ready: 0 });
        assert!(state.ready());
    }

    #[test]
    fn one_node_not_ready() {
        let doc = json!({"items": [node("a", "True"), node("b", "False")]});
        let state = readiness(&doc);
        assert_eq!(state.not_ready, 1);
        assert!(!state.ready());
    }

    #[test]
    fn unknown_condition_counts_as_not_ready() {
        let doc = json!({"items": [node("a", "Unknown")]});
        assert!(!readiness(&doc).ready());
    }

    #[test]
    fn zero_nodes_is_not_ready() {
        let doc = json!({"items": []});
        let state = readiness(&doc);
        assert_eq!(state.total, 0);
        assert!(!state.ready(), "an empty cluster must not report ready");
    }

    #[test]
    fn missing_items_is_not_ready() {
        assert!(!readiness(&json!({})).ready());
    }
}
