//! Ancestor resolution: groups controls by where they sit in the tree.

use super::{Document, NodeId};

/// Containers of `node`, nearest first, root last.
pub fn ancestors_of(doc: &Document, node: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut current = doc.parent(node);
    while let Some(parent) = current {
        out.push(parent);
        current = doc.parent(parent);
    }
    out
}

/// Nearest container shared by every element in `nodes`.
///
/// Returns `None` for empty input or elements from disjoint trees.
pub fn common_ancestor(doc: &Document, nodes: &[NodeId]) -> Option<NodeId> {
    let (first, rest) = nodes.split_first()?;
    let rest_ancestors: Vec<Vec<NodeId>> = rest.iter().map(|&n| ancestors_of(doc, n)).collect();

    ancestors_of(doc, *first)
        .into_iter()
        .find(|candidate| rest_ancestors.iter().all(|chain| chain.contains(candidate)))
}

/// The highest ancestor of `node` (or `node` itself) that is a direct child of
/// the container shared by `peers`.
///
/// Falls back to `node` when the peers share no container or no such
/// ancestor exists.
pub fn container_of(doc: &Document, node: NodeId, peers: &[NodeId]) -> NodeId {
    let Some(shared) = common_ancestor(doc, peers) else {
        return node;
    };

    std::iter::once(node)
        .chain(ancestors_of(doc, node))
        .find(|&n| doc.parent(n) == Some(shared))
        .unwrap_or(node)
}
