//! Copy a result field to the system clipboard.

use copypasta::{ClipboardContext, ClipboardProvider};
use zeroize::Zeroize;

use crate::dom::{Control, Document, NodeId};
use crate::error::ClipboardError;

/// Closest input to `from`: search each enclosing container, innermost
/// first, for the first field or number input in document order.
pub fn nearest_field(doc: &Document, from: NodeId) -> Option<NodeId> {
    let mut container = doc.parent(from);
    while let Some(scope) = container {
        let hit = doc.find(scope, |e| {
            matches!(e.control, Control::Field { .. } | Control::Number { .. })
        });
        if hit.is_some() {
            return hit;
        }
        container = doc.parent(scope);
    }
    None
}

/// Put the value of the field nearest `from` on the clipboard.
pub fn copy_field(doc: &Document, from: NodeId) -> Result<(), ClipboardError> {
    let field = nearest_field(doc, from).ok_or(ClipboardError::NoField)?;
    let mut contents = doc.value(field).unwrap_or_default().to_string();

    let mut ctx =
        ClipboardContext::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
    let result = ctx
        .set_contents(contents.clone())
        .map_err(|e| ClipboardError::Write(e.to_string()));

    // Some providers keep a copy around; read it back so it can be wiped.
    if let Ok(mut retrieved) = ctx.get_contents() {
        retrieved.zeroize();
    }
    contents.zeroize();
    result
}
