//! In-memory element tree backing the control panel.
//!
//! Controls hold the live values; every setting is a projection over them.

pub mod ancestry;

pub use ancestry::{ancestors_of, common_ancestor, container_of};

/// Index of an element in its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Container,
    /// `target` is the id of the element the label is for.
    Label { target: Option<String>, text: String },
    Checkbox { checked: bool },
    Number { value: String, min: Option<usize>, max: Option<usize> },
    Field { value: String },
    Text { text: String },
    Button { caption: String },
}

#[derive(Debug, Clone)]
pub struct Element {
    pub id: Option<String>,
    /// Explicit group key tying related controls together.
    pub group: Option<String>,
    pub control: Control,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    pub fn new(control: Control) -> Self {
        Self {
            id: None,
            group: None,
            control,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn container() -> Self {
        Self::new(Control::Container)
    }

    pub fn label(target: &str, text: &str) -> Self {
        Self::new(Control::Label {
            target: Some(target.to_string()),
            text: text.to_string(),
        })
    }

    pub fn checkbox(id: &str, checked: bool) -> Self {
        Self::new(Control::Checkbox { checked }).with_id(id)
    }

    pub fn number(value: usize) -> Self {
        Self::new(Control::Number {
            value: value.to_string(),
            min: None,
            max: None,
        })
    }

    pub fn field() -> Self {
        Self::new(Control::Field {
            value: String::new(),
        })
    }

    pub fn text(text: &str) -> Self {
        Self::new(Control::Text {
            text: text.to_string(),
        })
    }

    pub fn button(caption: &str) -> Self {
        Self::new(Control::Button {
            caption: caption.to_string(),
        })
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    pub fn with_range(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        if let Control::Number {
            min: ref mut lo,
            max: ref mut hi,
            ..
        } = self.control
        {
            *lo = min;
            *hi = max;
        }
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena of elements rooted at a single container.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::container()],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn append(&mut self, parent: NodeId, mut element: Element) -> NodeId {
        let id = NodeId(self.nodes.len());
        element.parent = Some(parent);
        element.children.clear();
        self.nodes.push(element);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Unhook `node` from its parent. The subtree stays addressable but is no
    /// longer reachable from the root.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    pub fn get(&self, node: NodeId) -> &Element {
        &self.nodes[node.0]
    }

    pub fn get_mut(&mut self, node: NodeId) -> &mut Element {
        &mut self.nodes[node.0]
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Pre-order walk of `node` and everything below it.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.nodes[n.0].children.iter().rev());
        }
        out
    }

    /// First element in `scope`'s subtree (document order) matching `pred`.
    pub fn find(&self, scope: NodeId, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&n| pred(&self.nodes[n.0]))
    }

    /// Element with the given id, if it is attached to the tree.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.find(self.root(), |e| e.id.as_deref() == Some(id))
    }

    pub fn checked(&self, node: NodeId) -> Option<bool> {
        match self.nodes[node.0].control {
            Control::Checkbox { checked } => Some(checked),
            _ => None,
        }
    }

    pub fn set_checked(&mut self, node: NodeId, value: bool) {
        match &mut self.nodes[node.0].control {
            Control::Checkbox { checked } => *checked = value,
            other => tracing::warn!(?node, ?other, "set_checked on a non-checkbox"),
        }
    }

    /// Current text value of a number input or field.
    pub fn value(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].control {
            Control::Number { value, .. } | Control::Field { value } => Some(value),
            _ => None,
        }
    }

    pub fn set_value(&mut self, node: NodeId, new: &str) {
        match &mut self.nodes[node.0].control {
            Control::Number { value, .. } | Control::Field { value } => {
                value.clear();
                value.push_str(new);
            }
            other => tracing::warn!(?node, ?other, "set_value on a non-input"),
        }
    }

    pub fn min(&self, node: NodeId) -> Option<usize> {
        match self.nodes[node.0].control {
            Control::Number { min, .. } => min,
            _ => None,
        }
    }

    pub fn max(&self, node: NodeId) -> Option<usize> {
        match self.nodes[node.0].control {
            Control::Number { max, .. } => max,
            _ => None,
        }
    }

    pub fn set_min(&mut self, node: NodeId, floor: usize) {
        match &mut self.nodes[node.0].control {
            Control::Number { min, .. } => *min = Some(floor),
            other => tracing::warn!(?node, ?other, "set_min on a non-number"),
        }
    }

    /// Display text of labels, text elements and buttons.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].control {
            Control::Label { text, .. } | Control::Text { text } => Some(text),
            Control::Button { caption } => Some(caption),
            _ => None,
        }
    }

    pub fn set_text(&mut self, node: NodeId, new: &str) {
        match &mut self.nodes[node.0].control {
            Control::Label { text, .. } | Control::Text { text } => {
                text.clear();
                text.push_str(new);
            }
            other => tracing::warn!(?node, ?other, "set_text on a non-text element"),
        }
    }
}
