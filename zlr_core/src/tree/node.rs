use std::fmt;
use std::sync::Arc;

use once_cell::unsync::OnceCell;

use crate::lr0::qualified_name;
use crate::{EvalError, Evaluator, Token};

/// Syntax tree node
///
/// Both variants memoize their made value in a write-once cell. Internal nodes own their
/// children exclusively; evaluation with pruning drops them once the value is known.
#[derive(Debug)]
pub enum Node<V> {
    Leaf(Leaf<V>),
    Internal(Internal<V>),
}

/// Node for a shifted token
#[derive(Debug)]
pub struct Leaf<V> {
    token: Token,
    made: OnceCell<Option<V>>,
}

/// Node for a reduced production
#[derive(Debug)]
pub struct Internal<V> {
    name: Arc<str>,
    tag: Option<String>,
    offset: Option<usize>,
    children: Vec<Node<V>>,
    made: OnceCell<Option<V>>,
}

impl<V> Leaf<V> {
    pub fn token(&self) -> &Token {
        &self.token
    }
}

impl<V> Internal<V> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub(crate) fn prune(&mut self) {
        self.children.clear();
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<Node<V>> {
        &mut self.children
    }
}

// Deep trees would overflow the call stack with the derived drop glue, so subtrees are
// flattened onto the heap first.
impl<V> Drop for Internal<V> {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let Node::Internal(mut internal) = node {
                pending.append(&mut internal.children);
            }
        }
    }
}

impl<V> Node<V> {
    pub fn leaf(token: Token) -> Self {
        Node::Leaf(Leaf {
            token,
            made: OnceCell::new(),
        })
    }

    /// Internal node located at its first child's token
    pub fn internal(name: &str, tag: Option<String>, children: Vec<Node<V>>) -> Self {
        let offset = children.iter().find_map(Node::offset);
        Node::reduced(name, tag, children, offset)
    }

    /// Internal node with an explicit offset, for productions whose first symbols are not
    /// kept as children
    pub(crate) fn reduced(
        name: &str,
        tag: Option<String>,
        children: Vec<Node<V>>,
        offset: Option<usize>,
    ) -> Self {
        Node::Internal(Internal {
            name: Arc::from(name),
            tag,
            offset,
            children,
            made: OnceCell::new(),
        })
    }

    /// Terminal name for leaves, production subject for internal nodes
    pub fn node_name(&self) -> &str {
        match self {
            Node::Leaf(leaf) => leaf.token.kind(),
            Node::Internal(internal) => &internal.name,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf(_) => None,
            Node::Internal(internal) => internal.tag(),
        }
    }

    /// `Name` or `Name(tag)`
    pub fn qualified_name(&self) -> String {
        qualified_name(self.node_name(), self.tag())
    }

    /// Children of an internal node, empty for leaves and pruned nodes
    pub fn children(&self) -> &[Node<V>] {
        match self {
            Node::Leaf(_) => &[],
            Node::Internal(internal) => &internal.children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Byte offset of the first token matched by this node, hidden tokens included
    pub fn offset(&self) -> Option<usize> {
        match self {
            Node::Leaf(leaf) => Some(leaf.token.offset()),
            Node::Internal(internal) => internal.offset,
        }
    }

    /// Made value, computing it through `evaluator` on first access
    pub fn made<'t>(&'t self, evaluator: &Evaluator<'_, V>) -> Result<Option<&'t V>, EvalError>
    where
        V: Clone,
    {
        evaluator.made(self)
    }

    /// Made value if it was already computed
    pub fn made_value(&self) -> Option<&V> {
        self.made_cell().get().and_then(Option::as_ref)
    }

    pub(crate) fn made_cell(&self) -> &OnceCell<Option<V>> {
        match self {
            Node::Leaf(leaf) => &leaf.made,
            Node::Internal(internal) => &internal.made,
        }
    }

    /// Indented dump of the subtree, two spaces per level
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut pending = vec![(self, 0usize)];
        while let Some((node, depth)) = pending.pop() {
            for _ in 0..depth {
                out.push_str("  ");
            }
            match node {
                Node::Leaf(leaf) => {
                    out.push_str(&format!("{} {:?}\n", leaf.token.kind(), leaf.token.content()));
                }
                Node::Internal(internal) => {
                    out.push_str(&node.qualified_name());
                    out.push('\n');
                    pending.extend(internal.children.iter().rev().map(|child| (child, depth + 1)));
                }
            }
        }
        out
    }
}

impl<V> fmt::Display for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.dump())
    }
}
