//! Region Tree Engine.
//!
//! Nodes live in a flat arena and reference their children by [`NodeId`].
//! The root is always [`NodeId::ROOT`].  A node is *terminal* when it has no
//! children; only [`RegionNode::Leaf`] carries an event identifier.
//!
//! # Depth paths
//!
//! Every query takes a depth path, the list of child indices chosen from the
//! root down to the currently open node.  Paths are walked with a cursor
//! over the borrowed slice; nothing is copied.
//!
//! A path index that is out of range for its level stops the walk: the
//! query then acts on the last node that was reached instead of failing.
//!
//! # Example
//!
//! ```rust
//! use gazeos_layout::RegionTreeBuilder;
//!
//! let tree = RegionTreeBuilder::new()
//!     .add_section(|s| s.add_leaf().add_leaf().add_leaf())
//!     .add_leaf_with_event("checkout")
//!     .build();
//!
//! assert_eq!(tree.section_count_at(&[]), 2);
//! assert_eq!(tree.section_count_at(&[0]), 3);
//! assert!(tree.is_terminal_at(&[], 1));
//! assert_eq!(tree.event_at(&[], 1), Some("checkout"));
//! ```

// ────────────────────────────────────────────────────────────────────────────
// NodeId / RegionNode
// ────────────────────────────────────────────────────────────────────────────

/// Stable identity of a node inside one [`RegionTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// A node in the region tree.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionNode {
    /// A section split further into ordered sub-sections.  An empty branch
    /// is terminal but has no event.
    Branch(Vec<NodeId>),
    /// A section that cannot be split, optionally firing a command.
    Leaf(Option<String>),
}

impl RegionNode {
    pub fn children(&self) -> &[NodeId] {
        match self {
            RegionNode::Branch(children) => children,
            RegionNode::Leaf(_) => &[],
        }
    }

    pub fn event(&self) -> Option<&str> {
        match self {
            RegionNode::Leaf(event) => event.as_deref(),
            RegionNode::Branch(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.children().is_empty()
    }
}

/// Result of walking a depth path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    /// Deepest node reached.
    pub node: NodeId,
    /// Number of path entries consumed; less than the path length when an
    /// out-of-range index stopped the walk.
    pub depth: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// RegionTree
// ────────────────────────────────────────────────────────────────────────────

/// Immutable tree of screen regions.
///
/// Build one with [`RegionTreeBuilder`][crate::builder::RegionTreeBuilder] or
/// [`LayoutDecl::build`][crate::declare::LayoutDecl::build].
#[derive(Debug, Clone, PartialEq)]
pub struct RegionTree {
    nodes: Vec<RegionNode>,
    parents: Vec<Option<NodeId>>,
}

impl RegionTree {
    /// A tree whose root has no sections.
    pub fn empty() -> Self {
        Self {
            nodes: vec![RegionNode::Branch(Vec::new())],
            parents: vec![None],
        }
    }

    /// Append `node` under `parent` and return its id.  Children must be
    /// attached afterwards with [`set_children`][Self::set_children].
    pub(crate) fn push(&mut self, node: RegionNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.parents.push(parent);
        id
    }

    pub(crate) fn set_children(&mut self, id: NodeId, children: Vec<NodeId>) {
        self.nodes[id.0] = RegionNode::Branch(children);
    }

    pub(crate) fn arena() -> Self {
        Self {
            nodes: Vec::new(),
            parents: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when the root has no sections.
    pub fn is_empty(&self) -> bool {
        self.children(NodeId::ROOT).is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&RegionNode> {
        self.nodes.get(id.0)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(RegionNode::children).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(id.0).copied().flatten()
    }

    /// All node ids, in depth-first pre-order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Depth path leading from the root to `id`.
    pub fn path_to(&self, id: NodeId) -> Option<Vec<usize>> {
        self.node(id)?;
        let mut path = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            let index = self.children(parent).iter().position(|&c| c == current)?;
            path.push(index);
            current = parent;
        }
        path.reverse();
        Some(path)
    }

    // ------------------------------------------------------------------------
    // Depth-path traversal
    // ------------------------------------------------------------------------

    /// Walk `path` from the root, stopping early at the first index that is
    /// out of range for its level.
    pub fn resolve(&self, path: &[usize]) -> Resolved {
        let mut node = NodeId::ROOT;
        let mut depth = 0;
        while let Some(&index) = path.get(depth) {
            match self.children(node).get(index) {
                Some(&child) => {
                    node = child;
                    depth += 1;
                }
                None => break,
            }
        }
        Resolved { node, depth }
    }

    /// Child `section` of the node at `path`, `None` when `section` is out of
    /// range.
    pub fn child_at(&self, path: &[usize], section: usize) -> Option<NodeId> {
        let resolved = self.resolve(path);
        self.children(resolved.node).get(section).copied()
    }

    /// Number of sections the node at `path` is split into; a terminal node
    /// reports 1.
    pub fn section_count_at(&self, path: &[usize]) -> usize {
        self.children(self.resolve(path).node).len().max(1)
    }

    /// `true` when child `section` of the node at `path` has no children.
    ///
    /// An out-of-range `section` addresses nothing and counts as terminal.
    pub fn is_terminal_at(&self, path: &[usize], section: usize) -> bool {
        self.child_at(path, section)
            .and_then(|id| self.node(id))
            .is_none_or(RegionNode::is_terminal)
    }

    /// Event identifier of child `section` of the node at `path`.
    pub fn event_at(&self, path: &[usize], section: usize) -> Option<&str> {
        self.child_at(path, section)
            .and_then(|id| self.node(id))
            .and_then(RegionNode::event)
    }

    /// Node that should receive the focus border for `section` under `path`,
    /// with the depth the walk reached.
    pub fn focus_target(&self, section: usize, path: &[usize]) -> (Option<NodeId>, usize) {
        let resolved = self.resolve(path);
        (
            self.children(resolved.node).get(section).copied(),
            resolved.depth,
        )
    }

    /// `id` and all of its descendants, depth-first.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if self.node(next).is_none() {
                continue;
            }
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }
}

impl Default for RegionTree {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::RegionTreeBuilder;

    /// Root with two sections, each split into three leaves.  Leaf [1, 2]
    /// fires "pay".
    fn grid() -> RegionTree {
        RegionTreeBuilder::new()
            .add_section(|s| s.add_leaf().add_leaf().add_leaf())
            .add_section(|s| s.add_leaf().add_leaf().add_leaf_with_event("pay"))
            .build()
    }

    #[test]
    fn empty_tree_reports_one_section() {
        let tree = RegionTree::empty();
        assert!(tree.is_empty());
        assert_eq!(tree.section_count_at(&[]), 1);
    }

    #[test]
    fn section_count_at_each_depth() {
        let tree = grid();
        assert_eq!(tree.section_count_at(&[]), 2);
        assert_eq!(tree.section_count_at(&[0]), 3);
        assert_eq!(tree.section_count_at(&[1]), 3);
        // Leaf degenerates to a single section.
        assert_eq!(tree.section_count_at(&[1, 0]), 1);
    }

    #[test]
    fn terminal_checks() {
        let tree = grid();
        assert!(!tree.is_terminal_at(&[], 0));
        assert!(!tree.is_terminal_at(&[], 1));
        assert!(tree.is_terminal_at(&[0], 2));
    }

    #[test]
    fn empty_branch_is_terminal_without_event() {
        let tree = RegionTreeBuilder::new().add_section(|s| s).build();
        assert!(tree.is_terminal_at(&[], 0));
        assert_eq!(tree.event_at(&[], 0), None);
    }

    #[test]
    fn event_lookup() {
        let tree = grid();
        assert_eq!(tree.event_at(&[1], 2), Some("pay"));
        assert_eq!(tree.event_at(&[1], 1), None);
        assert_eq!(tree.event_at(&[], 1), None);
    }

    #[test]
    fn stale_path_index_acts_on_reached_node() {
        let tree = grid();
        let resolved = tree.resolve(&[7, 0]);
        assert_eq!(resolved, Resolved { node: NodeId::ROOT, depth: 0 });
        assert_eq!(tree.section_count_at(&[7]), 2);

        let resolved = tree.resolve(&[1, 9]);
        assert_eq!(resolved.depth, 1);
        assert_eq!(tree.event_at(&[1, 9], 2), Some("pay"));
    }

    #[test]
    fn out_of_range_section_addresses_nothing() {
        let tree = grid();
        assert_eq!(tree.child_at(&[], 5), None);
        assert!(tree.is_terminal_at(&[], 5));
        assert_eq!(tree.event_at(&[], 5), None);
        assert_eq!(tree.focus_target(5, &[0]), (None, 1));
    }

    #[test]
    fn focus_target_reports_depth_reached() {
        let tree = grid();
        let (target, depth) = tree.focus_target(2, &[1]);
        assert_eq!(depth, 1);
        assert_eq!(tree.path_to(target.unwrap()), Some(vec![1, 2]));

        let (target, depth) = tree.focus_target(0, &[]);
        assert_eq!(depth, 0);
        assert_eq!(tree.path_to(target.unwrap()), Some(vec![0]));
    }

    #[test]
    fn subtree_covers_every_node_from_root() {
        let tree = grid();
        let all = tree.subtree(tree.root());
        assert_eq!(all.len(), tree.len());
        assert_eq!(all[0], NodeId::ROOT);
    }

    #[test]
    fn path_to_root_is_empty() {
        let tree = grid();
        assert_eq!(tree.path_to(NodeId::ROOT), Some(vec![]));
    }
}
