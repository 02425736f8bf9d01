//! [`RegionTreeBuilder`] – nested construction of a [`RegionTree`].
//!
//! Each builder collects the sections of one level.  Nested levels are
//! declared with a closure that receives a fresh builder:
//!
//! ```rust
//! use gazeos_layout::RegionTreeBuilder;
//!
//! let tree = RegionTreeBuilder::new()
//!     .add_section(|menu| {
//!         menu.add_leaf_with_event("open_cart")
//!             .add_leaf_with_event("open_profile")
//!     })
//!     .add_leaf()
//!     .build();
//!
//! assert_eq!(tree.section_count_at(&[0]), 2);
//! ```

use crate::region_tree::{NodeId, RegionNode, RegionTree};

/// One declared section before it is flattened into the arena.
#[derive(Debug, Clone)]
enum Section {
    Group(Vec<Section>),
    Leaf(Option<String>),
}

/// Collects the sections of one tree level.
#[derive(Debug, Clone, Default)]
pub struct RegionTreeBuilder {
    sections: Vec<Section>,
}

impl RegionTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section whose sub-sections are declared by `build`.
    pub fn add_section(mut self, build: impl FnOnce(RegionTreeBuilder) -> RegionTreeBuilder) -> Self {
        let child = build(RegionTreeBuilder::new());
        self.sections.push(Section::Group(child.sections));
        self
    }

    /// Add a terminal section with no command.
    pub fn add_leaf(mut self) -> Self {
        self.sections.push(Section::Leaf(None));
        self
    }

    /// Add a terminal section that fires `event` when selected.
    pub fn add_leaf_with_event(mut self, event: impl Into<String>) -> Self {
        self.sections.push(Section::Leaf(Some(event.into())));
        self
    }

    /// Number of sections declared at this level so far.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Flatten the declared sections into an immutable [`RegionTree`].
    pub fn build(self) -> RegionTree {
        let mut tree = RegionTree::arena();
        insert(&mut tree, Section::Group(self.sections), None);
        tree
    }
}

// Depth-first pre-order, so the root lands on NodeId::ROOT.
fn insert(tree: &mut RegionTree, section: Section, parent: Option<NodeId>) -> NodeId {
    match section {
        Section::Leaf(event) => tree.push(RegionNode::Leaf(event), parent),
        Section::Group(children) => {
            let id = tree.push(RegionNode::Branch(Vec::new()), parent);
            let ids = children
                .into_iter()
                .map(|child| insert(tree, child, Some(id)))
                .collect();
            tree.set_children(id, ids);
            id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_yields_empty_tree() {
        let tree = RegionTreeBuilder::new().build();
        assert_eq!(tree, RegionTree::empty());
    }

    #[test]
    fn root_is_first_node() {
        let tree = RegionTreeBuilder::new().add_leaf().add_leaf().build();
        assert_eq!(tree.root(), NodeId::ROOT);
        assert_eq!(tree.children(NodeId::ROOT).len(), 2);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn nested_sections_keep_order() {
        let tree = RegionTreeBuilder::new()
            .add_leaf_with_event("first")
            .add_section(|s| s.add_leaf_with_event("inner_a").add_leaf_with_event("inner_b"))
            .add_leaf_with_event("last")
            .build();

        assert_eq!(tree.event_at(&[], 0), Some("first"));
        assert_eq!(tree.event_at(&[1], 0), Some("inner_a"));
        assert_eq!(tree.event_at(&[1], 1), Some("inner_b"));
        assert_eq!(tree.event_at(&[], 2), Some("last"));
    }

    #[test]
    fn parents_are_recorded() {
        let tree = RegionTreeBuilder::new()
            .add_section(|s| s.add_section(|t| t.add_leaf()))
            .build();
        let (leaf, depth) = tree.focus_target(0, &[0, 0]);
        assert_eq!(depth, 2);
        let leaf = leaf.unwrap();
        assert_eq!(tree.path_to(leaf), Some(vec![0, 0, 0]));
    }

    #[test]
    fn builder_len_counts_current_level_only() {
        let builder = RegionTreeBuilder::new()
            .add_section(|s| s.add_leaf().add_leaf())
            .add_leaf();
        assert_eq!(builder.len(), 2);
        assert!(!builder.is_empty());
    }
}
