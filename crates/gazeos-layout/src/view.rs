//! Focus rendering contract.
//!
//! The navigation engine never touches pixels.  It talks to a [`FocusView`],
//! which answers structural questions about the active layout and draws or
//! clears focus borders.  [`RegionTreeView`] implements the contract for a
//! [`RegionTree`], translating border requests into calls on a
//! [`FocusRenderer`] keyed by [`NodeId`].  Data shape and presentation stay
//! separate: the tree knows nothing about borders, the renderer knows
//! nothing about depth paths.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::region_tree::{NodeId, RegionTree};

/// What the navigation engine needs from whatever presents the layout.
pub trait FocusView {
    /// Draw the focus border on section `section` below `path`.  Returns the
    /// depth the walk along `path` actually reached.
    fn draw_border(&mut self, section: usize, path: &[usize]) -> usize;

    /// Remove every focus border, on every node.
    fn clear_borders(&mut self);

    /// Number of sections of the node at `path` (at least 1).
    fn section_count(&self, path: &[usize]) -> usize;

    /// Whether section `section` below `path` is terminal.
    fn is_terminal(&self, path: &[usize], section: usize) -> bool;

    /// Event identifier of section `section` below `path`.
    fn event_id(&self, path: &[usize], section: usize) -> Option<String>;
}

/// Draws and removes focus decoration on individual nodes.
pub trait FocusRenderer {
    fn draw_border(&mut self, node: NodeId);
    fn remove_border(&mut self, node: NodeId);
}

/// In-memory renderer that remembers which nodes carry a border.
#[derive(Debug, Clone, Default)]
pub struct BorderSet {
    bordered: BTreeSet<NodeId>,
}

impl BorderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.bordered.contains(&node)
    }

    pub fn bordered(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.bordered.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.bordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bordered.is_empty()
    }
}

impl FocusRenderer for BorderSet {
    fn draw_border(&mut self, node: NodeId) {
        self.bordered.insert(node);
    }

    fn remove_border(&mut self, node: NodeId) {
        self.bordered.remove(&node);
    }
}

/// [`FocusView`] over a shared, immutable [`RegionTree`].
#[derive(Debug)]
pub struct RegionTreeView<R> {
    tree: Arc<RegionTree>,
    renderer: R,
}

impl<R: FocusRenderer> RegionTreeView<R> {
    pub fn new(tree: Arc<RegionTree>, renderer: R) -> Self {
        Self { tree, renderer }
    }

    pub fn tree(&self) -> &RegionTree {
        &self.tree
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

impl<R: FocusRenderer> FocusView for RegionTreeView<R> {
    fn draw_border(&mut self, section: usize, path: &[usize]) -> usize {
        let (target, depth) = self.tree.focus_target(section, path);
        match target {
            Some(node) => self.renderer.draw_border(node),
            None => debug!(section, ?path, depth, "focus target out of range; nothing drawn"),
        }
        depth
    }

    fn clear_borders(&mut self) {
        for node in self.tree.subtree(self.tree.root()) {
            self.renderer.remove_border(node);
        }
    }

    fn section_count(&self, path: &[usize]) -> usize {
        self.tree.section_count_at(path)
    }

    fn is_terminal(&self, path: &[usize], section: usize) -> bool {
        self.tree.is_terminal_at(path, section)
    }

    fn event_id(&self, path: &[usize], section: usize) -> Option<String> {
        self.tree.event_at(path, section).map(str::to_string)
    }
}
