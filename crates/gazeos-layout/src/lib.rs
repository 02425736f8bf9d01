//! `gazeos-layout` – The Region Tree.
//!
//! Describes how a screen is recursively split into gaze-selectable
//! sections, and answers the questions the navigation engine asks about it.
//!
//! # Modules
//!
//! - [`region_tree`] – [`RegionTree`][region_tree::RegionTree]: immutable
//!   arena of [`RegionNode`][region_tree::RegionNode]s with depth-path
//!   traversal (section counts, terminal checks, event lookup, focus target).
//! - [`builder`] – [`RegionTreeBuilder`][builder::RegionTreeBuilder]: nested
//!   closure-style construction of a tree.
//! - [`declare`] – [`LayoutDecl`][declare::LayoutDecl]: serde-friendly
//!   declarative layout, e.g. loaded from TOML.
//! - [`view`] – the [`FocusView`][view::FocusView] contract used by the
//!   engine and [`RegionTreeView`][view::RegionTreeView], which implements it
//!   over a tree plus a [`FocusRenderer`][view::FocusRenderer].

pub mod builder;
pub mod declare;
pub mod region_tree;
pub mod view;

pub use builder::RegionTreeBuilder;
pub use declare::{LayoutDecl, SectionDecl};
pub use region_tree::{NodeId, RegionNode, RegionTree, Resolved};
pub use view::{BorderSet, FocusRenderer, FocusView, RegionTreeView};
