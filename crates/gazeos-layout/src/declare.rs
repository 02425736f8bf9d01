//! Declarative layouts.
//!
//! A [`LayoutDecl`] is the serde form of a region tree, so layouts can live
//! in configuration files:
//!
//! ```toml
//! [[sections]]
//! sections = [{ event = "open_cart" }, { event = "open_profile" }]
//!
//! [[sections]]
//! event = "checkout"
//! ```

use gazeos_types::NavError;
use serde::{Deserialize, Serialize};

use crate::builder::RegionTreeBuilder;
use crate::region_tree::RegionTree;

/// Top level of a declared layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutDecl {
    #[serde(default)]
    pub sections: Vec<SectionDecl>,
}

/// One declared section.  Sections with sub-sections must not carry an
/// event: commands only fire on terminal sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionDecl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<SectionDecl>,
}

impl SectionDecl {
    pub fn leaf(event: impl Into<String>) -> Self {
        Self {
            event: Some(event.into()),
            sections: Vec::new(),
        }
    }

    pub fn group(sections: Vec<SectionDecl>) -> Self {
        Self {
            event: None,
            sections,
        }
    }
}

impl LayoutDecl {
    /// Validate the declaration and build the tree.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Layout`] naming the depth path of the first
    /// section that has both an event and sub-sections.
    pub fn build(&self) -> Result<RegionTree, NavError> {
        let mut path = Vec::new();
        let builder = declare_level(RegionTreeBuilder::new(), &self.sections, &mut path)?;
        Ok(builder.build())
    }
}

fn declare_level(
    mut builder: RegionTreeBuilder,
    sections: &[SectionDecl],
    path: &mut Vec<usize>,
) -> Result<RegionTreeBuilder, NavError> {
    for (index, section) in sections.iter().enumerate() {
        path.push(index);
        builder = match (&section.event, section.sections.is_empty()) {
            (Some(event), true) => builder.add_leaf_with_event(event.clone()),
            (None, true) => builder.add_leaf(),
            (None, false) => {
                let child = declare_level(RegionTreeBuilder::new(), &section.sections, path)?;
                builder.add_section(|_| child)
            }
            (Some(event), false) => {
                return Err(NavError::Layout(format!(
                    "section {path:?} has sub-sections and event '{event}'"
                )));
            }
        };
        path.pop();
    }
    Ok(builder)
}
