//! Hierarchy sheet loading and normalization

mod format;
mod loader;

pub use format::{format_org_tree, CodeTable, HierarchyRow};
pub use loader::{load_org_tree, shape_table, HierarchySource, RawTable};
