//! Reporting-network derivation
//!
//! Walks the formatted hierarchy table row by row and accumulates an
//! insertion-ordered, duplicate-free list of parent/child edges.

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use std::fmt;

use crate::config::PipelineConfig;
use crate::orgtree::CodeTable;
use crate::pipeline::PipelineError;

/// Normalized identifier for an organizational unit.
///
/// One uppercase letter followed by three digits, e.g. `A007`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct UnitCode(String);

impl UnitCode {
    pub fn new(code: impl Into<String>) -> Self {
        UnitCode(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UnitCode {
    fn from(s: &str) -> Self {
        UnitCode(s.to_string())
    }
}

impl From<String> for UnitCode {
    fn from(s: String) -> Self {
        UnitCode(s)
    }
}

/// A directed reporting relationship: `parent` is the outer level,
/// `child` reports into it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub parent: UnitCode,
    pub child: UnitCode,
}

impl Edge {
    pub fn new(parent: impl Into<UnitCode>, child: impl Into<UnitCode>) -> Self {
        Edge {
            parent: parent.into(),
            child: child.into(),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.parent, self.child)
    }
}

/// The deduplicated reporting network, in first-seen edge order.
///
/// Built once per run from one formatted hierarchy table and read-only
/// afterward.
#[derive(Debug, Clone, Default)]
pub struct Network {
    edges: IndexSet<Edge, FxBuildHasher>,
}

impl Network {
    /// Derive the network from a formatted hierarchy table.
    ///
    /// For each row, every adjacent level pair becomes a candidate edge.
    /// A candidate is kept only if it was not seen before and neither
    /// endpoint equals the excluded root code. With
    /// `legacy_column_bound` set, the innermost pair of each row is
    /// skipped, reproducing the historical bound.
    pub fn from_table(table: &CodeTable, config: &PipelineConfig) -> Result<Self, PipelineError> {
        let mut edges: IndexSet<Edge, FxBuildHasher> = IndexSet::default();
        for row in table.rows() {
            let depth = row.depth();
            if depth < 2 {
                continue;
            }
            let span = if config.legacy_column_bound {
                depth.saturating_sub(2)
            } else {
                depth - 1
            };
            for level in 0..span {
                let parent = row.level(level)?;
                let child = row.level(level + 1)?;
                if let Some(root) = &config.excluded_root {
                    if parent.as_str() == root || child.as_str() == root {
                        continue;
                    }
                }
                edges.insert(Edge::new(parent.clone(), child.clone()));
            }
        }
        Ok(Network { edges })
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, edge: &Edge) -> bool {
        self.edges.contains(edge)
    }

    /// Edges in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Every unit code referenced by an edge, in first-seen order.
    pub fn unit_codes(&self) -> Vec<&UnitCode> {
        let mut seen: IndexSet<&UnitCode, FxBuildHasher> = IndexSet::default();
        for edge in &self.edges {
            seen.insert(&edge.parent);
            seen.insert(&edge.child);
        }
        seen.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Network {
    type Item = &'a Edge;
    type IntoIter = indexmap::set::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orgtree::{CodeTable, HierarchyRow};

    fn table(rows: &[&[&str]]) -> CodeTable {
        CodeTable::new(
            rows.iter()
                .map(|codes| HierarchyRow::new(codes.iter().map(|c| UnitCode::from(*c)).collect()))
                .collect(),
        )
    }

    #[test]
    fn test_distinct_rows_keep_order() {
        let config = PipelineConfig::default();
        let network =
            Network::from_table(&table(&[&["A001", "B002"], &["A001", "B003"]]), &config).unwrap();

        let edges: Vec<&Edge> = network.iter().collect();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0], &Edge::new("A001", "B002"));
        assert_eq!(edges[1], &Edge::new("A001", "B003"));
    }

    #[test]
    fn test_duplicate_edge_suppressed() {
        let config = PipelineConfig::default();
        let network =
            Network::from_table(&table(&[&["A001", "B002"], &["A001", "B002"]]), &config).unwrap();

        assert_eq!(network.len(), 1);
        assert!(network.contains(&Edge::new("A001", "B002")));
    }

    #[test]
    fn test_dedup_across_deep_rows() {
        let config = PipelineConfig::default();
        let network = Network::from_table(
            &table(&[&["A001", "B002", "C003"], &["A001", "B002", "C004"]]),
            &config,
        )
        .unwrap();

        let edges: Vec<&Edge> = network.iter().collect();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0], &Edge::new("A001", "B002"));
        assert_eq!(edges[1], &Edge::new("B002", "C003"));
        assert_eq!(edges[2], &Edge::new("B002", "C004"));
    }

    #[test]
    fn test_full_bound_emits_innermost_pair() {
        let config = PipelineConfig::default();
        let network =
            Network::from_table(&table(&[&["A001", "B002", "C003"]]), &config).unwrap();

        assert!(network.contains(&Edge::new("B002", "C003")));
    }

    #[test]
    fn test_legacy_bound_skips_innermost_pair() {
        let config = PipelineConfig {
            legacy_column_bound: true,
            ..PipelineConfig::default()
        };
        let network =
            Network::from_table(&table(&[&["A001", "B002", "C003"]]), &config).unwrap();

        assert_eq!(network.len(), 1);
        assert!(network.contains(&Edge::new("A001", "B002")));
        assert!(!network.contains(&Edge::new("B002", "C003")));
    }

    #[test]
    fn test_root_code_excluded_from_edges() {
        let config = PipelineConfig::default();
        let network = Network::from_table(
            &table(&[&["E001", "A001", "B002"], &["A001", "B003"]]),
            &config,
        )
        .unwrap();

        let edges: Vec<&Edge> = network.iter().collect();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0], &Edge::new("A001", "B002"));
        assert_eq!(edges[1], &Edge::new("A001", "B003"));
    }

    #[test]
    fn test_root_exclusion_disabled() {
        let config = PipelineConfig {
            excluded_root: None,
            ..PipelineConfig::default()
        };
        let network = Network::from_table(&table(&[&["E001", "A001"]]), &config).unwrap();

        assert!(network.contains(&Edge::new("E001", "A001")));
    }

    #[test]
    fn test_single_level_rows_yield_nothing() {
        let config = PipelineConfig::default();
        let network = Network::from_table(&table(&[&["A001"]]), &config).unwrap();
        assert!(network.is_empty());
    }

    #[test]
    fn test_unit_codes_in_first_seen_order() {
        let config = PipelineConfig::default();
        let network = Network::from_table(
            &table(&[&["A001", "B002"], &["A001", "B003"]]),
            &config,
        )
        .unwrap();

        let codes: Vec<&str> = network.unit_codes().iter().map(|c| c.as_str()).collect();
        assert_eq!(codes, vec!["A001", "B002", "B003"]);
    }
}
