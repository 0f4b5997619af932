//! Prefix tree assembly from lineage codes.
//!
//! # Responsibility
//! - Resolve the lineage column and insert every record along its path.
//! - Keep nodes in an index-addressed arena; traversal is strictly top-down.
//!
//! # Invariants
//! - Node `0` is the synthetic root (`token = None`, `record = None`).
//! - Every other node is reached by exactly one token path from the root.
//! - A node keeps the first record that lands on it in sorted order; later
//!   records with the same full path are dropped.

use crate::lineage::{compare_tokens, parse_segments, TokenComparator};
use crate::model::record::{find_column, Record};
use log::{debug, info};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Index of a node inside [`LineageTree`].
pub type NodeIndex = usize;

/// Arena index of the synthetic root.
pub const ROOT_INDEX: NodeIndex = 0;

/// Errors raised before any tree is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeBuildError {
    /// No header matches the configured lineage column.
    MissingLineageColumn { column: String },
}

impl Display for TreeBuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingLineageColumn { column } => {
                write!(f, "lineage column `{column}` not found in headers")
            }
        }
    }
}

impl Error for TreeBuildError {}

/// One unique lineage path prefix.
#[derive(Debug, Clone)]
pub struct LineageNode<'r> {
    token: Option<String>,
    record: Option<&'r Record>,
    children: HashMap<String, NodeIndex>,
}

impl<'r> LineageNode<'r> {
    fn new(token: Option<String>) -> Self {
        Self {
            token,
            record: None,
            children: HashMap::new(),
        }
    }

    /// Last path token reaching this node; `None` only for the root.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Record whose full lineage path ends here, if any.
    pub fn record(&self) -> Option<&'r Record> {
        self.record
    }

    /// Child index for `token`.
    pub fn child(&self, token: &str) -> Option<NodeIndex> {
        self.children.get(token).copied()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// Genealogy prefix tree borrowing the records it was built from.
#[derive(Debug, Clone)]
pub struct LineageTree<'r> {
    nodes: Vec<LineageNode<'r>>,
    comparator: TokenComparator,
}

impl<'r> LineageTree<'r> {
    fn with_root(comparator: TokenComparator) -> Self {
        Self {
            nodes: vec![LineageNode::new(None)],
            comparator,
        }
    }

    pub fn root(&self) -> &LineageNode<'r> {
        &self.nodes[ROOT_INDEX]
    }

    /// Returns the node at `idx`.
    ///
    /// # Panics
    /// Panics if `idx` was not produced by this tree.
    pub fn node(&self, idx: NodeIndex) -> &LineageNode<'r> {
        &self.nodes[idx]
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Follows `path` from the root.
    pub fn find(&self, path: &[&str]) -> Option<NodeIndex> {
        path.iter()
            .try_fold(ROOT_INDEX, |idx, token| self.nodes[idx].child(token))
    }

    /// Children of `idx` sorted by the tree comparator, excluding `skip_token`.
    pub fn sorted_children(&self, idx: NodeIndex, skip_token: Option<&str>) -> Vec<NodeIndex> {
        let mut children: Vec<(&str, NodeIndex)> = self.nodes[idx]
            .children
            .iter()
            .filter(|(token, _)| Some(token.as_str()) != skip_token)
            .map(|(token, child)| (token.as_str(), *child))
            .collect();
        children.sort_by(|(a, _), (b, _)| (self.comparator)(a, b));
        children.into_iter().map(|(_, child)| child).collect()
    }

    /// Descends from the root along `segments`, creating missing nodes.
    fn insert_path(&mut self, segments: Vec<String>) -> NodeIndex {
        let mut current = ROOT_INDEX;
        for segment in segments {
            current = match self.nodes[current].child(&segment) {
                Some(existing) => existing,
                None => {
                    let idx = self.nodes.len();
                    self.nodes.push(LineageNode::new(Some(segment.clone())));
                    self.nodes[current].children.insert(segment, idx);
                    idx
                }
            };
        }
        current
    }
}

/// Builds lineage trees with a configurable token order.
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder {
    comparator: TokenComparator,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// Creates a builder using [`compare_tokens`].
    pub fn new() -> Self {
        Self {
            comparator: compare_tokens,
        }
    }

    /// Replaces the ordering used for the record pre-sort and sibling order.
    pub fn with_comparator(comparator: TokenComparator) -> Self {
        Self { comparator }
    }

    /// Builds the tree for `records`.
    ///
    /// `lineage_column` is matched case-insensitively against `headers`.
    ///
    /// # Errors
    /// - `MissingLineageColumn` when no header matches.
    pub fn build<'r>(
        &self,
        records: &'r [Record],
        headers: &[String],
        lineage_column: &str,
    ) -> Result<LineageTree<'r>, TreeBuildError> {
        let column =
            find_column(headers, lineage_column).ok_or_else(|| TreeBuildError::MissingLineageColumn {
                column: lineage_column.to_string(),
            })?;

        let mut coded: Vec<(&str, &'r Record)> = records
            .iter()
            .map(|record| (record.get(&column).trim(), record))
            .filter(|(code, _)| !code.is_empty())
            .collect();
        coded.sort_by(|(a, _), (b, _)| (self.comparator)(a, b));

        let mut tree = LineageTree::with_root(self.comparator);
        let mut dropped = 0usize;
        for (code, record) in coded {
            let segments = parse_segments(code);
            if segments.is_empty() {
                debug!("event=tree_insert module=tree status=skipped reason=no_segments");
                dropped += 1;
                continue;
            }
            let idx = tree.insert_path(segments);
            let node = &mut tree.nodes[idx];
            if node.record.is_none() {
                node.record = Some(record);
            } else {
                debug!("event=tree_insert module=tree status=skipped reason=duplicate_path code={code}");
                dropped += 1;
            }
        }

        info!(
            "event=tree_build module=tree status=ok records={} nodes={} dropped={}",
            records.len(),
            tree.node_count(),
            dropped
        );
        Ok(tree)
    }
}

/// Builds a tree with the default natural token order.
pub fn build_tree<'r>(
    records: &'r [Record],
    headers: &[String],
    lineage_column: &str,
) -> Result<LineageTree<'r>, TreeBuildError> {
    TreeBuilder::new().build(records, headers, lineage_column)
}
