//! Indented text rendering of a lineage tree.
//!
//! # Responsibility
//! - Build one display label per record.
//! - Walk the tree depth-first in sibling order and draw box connectors.
//! - Attach the spouse-marked child inline on its parent's line.
//!
//! # Invariants
//! - The spouse token is looked up by key and never drawn as a branch.
//! - Record-less nodes still draw their token so descendants stay anchored.
//! - Rendering has no error path and no side effects.
//!
//! # Example Output
//! ```text
//! Genealogy tree (generated 2026-02-14 21:27:22)
//!
//! └── a & Z
//!     ├── b X
//!     └── c Y
//! ```

use crate::model::record::{ColumnMap, Record};
use crate::tree::builder::{LineageTree, NodeIndex, ROOT_INDEX};
use serde::{Deserialize, Serialize};

/// Body emitted in place of a tree when the lineage column cannot be resolved.
pub const MISSING_LINEAGE_DIAGNOSTIC: &str =
    "Lineage column not found: the genealogy tree cannot be built.";

/// Glyphs and literals used by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStyle {
    /// Child token rendered inline as the parent's spouse.
    pub spouse_marker: String,
    /// Separator placed before a spouse label.
    pub spouse_joiner: String,
    /// Label used when both name fields are blank.
    pub unnamed: String,
    /// Sole body line for a tree without any lineage path.
    pub empty_body: String,
    pub branch: String,
    pub last_branch: String,
    pub continuation: String,
    pub blank: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            spouse_marker: "0".to_string(),
            spouse_joiner: " & ".to_string(),
            unnamed: "(no name)".to_string(),
            empty_body: "no data".to_string(),
            branch: "├── ".to_string(),
            last_branch: "└── ".to_string(),
            continuation: "│   ".to_string(),
            blank: "    ".to_string(),
        }
    }
}

/// Title line embedding the generation timestamp.
pub fn header_line(timestamp: &str) -> String {
    format!("Genealogy tree (generated {timestamp})")
}

/// Builds the display label for `record`.
///
/// `"{family} {given} [{sex} {birth year}]"`, with the bracket group left out
/// when both of its parts are blank.
pub fn record_label(record: &Record, columns: &ColumnMap, style: &RenderStyle) -> String {
    let name = join_present(&[
        record.get_opt(columns.family_name.as_deref()),
        record.get_opt(columns.given_name.as_deref()),
    ]);
    let details = join_present(&[
        record.get_opt(columns.sex.as_deref()),
        record.get_opt(columns.birth_year.as_deref()),
    ]);

    let mut label = if name.is_empty() {
        style.unnamed.clone()
    } else {
        name
    };
    if !details.is_empty() {
        label.push_str(&format!(" [{details}]"));
    }
    label
}

fn join_present(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the whole tree, header included.
pub fn render_text(
    tree: &LineageTree<'_>,
    columns: &ColumnMap,
    timestamp: &str,
    style: &RenderStyle,
) -> String {
    let mut out = String::new();
    out.push_str(&header_line(timestamp));
    out.push_str("\n\n");

    let roots = tree.sorted_children(ROOT_INDEX, Some(style.spouse_marker.as_str()));
    if roots.is_empty() {
        out.push_str(&style.empty_body);
        out.push('\n');
        return out;
    }

    let renderer = TextRenderer {
        tree,
        columns,
        style,
    };
    let last = roots.len() - 1;
    for (position, idx) in roots.into_iter().enumerate() {
        renderer.write_node(&mut out, idx, "", position == last);
    }
    out
}

struct TextRenderer<'a, 'r> {
    tree: &'a LineageTree<'r>,
    columns: &'a ColumnMap,
    style: &'a RenderStyle,
}

impl TextRenderer<'_, '_> {
    fn write_node(&self, out: &mut String, idx: NodeIndex, prefix: &str, is_last: bool) {
        let node = self.tree.node(idx);
        let connector = if is_last {
            &self.style.last_branch
        } else {
            &self.style.branch
        };

        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(node.token().unwrap_or_default());
        if let Some(record) = node.record() {
            out.push(' ');
            out.push_str(&record_label(record, self.columns, self.style));
        }
        if let Some(spouse) = node
            .child(&self.style.spouse_marker)
            .and_then(|spouse_idx| self.tree.node(spouse_idx).record())
        {
            out.push_str(&self.style.spouse_joiner);
            out.push_str(&record_label(spouse, self.columns, self.style));
        }
        out.push('\n');

        let children = self
            .tree
            .sorted_children(idx, Some(self.style.spouse_marker.as_str()));
        if children.is_empty() {
            return;
        }
        let child_prefix = format!(
            "{prefix}{}",
            if is_last {
                &self.style.blank
            } else {
                &self.style.continuation
            }
        );
        let last = children.len() - 1;
        for (position, child) in children.into_iter().enumerate() {
            self.write_node(out, child, &child_prefix, position == last);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{record_label, render_text, RenderStyle};
    use crate::model::record::{ColumnMap, ColumnNames, Record};
    use crate::tree::builder::build_tree;

    fn columns() -> ColumnMap {
        let headers: Vec<String> = ["ID", "Gene", "Nom", "Prenom", "S", "Naiss_AAAA"]
            .iter()
            .map(|name| name.to_string())
            .collect();
        ColumnMap::resolve(&headers, &ColumnNames::default())
    }

    #[test]
    fn label_joins_names_and_details() {
        let record = Record::from_pairs([
            ("Nom", "FRAISSINET"),
            ("Prenom", " Marc "),
            ("S", "M"),
            ("Naiss_AAAA", "1864"),
        ]);
        assert_eq!(
            record_label(&record, &columns(), &RenderStyle::default()),
            "FRAISSINET Marc [M 1864]"
        );
    }

    #[test]
    fn label_falls_back_and_omits_empty_details() {
        let style = RenderStyle::default();
        assert_eq!(record_label(&Record::new(), &columns(), &style), "(no name)");

        let record = Record::from_pairs([("Prenom", "Eugénie"), ("Naiss_AAAA", "1871")]);
        assert_eq!(record_label(&record, &columns(), &style), "Eugénie [1871]");
    }

    #[test]
    fn label_ignores_unresolved_columns() {
        let record = Record::from_pairs([("Nom", "COUVE"), ("S", "F")]);
        assert_eq!(
            record_label(&record, &ColumnMap::default(), &RenderStyle::default()),
            "(no name)"
        );
    }

    #[test]
    fn root_spouse_alone_leaves_empty_body() {
        let headers: Vec<String> = ["ID", "Gene", "Nom"]
            .iter()
            .map(|name| name.to_string())
            .collect();
        let records = vec![Record::from_pairs([("ID", "1"), ("Gene", "#0#"), ("Nom", "Solo")])];
        let tree = build_tree(&records, &headers, "Gene").unwrap();
        assert_eq!(tree.node_count(), 2);

        let text = render_text(&tree, &columns(), "t", &RenderStyle::default());
        assert_eq!(text, "Genealogy tree (generated t)\n\nno data\n");
    }
}
