use geneliste_core::tree::ROOT_INDEX;
use geneliste_core::{
    build_tree, parse_segments, render_genealogy, try_render_genealogy, GeneConfig, LineageTree,
    Record, TreeBuildError, MISSING_LINEAGE_DIAGNOSTIC,
};

const STAMP: &str = "2026-02-14 21:27:22";

/// Rendered text without the title line and the blank line after it.
fn body_of(text: &str) -> &str {
    text.split_once("\n\n").map(|(_, body)| body).unwrap_or(text)
}

fn headers() -> Vec<String> {
    ["ID", "Gene", "Nom", "Prenom", "S", "Naiss_AAAA"]
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn person(id: &str, gene: &str, nom: &str) -> Record {
    Record::from_pairs([("ID", id), ("Gene", gene), ("Nom", nom)])
}

fn collect_paths(tree: &LineageTree<'_>) -> Vec<Vec<String>> {
    let mut paths = Vec::new();
    let mut stack = vec![(ROOT_INDEX, Vec::new())];
    while let Some((idx, path)) = stack.pop() {
        for child in tree.sorted_children(idx, None) {
            let mut child_path: Vec<String> = path.clone();
            child_path.push(tree.node(child).token().unwrap().to_string());
            paths.push(child_path.clone());
            stack.push((child, child_path));
        }
    }
    paths
}

#[test]
fn spouse_renders_inline_and_children_sorted() {
    let records = vec![
        person("1", "#a#b#", "X"),
        person("2", "#a#c#", "Y"),
        person("3", "#a#0#", "Z"),
    ];
    let text = render_genealogy(&records, &headers(), &GeneConfig::default(), STAMP);

    assert_eq!(
        text,
        "Genealogy tree (generated 2026-02-14 21:27:22)\n\
         \n\
         └── a & Z\n\
         \x20   ├── b X\n\
         \x20   └── c Y\n"
    );
}

#[test]
fn nested_branches_draw_continuation_bars() {
    let records = vec![
        person("1", "#1#", "A"),
        person("2", "#1#1#", "B"),
        person("3", "#1#1#1#", "C"),
        person("4", "#1#2#", "D"),
        person("5", "#2#", "E"),
        person("6", "#10#", "F"),
        person("7", "#1#0#", "S"),
    ];
    let text = render_genealogy(&records, &headers(), &GeneConfig::default(), STAMP);

    let expected = [
        "├── 1 A & S",
        "│   ├── 1 B",
        "│   │   └── 1 C",
        "│   └── 2 D",
        "├── 2 E",
        "└── 10 F",
        "",
    ]
    .join("\n");
    assert_eq!(body_of(&text), expected);
}

#[test]
fn labels_include_given_name_and_details() {
    let records = vec![
        Record::from_pairs([
            ("ID", "3"),
            ("Gene", "&1a&2a&"),
            ("Nom", "FRAISSINET"),
            ("Prenom", "Marc"),
            ("S", "M"),
            ("Naiss_AAAA", "1864"),
        ]),
        Record::from_pairs([
            ("ID", "4"),
            ("Gene", "&1a&2a&0"),
            ("Nom", "COUVE"),
            ("Prenom", "Eugénie"),
            ("S", "F"),
            ("Naiss_AAAA", "1871"),
        ]),
        Record::from_pairs([("ID", "5"), ("Gene", "#1a#2a#3a#")]),
    ];
    let text = render_genealogy(&records, &headers(), &GeneConfig::default(), STAMP);

    let expected = [
        "└── 1a",
        "    └── 2a FRAISSINET Marc [M 1864] & COUVE Eugénie [F 1871]",
        "        └── 3a (no name)",
        "",
    ]
    .join("\n");
    assert_eq!(body_of(&text), expected);
}

#[test]
fn spouse_node_without_record_appends_nothing() {
    let records = vec![person("1", "#a#", "X"), person("2", "#a#0#z#", "Q")];
    let text = render_genealogy(&records, &headers(), &GeneConfig::default(), STAMP);
    assert_eq!(body_of(&text), "└── a X\n");
    assert!(!text.contains('Q'));
}

#[test]
fn empty_dataset_renders_placeholder() {
    let text = render_genealogy(&[], &headers(), &GeneConfig::default(), STAMP);
    assert_eq!(text, "Genealogy tree (generated 2026-02-14 21:27:22)\n\nno data\n");

    let blank = vec![person("1", "  ", "X"), person("2", "#&#", "Y")];
    let text = render_genealogy(&blank, &headers(), &GeneConfig::default(), STAMP);
    assert_eq!(body_of(&text), "no data\n");
}

#[test]
fn root_level_spouse_codes_render_no_data() {
    let records = vec![person("1", "#0#", "Solo"), person("2", "&0&", "Other")];
    let text = render_genealogy(&records, &headers(), &GeneConfig::default(), STAMP);

    assert_eq!(body_of(&text), "no data\n");
    assert!(!text.contains("Solo"));
    assert!(!text.contains("Other"));
}

#[test]
fn missing_lineage_column_yields_exact_diagnostic() {
    let headers: Vec<String> = vec!["ID".to_string(), "Nom".to_string()];
    let records = vec![Record::from_pairs([("ID", "1"), ("Nom", "X")])];

    let text = render_genealogy(&records, &headers, &GeneConfig::default(), STAMP);
    assert_eq!(text, MISSING_LINEAGE_DIAGNOSTIC);

    let err = try_render_genealogy(&records, &headers, &GeneConfig::default(), STAMP).unwrap_err();
    assert!(matches!(err, TreeBuildError::MissingLineageColumn { .. }));
}

#[test]
fn lineage_column_matches_case_insensitively() {
    let headers: Vec<String> = vec!["id".to_string(), "GENE".to_string(), "nom".to_string()];
    let records = vec![Record::from_pairs([("id", "1"), ("GENE", "#a#"), ("nom", "X")])];
    let text = render_genealogy(&records, &headers, &GeneConfig::default(), STAMP);
    assert_eq!(body_of(&text), "└── a X\n");
}

#[test]
fn sibling_order_is_natural_and_case_insensitive() {
    let records = vec![
        person("1", "#10#", "ten"),
        person("2", "#9#", "nine"),
        person("3", "#b#", "bee"),
        person("4", "#A#", "ay"),
        person("5", "#é#", "e-acute"),
    ];
    let text = render_genealogy(&records, &headers(), &GeneConfig::default(), STAMP);
    let tokens: Vec<&str> = body_of(&text)
        .lines()
        .map(|line| line.split_whitespace().nth(1).unwrap())
        .collect();
    assert_eq!(tokens, vec!["9", "10", "A", "b", "é"]);
}

#[test]
fn every_node_path_is_a_prefix_of_some_record() {
    let records = vec![
        person("1", "#aa#ba#ca#", "X"),
        person("2", "&aa&bb&", "Y"),
        person("3", "#zz#", "Z"),
        person("4", "#aa#ba#ca#da#ea#fd#", "W"),
    ];
    let tree = build_tree(&records, &headers(), "Gene").unwrap();
    let record_paths: Vec<Vec<String>> = records
        .iter()
        .map(|record| parse_segments(record.get("Gene")))
        .collect();

    let node_paths = collect_paths(&tree);
    assert_eq!(node_paths.len(), tree.node_count() - 1);
    for path in node_paths {
        assert!(
            record_paths
                .iter()
                .any(|segments| segments.starts_with(&path)),
            "path {path:?} is not a prefix of any record"
        );
    }
}

#[test]
fn duplicate_full_paths_keep_first_sorted_record() {
    let records = vec![
        person("1", "#a#", "first"),
        person("2", "#a#", "second"),
        person("3", "&a&", "legacy"),
    ];
    let tree = build_tree(&records, &headers(), "Gene").unwrap();
    let a = tree.find(&["a"]).unwrap();
    // "#a#" sorts before "&a&" and the sort is stable, so id 1 wins.
    assert_eq!(tree.node(a).record().unwrap().get("ID"), "1");
}

#[test]
fn rerendering_is_stable_apart_from_timestamp() {
    let records = vec![
        person("1", "#a#b#", "X"),
        person("2", "#a#c#", "Y"),
        person("3", "#a#0#", "Z"),
        person("4", "#b#", "W"),
    ];
    let config = GeneConfig::default();
    let first = render_genealogy(&records, &headers(), &config, "2026-01-01 00:00:00");
    let second = render_genealogy(&records, &headers(), &config, "2026-01-02 00:00:00");

    assert_ne!(first, second);
    assert_eq!(body_of(&first), body_of(&second));
    assert_eq!(
        first,
        render_genealogy(&records, &headers(), &config, "2026-01-01 00:00:00")
    );
}
