//! CSV output format tests
//!
//! The two output files are consumed downstream as-is, so these tests pin
//! the exact bytes produced for a small known corpus.

use mixgraph_cli::export::{write_edges_csv, write_matrix_csv};
use mixgraph_core::{connection_matrix, sorted_edges, CoOccurrenceAggregator, Vocabulary};

fn small_corpus() -> CoOccurrenceAggregator {
    let vocab = Vocabulary::from_names(["rum", "lime juice", "mint"]);
    let mut agg = CoOccurrenceAggregator::new(vocab);
    agg.register_recipe("1", ["light rum", "lime juice", "mint"]);
    agg.register_recipe("2", ["rum", "lime juice"]);
    agg
}

#[test]
fn edges_csv_exact_format() {
    let agg = small_corpus();
    let edges = sorted_edges(&agg.compute_pair_counts(), None);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ingredient_connections.csv");
    write_edges_csv(&path, &edges).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "Ingredient1,Ingredient2,Cocktail_Count\n\
         lime juice,rum,2\n\
         lime juice,mint,1\n\
         mint,rum,1\n"
    );
}

#[test]
fn matrix_csv_exact_format() {
    let agg = small_corpus();
    let counts = agg.compute_pair_counts();
    let matrix = connection_matrix(&counts, agg.vocabulary());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ingredient_matrix.csv");
    write_matrix_csv(&path, &matrix).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        ",lime juice,mint,rum\n\
         lime juice,0,1,2\n\
         mint,1,0,1\n\
         rum,2,1,0\n"
    );
}

#[test]
fn empty_corpus_still_writes_headers() {
    let vocab = Vocabulary::from_names(["rum", "mint"]);
    let agg = CoOccurrenceAggregator::new(vocab);
    let counts = agg.compute_pair_counts();

    let dir = tempfile::tempdir().unwrap();

    let edges_path = dir.path().join("edges.csv");
    write_edges_csv(&edges_path, &sorted_edges(&counts, None)).unwrap();
    assert_eq!(
        std::fs::read_to_string(&edges_path).unwrap(),
        "Ingredient1,Ingredient2,Cocktail_Count\n"
    );

    let matrix_path = dir.path().join("matrix.csv");
    write_matrix_csv(&matrix_path, &connection_matrix(&counts, agg.vocabulary())).unwrap();
    assert_eq!(
        std::fs::read_to_string(&matrix_path).unwrap(),
        ",mint,rum\nmint,0,0\nrum,0,0\n"
    );
}

#[test]
fn top_n_truncation_flows_through_to_csv() {
    let agg = small_corpus();
    let edges = sorted_edges(&agg.compute_pair_counts(), Some(1));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("top.csv");
    write_edges_csv(&path, &edges).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "Ingredient1,Ingredient2,Cocktail_Count\nlime juice,rum,2\n"
    );
}
