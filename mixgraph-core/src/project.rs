//! Output projections over a pair-count result
//!
//! Two read-only views: a descending-sorted edge list (optionally
//! truncated to the top N) and a dense symmetric adjacency matrix indexed
//! by the vocabulary's lexicographically sorted canonical names.

use crate::aggregate::PairCounts;
use crate::vocabulary::Vocabulary;
use std::cmp::Reverse;
use std::collections::HashMap;

/// One co-occurrence edge: an unordered ingredient pair and its count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Lexicographically smaller name
    pub first: String,
    /// Lexicographically larger name
    pub second: String,
    /// Number of recipes the pair co-occurs in
    pub count: u64,
}

/// Project pair counts as an edge list sorted by count descending
///
/// Ties are broken by pair name so identical input always yields
/// identical output. `top` truncates to the N highest-count edges.
pub fn sorted_edges(counts: &PairCounts, top: Option<usize>) -> Vec<Edge> {
    let mut edges: Vec<Edge> = counts
        .iter()
        .map(|(pair, &count)| Edge {
            first: pair.first().to_string(),
            second: pair.second().to_string(),
            count,
        })
        .collect();

    edges.sort_by_key(|e| (Reverse(e.count), e.first.clone(), e.second.clone()));

    if let Some(top) = top {
        edges.truncate(top);
    }

    edges
}

/// Dense symmetric co-occurrence matrix
///
/// Rows and columns are both indexed by the sorted canonical vocabulary;
/// the diagonal is always zero (no self-pairs exist upstream).
#[derive(Debug, Clone)]
pub struct ConnectionMatrix {
    names: Vec<String>,
    cells: Vec<Vec<u64>>,
}

impl ConnectionMatrix {
    /// Sorted canonical names indexing the rows and columns
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Cell value at (row, column)
    pub fn get(&self, row: usize, col: usize) -> u64 {
        self.cells[row][col]
    }

    /// Rows in index order, each a full row of counts
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[u64])> {
        self.names
            .iter()
            .zip(self.cells.iter())
            .map(|(name, row)| (name.as_str(), row.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Materialize pair counts as a dense symmetric matrix
///
/// Pairs whose names are not both in the vocabulary's index are skipped
/// silently; the upstream filter should make that impossible, but the
/// projection must not fail if it happens.
pub fn connection_matrix(counts: &PairCounts, vocabulary: &Vocabulary) -> ConnectionMatrix {
    let names = vocabulary.sorted_canonical();

    // Precomputed name -> index map for O(1) placement
    let index: HashMap<&str, usize> = names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut cells = vec![vec![0u64; names.len()]; names.len()];

    for (pair, &count) in counts {
        match (index.get(pair.first()), index.get(pair.second())) {
            (Some(&i), Some(&j)) => {
                cells[i][j] = count;
                cells[j][i] = count;
            }
            _ => {
                tracing::debug!(
                    first = %pair.first(),
                    second = %pair.second(),
                    "Skipping pair outside the vocabulary index"
                );
            }
        }
    }

    ConnectionMatrix { names, cells }
}
