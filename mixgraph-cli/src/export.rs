//! CSV projections of the aggregation result
//!
//! Output formats are fixed for downstream compatibility:
//! - edge list: `Ingredient1,Ingredient2,Cocktail_Count`, one row per
//!   pair, descending by count;
//! - matrix: blank cell then the sorted ingredient names as the header
//!   row, then one row per ingredient with its counts in the same order.

use mixgraph_core::{ConnectionMatrix, Edge, Result};
use std::path::Path;
use tracing::info;

/// Write the ranked pair list
pub fn write_edges_csv(path: impl AsRef<Path>, edges: &[Edge]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(["Ingredient1", "Ingredient2", "Cocktail_Count"])?;
    for edge in edges {
        let count = edge.count.to_string();
        writer.write_record([edge.first.as_str(), edge.second.as_str(), count.as_str()])?;
    }
    writer.flush()?;

    info!(path = %path.display(), pairs = edges.len(), "Saved ingredient connections");

    Ok(())
}

/// Write the dense connection matrix
pub fn write_matrix_csv(path: impl AsRef<Path>, matrix: &ConnectionMatrix) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = Vec::with_capacity(matrix.len() + 1);
    header.push("");
    header.extend(matrix.names().iter().map(String::as_str));
    writer.write_record(&header)?;

    for (name, row) in matrix.rows() {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(name.to_string());
        record.extend(row.iter().map(u64::to_string));
        writer.write_record(&record)?;
    }
    writer.flush()?;

    info!(path = %path.display(), ingredients = matrix.len(), "Saved connection matrix");

    Ok(())
}

/// Log the top N connections as a ranked list
pub fn log_top_edges(edges: &[Edge], top_n: usize) {
    info!("Top {} ingredient connections:", top_n.min(edges.len()));
    for (rank, edge) in edges.iter().take(top_n).enumerate() {
        info!(
            "{:2}. {} + {}: {} cocktails",
            rank + 1,
            edge.first,
            edge.second,
            edge.count
        );
    }
}
