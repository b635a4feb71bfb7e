//! # Mixgraph Core Library
//!
//! Ingredient co-occurrence aggregation for cocktail recipe data:
//! - Ingredient vocabulary loading (the analysis allow-list)
//! - Ingredient name normalization (API vs. vocabulary spelling)
//! - Recipe deduplication and symmetric pair counting
//! - Output projections (ranked edge list, dense adjacency matrix)
//!
//! Everything in this crate is pure and synchronous; network fetch and
//! CSV emission live in `mixgraph-cli`.

pub mod aggregate;
pub mod error;
pub mod normalize;
pub mod project;
pub mod vocabulary;

pub use aggregate::{CoOccurrenceAggregator, IngredientPair, PairCounts};
pub use error::{Error, Result};
pub use normalize::normalize;
pub use project::{connection_matrix, sorted_edges, ConnectionMatrix, Edge};
pub use vocabulary::Vocabulary;
