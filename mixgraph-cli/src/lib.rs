//! mixgraph-cli library interface
//!
//! Exposes the TheCocktailDB client, collection pipeline, configuration,
//! and CSV export for the binaries and for integration testing. The
//! aggregation logic itself lives in `mixgraph-core`.

pub mod config;
pub mod export;
pub mod services;
pub mod types;

pub use config::{Args, Settings};
pub use services::cocktaildb::{CocktailDbClient, CocktailDbError};
pub use services::collector::{collect_recipes, CollectStats};
pub use types::{RecipeRef, RecipeSource};
