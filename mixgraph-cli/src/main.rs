//! mixgraph - cocktail ingredient co-occurrence analysis
//!
//! Loads the analyst ingredient vocabulary, discovers the cocktails using
//! each ingredient via TheCocktailDB, aggregates symmetric pair counts
//! over the deduplicated recipe corpus, and writes the ranked pair list
//! and dense connection matrix as CSV.

use anyhow::Result;
use clap::Parser;
use mixgraph_cli::services::cocktaildb::CocktailDbClient;
use mixgraph_cli::services::collector::collect_recipes;
use mixgraph_cli::{export, Args, Settings};
use mixgraph_core::{connection_matrix, sorted_edges, CoOccurrenceAggregator, Vocabulary};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting mixgraph v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let settings = Settings::resolve(&args)?;

    // Vocabulary failure is fatal: every downstream filter depends on it
    let vocabulary = Vocabulary::load_csv(&settings.ingredients)?;

    let client = CocktailDbClient::new(settings.api_key.as_deref())?;
    if settings.api_key.is_some() {
        info!("Using premium API (v2 endpoint, faster request pacing)");
    } else {
        info!("Using the public v1 endpoint; collection will take a while due to rate limiting");
    }

    let mut aggregator = CoOccurrenceAggregator::new(vocabulary);
    collect_recipes(&client, &mut aggregator).await;

    info!(
        recipes = aggregator.recipe_count(),
        "Calculating ingredient connections"
    );
    let counts = aggregator.compute_pair_counts();

    let edges = sorted_edges(&counts, None);
    export::write_edges_csv(&settings.edges_out, &edges)?;

    let matrix = connection_matrix(&counts, aggregator.vocabulary());
    export::write_matrix_csv(&settings.matrix_out, &matrix)?;

    export::log_top_edges(&edges, settings.top);

    info!("Analysis complete");
    info!(
        "Files created: {} (pair list), {} (matrix)",
        settings.edges_out.display(),
        settings.matrix_out.display()
    );

    Ok(())
}
