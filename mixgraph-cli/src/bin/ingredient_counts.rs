//! mixgraph-counts - per-ingredient recipe counts
//!
//! Standalone utility: fetches TheCocktailDB's full ingredient list, then
//! the number of cocktails using each ingredient, and writes the counts
//! sorted descending. Useful for choosing which ingredients to put in the
//! analysis vocabulary.

use anyhow::Result;
use clap::Parser;
use mixgraph_cli::services::cocktaildb::CocktailDbClient;
use mixgraph_cli::types::RecipeSource;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "mixgraph-counts",
    about = "Count cocktails per ingredient in TheCocktailDB",
    version
)]
struct Args {
    /// TheCocktailDB premium API key (selects the v2 endpoint)
    #[arg(long, env = mixgraph_cli::config::API_KEY_ENV)]
    api_key: Option<String>,

    /// Output CSV path
    #[arg(long, default_value = "ingredient_counts.csv")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting mixgraph-counts v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let client = CocktailDbClient::new(args.api_key.as_deref())?;

    info!("Fetching list of ingredients");
    let ingredients = client.list_ingredients().await?;
    info!(count = ingredients.len(), "Fetching cocktail counts");

    let mut counts: Vec<(String, usize)> = Vec::with_capacity(ingredients.len());
    for (index, ingredient) in ingredients.iter().enumerate() {
        // One ingredient's failure must not end the run
        let count = match client.recipes_with_ingredient(ingredient).await {
            Ok(recipes) => recipes.len(),
            Err(e) => {
                warn!(ingredient = %ingredient, error = %e, "Count fetch failed, recording 0");
                0
            }
        };

        info!(
            ingredient = %ingredient,
            count,
            progress = format!("{}/{}", index + 1, ingredients.len()),
            "Counted cocktails"
        );
        counts.push((ingredient.clone(), count));
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut writer = csv::Writer::from_path(&args.out)?;
    writer.write_record(["ingredient", "cocktail_count"])?;
    for (ingredient, count) in &counts {
        let count = count.to_string();
        writer.write_record([ingredient.as_str(), count.as_str()])?;
    }
    writer.flush()?;

    info!(path = %args.out.display(), total = counts.len(), "Data written");

    info!("Top 10 ingredients by cocktail count:");
    for (ingredient, count) in counts.iter().take(10) {
        info!("{}: {} cocktails", ingredient, count);
    }

    Ok(())
}
