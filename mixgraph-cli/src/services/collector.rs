//! Recipe collection pipeline
//!
//! Walks the vocabulary in its supplied order, discovers the recipes that
//! use each ingredient, resolves each new recipe's full ingredient list,
//! and feeds it into the aggregator. Lookup failures never abort the run:
//! a failed call is treated as an empty result and collection continues,
//! so one ingredient's outage cannot invalidate the whole corpus.

use crate::types::RecipeSource;
use mixgraph_core::{normalize, CoOccurrenceAggregator};
use tracing::{debug, info, warn};

/// Summary of one collection run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectStats {
    /// Vocabulary ingredients processed
    pub ingredients: usize,
    /// Recipes retained for pair counting
    pub registered: usize,
    /// Recipe sightings skipped because the id was already registered
    pub duplicates: usize,
    /// Fresh recipes dropped for having fewer than two vocabulary members
    pub dropped: usize,
    /// Lookup calls that failed and were treated as empty
    pub fetch_failures: usize,
}

/// Collect recipes for every vocabulary ingredient into the aggregator
pub async fn collect_recipes<S: RecipeSource>(
    source: &S,
    aggregator: &mut CoOccurrenceAggregator,
) -> CollectStats {
    let ingredients: Vec<String> = aggregator
        .vocabulary()
        .iter()
        .map(str::to_string)
        .collect();
    let total = ingredients.len();

    let mut stats = CollectStats::default();

    for (index, ingredient) in ingredients.iter().enumerate() {
        info!(
            ingredient = %ingredient,
            progress = format!("{}/{}", index + 1, total),
            "Processing ingredient"
        );

        let refs = fetch_recipes(source, ingredient, &mut stats).await;

        for recipe in refs {
            if aggregator.contains(&recipe.id) {
                stats.duplicates += 1;
                continue;
            }

            let raw_ingredients = match source.recipe_ingredients(&recipe.id).await {
                Ok(slots) => slots,
                Err(e) => {
                    warn!(
                        recipe_id = %recipe.id,
                        error = %e,
                        "Failed to fetch recipe ingredients, treating as empty"
                    );
                    stats.fetch_failures += 1;
                    Vec::new()
                }
            };

            if aggregator.register_recipe(&recipe.id, &raw_ingredients) {
                stats.registered += 1;
            } else {
                stats.dropped += 1;
            }
        }

        stats.ingredients += 1;
    }

    info!(
        ingredients = stats.ingredients,
        registered = stats.registered,
        duplicates = stats.duplicates,
        dropped = stats.dropped,
        fetch_failures = stats.fetch_failures,
        "Collection complete"
    );

    for (name, count) in aggregator.exclusion_counts() {
        debug!(ingredient = %name, occurrences = count, "Excluded by vocabulary filter");
    }

    stats
}

/// Fetch the recipe list for one ingredient
///
/// An empty result is retried once under the ingredient's normalized name
/// (the API and the vocabulary disagree on some spellings); failures are
/// logged and yield an empty list.
async fn fetch_recipes<S: RecipeSource>(
    source: &S,
    ingredient: &str,
    stats: &mut CollectStats,
) -> Vec<crate::types::RecipeRef> {
    let refs = match source.recipes_with_ingredient(ingredient).await {
        Ok(refs) => refs,
        Err(e) => {
            warn!(
                ingredient = %ingredient,
                error = %e,
                "Failed to fetch recipes for ingredient, treating as empty"
            );
            stats.fetch_failures += 1;
            return Vec::new();
        }
    };

    if !refs.is_empty() {
        return refs;
    }

    let simplified = normalize(ingredient);
    if simplified == ingredient.trim().to_lowercase() {
        return refs;
    }

    debug!(
        ingredient = %ingredient,
        simplified = %simplified,
        "No recipes found, retrying with simplified name"
    );

    match source.recipes_with_ingredient(&simplified).await {
        Ok(refs) => refs,
        Err(e) => {
            warn!(
                ingredient = %simplified,
                error = %e,
                "Failed to fetch recipes for simplified name, treating as empty"
            );
            stats.fetch_failures += 1;
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::cocktaildb::CocktailDbError;
    use crate::types::RecipeRef;
    use async_trait::async_trait;
    use mixgraph_core::Vocabulary;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned recipe source recording which recipe details were fetched
    #[derive(Default)]
    struct StubSource {
        filter: HashMap<String, Vec<RecipeRef>>,
        details: HashMap<String, Vec<String>>,
        failing_ingredients: Vec<String>,
        detail_fetches: Mutex<Vec<String>>,
    }

    impl StubSource {
        fn with_recipes(mut self, ingredient: &str, ids: &[&str]) -> Self {
            self.filter.insert(
                ingredient.to_string(),
                ids.iter()
                    .map(|id| RecipeRef {
                        id: id.to_string(),
                        name: None,
                    })
                    .collect(),
            );
            self
        }

        fn with_detail(mut self, id: &str, slots: &[&str]) -> Self {
            self.details.insert(
                id.to_string(),
                slots.iter().map(|s| s.to_string()).collect(),
            );
            self
        }

        fn failing(mut self, ingredient: &str) -> Self {
            self.failing_ingredients.push(ingredient.to_string());
            self
        }
    }

    #[async_trait]
    impl RecipeSource for StubSource {
        async fn recipes_with_ingredient(
            &self,
            ingredient: &str,
        ) -> Result<Vec<RecipeRef>, CocktailDbError> {
            if self.failing_ingredients.iter().any(|i| i == ingredient) {
                return Err(CocktailDbError::NetworkError("connection reset".into()));
            }
            Ok(self.filter.get(ingredient).cloned().unwrap_or_default())
        }

        async fn recipe_ingredients(
            &self,
            recipe_id: &str,
        ) -> Result<Vec<String>, CocktailDbError> {
            self.detail_fetches
                .lock()
                .unwrap()
                .push(recipe_id.to_string());
            Ok(self.details.get(recipe_id).cloned().unwrap_or_default())
        }
    }

    fn aggregator() -> CoOccurrenceAggregator {
        CoOccurrenceAggregator::new(Vocabulary::from_names(["rum", "lime juice", "mint"]))
    }

    #[tokio::test]
    async fn test_collects_and_registers_recipes() {
        let source = StubSource::default()
            .with_recipes("rum", &["1", "2"])
            .with_detail("1", &["Light rum", "Lime juice", "Mint"])
            .with_detail("2", &["Rum", "Lime juice"]);

        let mut agg = aggregator();
        let stats = collect_recipes(&source, &mut agg).await;

        assert_eq!(stats.registered, 2);
        assert_eq!(stats.fetch_failures, 0);
        assert_eq!(agg.recipe_count(), 2);

        let counts = agg.compute_pair_counts();
        assert_eq!(
            counts[&mixgraph_core::IngredientPair::new("lime juice", "rum")],
            2
        );
    }

    #[tokio::test]
    async fn test_duplicate_recipe_skips_detail_fetch() {
        // Recipe "1" shows up under two ingredients; its detail must be
        // fetched exactly once
        let source = StubSource::default()
            .with_recipes("rum", &["1"])
            .with_recipes("mint", &["1"])
            .with_detail("1", &["Rum", "Mint"]);

        let mut agg = aggregator();
        let stats = collect_recipes(&source, &mut agg).await;

        assert_eq!(stats.registered, 1);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(source.detail_fetches.lock().unwrap().as_slice(), ["1"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_recovered_as_empty() {
        let source = StubSource::default()
            .failing("rum")
            .with_recipes("mint", &["1"])
            .with_detail("1", &["Rum", "Mint"]);

        let mut agg = aggregator();
        let stats = collect_recipes(&source, &mut agg).await;

        // The failed ingredient contributes nothing but the run completes
        assert_eq!(stats.fetch_failures, 1);
        assert_eq!(stats.ingredients, 3);
        assert_eq!(stats.registered, 1);
    }

    #[tokio::test]
    async fn test_empty_result_retries_with_simplified_name() {
        // The vocabulary lists "White Rum", which the API does not index;
        // the retry under the simplified "rum" finds the recipe
        let source = StubSource::default()
            .with_recipes("rum", &["1"])
            .with_detail("1", &["Rum", "Mint"]);

        let mut agg = CoOccurrenceAggregator::new(Vocabulary::from_names(["White Rum", "rum", "mint"]));
        let stats = collect_recipes(&source, &mut agg).await;

        assert_eq!(stats.registered, 1);
        // The same recipe found again under "rum" itself is deduped
        assert_eq!(stats.duplicates, 1);
        assert_eq!(source.detail_fetches.lock().unwrap().as_slice(), ["1"]);
    }

    #[tokio::test]
    async fn test_small_recipes_are_dropped_not_counted() {
        let source = StubSource::default()
            .with_recipes("rum", &["1", "2"])
            .with_detail("1", &["Rum"])
            .with_detail("2", &["Rum", "Vodka", "Tonic"]);

        let mut agg = aggregator();
        let stats = collect_recipes(&source, &mut agg).await;

        assert_eq!(stats.registered, 0);
        assert_eq!(stats.dropped, 2);
        assert!(agg.compute_pair_counts().is_empty());
    }
}
