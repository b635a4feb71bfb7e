//! Collaborator trait for recipe lookup
//!
//! The aggregation pipeline only needs two operations from the recipe
//! database: which recipes use an ingredient, and a recipe's full
//! ingredient list. `CocktailDbClient` implements this over HTTP; tests
//! substitute a canned source.

use crate::services::cocktaildb::CocktailDbError;
use async_trait::async_trait;

/// Reference to one recipe in a filter result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeRef {
    /// Opaque recipe id (`idDrink`)
    pub id: String,
    /// Display name, when the source provides one
    pub name: Option<String>,
}

/// Abstract recipe-lookup collaborator
#[async_trait]
pub trait RecipeSource {
    /// Recipes that contain the given ingredient; may be empty
    async fn recipes_with_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<RecipeRef>, CocktailDbError>;

    /// Raw ingredient strings for one recipe; may be empty. Absent or
    /// blank ingredient slots are already omitted.
    async fn recipe_ingredients(&self, recipe_id: &str) -> Result<Vec<String>, CocktailDbError>;
}
