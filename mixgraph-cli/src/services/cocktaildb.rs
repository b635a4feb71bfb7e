//! TheCocktailDB API client
//!
//! Rate-limited HTTP client for the two lookup operations the pipeline
//! needs (recipes by ingredient, recipe detail) plus the ingredient list
//! used by the counts utility. A premium API key selects the v2 endpoint
//! and a faster request pace; without one the public v1 test key is used.

use crate::types::{RecipeRef, RecipeSource};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

const COCKTAILDB_HOST: &str = "https://www.thecocktaildb.com/api/json";
const USER_AGENT: &str = "mixgraph/0.1.0 (https://github.com/mixgraph/mixgraph)";
/// Request pacing without a premium key
const FREE_RATE_LIMIT_MS: u64 = 100;
/// Request pacing with a premium key
const PREMIUM_RATE_LIMIT_MS: u64 = 50;
/// Ingredient slots per drink record (strIngredient1..15)
const INGREDIENT_SLOTS: usize = 15;

/// TheCocktailDB client errors
#[derive(Debug, Error)]
pub enum CocktailDbError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// `filter.php` / `lookup.php` / `list.php` response envelope
///
/// The API signals "no results" as `"drinks": null`, and the free tier
/// occasionally as a bare string; anything that is not an array is
/// treated as empty at this one boundary.
#[derive(Debug, Deserialize)]
struct DrinksEnvelope {
    #[serde(default)]
    drinks: Option<Value>,
}

impl DrinksEnvelope {
    fn into_records(self) -> Vec<Value> {
        match self.drinks {
            Some(Value::Array(records)) => records,
            _ => Vec::new(),
        }
    }
}

/// One drink record from `lookup.php`
///
/// Only the id is typed; the 15 `strIngredient1..15` slots (and the rest
/// of the wide record) land in `fields` and are read positionally.
#[derive(Debug, Clone, Deserialize)]
pub struct DrinkDetail {
    #[serde(rename = "idDrink")]
    pub id: String,
    #[serde(rename = "strDrink")]
    pub name: Option<String>,
    #[serde(flatten)]
    fields: serde_json::Map<String, Value>,
}

impl DrinkDetail {
    /// Non-blank ingredient slot values, trimmed, in slot order
    pub fn ingredient_slots(&self) -> Vec<String> {
        (1..=INGREDIENT_SLOTS)
            .filter_map(|i| self.fields.get(&format!("strIngredient{}", i)))
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|slot| !slot.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Rate limiter enforcing a minimum interval between requests
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval_ms: u64) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval: Duration::from_millis(min_interval_ms),
        }
    }

    /// Wait if necessary to comply with the rate limit
    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// TheCocktailDB API client
pub struct CocktailDbClient {
    http_client: reqwest::Client,
    base_url: String,
    rate_limiter: Arc<RateLimiter>,
}

impl CocktailDbClient {
    pub fn new(api_key: Option<&str>) -> Result<Self, CocktailDbError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CocktailDbError::NetworkError(e.to_string()))?;

        let (version, key, rate_limit_ms) = match api_key {
            Some(key) => ("v2", key.to_string(), PREMIUM_RATE_LIMIT_MS),
            None => ("v1", "1".to_string(), FREE_RATE_LIMIT_MS),
        };

        Ok(Self {
            http_client,
            base_url: format!("{}/{}/{}", COCKTAILDB_HOST, version, key),
            rate_limiter: Arc::new(RateLimiter::new(rate_limit_ms)),
        })
    }

    /// Fetch one endpoint and decode the `drinks` envelope
    async fn fetch_drinks(
        &self,
        endpoint: &str,
        query: &str,
    ) -> Result<Vec<Value>, CocktailDbError> {
        self.rate_limiter.wait().await;

        let url = format!("{}/{}", self.base_url, endpoint);

        tracing::debug!(url = %url, query = %query, "Querying TheCocktailDB");

        let response = self
            .http_client
            .get(&url)
            .query(&[("i", query)])
            .send()
            .await
            .map_err(|e| CocktailDbError::NetworkError(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CocktailDbError::ApiError(status.as_u16(), error_text));
        }

        let envelope: DrinksEnvelope = response
            .json()
            .await
            .map_err(|e| CocktailDbError::ParseError(e.to_string()))?;

        Ok(envelope.into_records())
    }

    /// Full drink detail for one recipe id (`lookup.php`)
    pub async fn recipe_details(
        &self,
        recipe_id: &str,
    ) -> Result<Option<DrinkDetail>, CocktailDbError> {
        let records = self.fetch_drinks("lookup.php", recipe_id).await?;

        let Some(record) = records.into_iter().next() else {
            return Ok(None);
        };

        let detail: DrinkDetail = serde_json::from_value(record)
            .map_err(|e| CocktailDbError::ParseError(e.to_string()))?;

        Ok(Some(detail))
    }

    /// All ingredient names known to the API (`list.php?i=list`)
    pub async fn list_ingredients(&self) -> Result<Vec<String>, CocktailDbError> {
        let records = self.fetch_drinks("list.php", "list").await?;

        Ok(records
            .iter()
            .filter_map(|record| record.get("strIngredient1"))
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect())
    }
}

#[async_trait]
impl RecipeSource for CocktailDbClient {
    /// Recipes containing an ingredient (`filter.php`)
    ///
    /// The API expects multi-word ingredient names with underscores in
    /// place of spaces. No results is an empty list, not an error.
    async fn recipes_with_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<RecipeRef>, CocktailDbError> {
        let query = ingredient.replace(' ', "_");
        let records = self.fetch_drinks("filter.php", &query).await?;

        let refs: Vec<RecipeRef> = records
            .iter()
            .filter_map(|record| {
                let id = record.get("idDrink")?.as_str()?.to_string();
                let name = record
                    .get("strDrink")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                Some(RecipeRef { id, name })
            })
            .collect();

        tracing::debug!(
            ingredient = %ingredient,
            recipes = refs.len(),
            "Fetched recipes for ingredient"
        );

        Ok(refs)
    }

    async fn recipe_ingredients(&self, recipe_id: &str) -> Result<Vec<String>, CocktailDbError> {
        let slots = match self.recipe_details(recipe_id).await? {
            Some(detail) => detail.ingredient_slots(),
            None => Vec::new(),
        };

        Ok(slots)
    }
}
