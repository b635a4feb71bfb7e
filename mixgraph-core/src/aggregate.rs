//! Co-occurrence aggregation
//!
//! Consumes (recipe id, raw ingredient list) pairs, deduplicates by recipe
//! id, normalizes and filters each ingredient list against the vocabulary,
//! and accumulates symmetric pair counts over the retained recipe sets.
//!
//! # Algorithm
//! - `register_recipe`: first sighting of a recipe id wins; later
//!   sightings (the same cocktail discovered via a different ingredient's
//!   result set) are silently skipped. A recipe is retained only if its
//!   normalized, vocabulary-filtered ingredient set has two or more
//!   members; smaller sets contribute no pairs and are dropped entirely.
//! - `compute_pair_counts`: one full pass over the retained sets,
//!   incrementing every unordered C(n,2) pair by one. Recomputed from
//!   scratch on every call so registrations between calls cannot
//!   double-count.

use crate::normalize::normalize;
use crate::vocabulary::Vocabulary;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Unordered pair of distinct canonical ingredient names
///
/// The two names are stored lexicographically ordered, so `(A, B)` and
/// `(B, A)` construct the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IngredientPair {
    first: String,
    second: String,
}

impl IngredientPair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> IngredientPair {
        let a = a.into();
        let b = b.into();
        if a <= b {
            IngredientPair { first: a, second: b }
        } else {
            IngredientPair { first: b, second: a }
        }
    }

    /// Lexicographically smaller name
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Lexicographically larger name
    pub fn second(&self) -> &str {
        &self.second
    }
}

/// Pair-count result: recipes in which each unordered pair co-occurs
pub type PairCounts = HashMap<IngredientPair, u64>;

/// Co-occurrence aggregator
///
/// Owned accumulator state for one analysis run; construct one per run and
/// pass its results to the projection functions explicitly.
#[derive(Debug)]
pub struct CoOccurrenceAggregator {
    vocabulary: Vocabulary,
    /// Every recipe id ever registered (first-seen-wins dedup), including
    /// ids whose filtered set was too small to retain
    seen: HashSet<String>,
    /// Retained ingredient sets (cardinality >= 2), keyed by recipe id
    recipes: HashMap<String, BTreeSet<String>>,
    /// Normalized names that failed the vocabulary filter, by name
    excluded: BTreeMap<String, u64>,
}

impl CoOccurrenceAggregator {
    pub fn new(vocabulary: Vocabulary) -> CoOccurrenceAggregator {
        CoOccurrenceAggregator {
            vocabulary,
            seen: HashSet::new(),
            recipes: HashMap::new(),
            excluded: BTreeMap::new(),
        }
    }

    /// Vocabulary bounding this analysis
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Whether a recipe id has already been registered
    ///
    /// Lets the driver skip the detail fetch for recipes discovered via an
    /// earlier ingredient's result set.
    pub fn contains(&self, recipe_id: &str) -> bool {
        self.seen.contains(recipe_id)
    }

    /// Register one recipe's raw ingredient list
    ///
    /// Returns true if the recipe was retained for pair counting. Blank
    /// slots, unknown ingredients, and sets with fewer than two vocabulary
    /// members are dropped silently; a duplicate recipe id is a no-op.
    pub fn register_recipe<I, S>(&mut self, recipe_id: &str, raw_ingredients: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.seen.insert(recipe_id.to_string()) {
            tracing::debug!(recipe_id = %recipe_id, "Skipping already-registered recipe");
            return false;
        }

        let mut members = BTreeSet::new();
        for raw in raw_ingredients {
            let name = normalize(raw.as_ref());
            if name.is_empty() {
                continue;
            }
            if self.vocabulary.contains_canonical(&name) {
                members.insert(name);
            } else {
                *self.excluded.entry(name).or_insert(0) += 1;
            }
        }

        if members.len() < 2 {
            tracing::debug!(
                recipe_id = %recipe_id,
                members = members.len(),
                "Dropping recipe with fewer than two vocabulary ingredients"
            );
            return false;
        }

        self.recipes.insert(recipe_id.to_string(), members);
        true
    }

    /// Number of retained recipes
    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }

    /// Normalized names excluded by the vocabulary filter, with the number
    /// of recipe slots each was dropped from
    pub fn exclusion_counts(&self) -> &BTreeMap<String, u64> {
        &self.excluded
    }

    /// Compute pair counts over all retained recipes
    ///
    /// Pure function of the currently stored sets: always recomputes from
    /// scratch, so it may be called repeatedly and interleaved with
    /// further registrations.
    pub fn compute_pair_counts(&self) -> PairCounts {
        let mut counts = PairCounts::new();

        for members in self.recipes.values() {
            // BTreeSet iteration is sorted, so a < b for every emitted pair
            let members: Vec<&String> = members.iter().collect();
            for i in 0..members.len() {
                for j in (i + 1)..members.len() {
                    let pair = IngredientPair::new(members[i].clone(), members[j].clone());
                    *counts.entry(pair).or_insert(0) += 1;
                }
            }
        }

        counts
    }
}
