//! Ingredient name normalization
//!
//! TheCocktailDB's ingredient vocabulary and the analyst-supplied
//! vocabulary are independently authored and diverge on spirit-qualifier
//! granularity ("white rum" vs "rum") and diacritics. The synonym table
//! here is intentionally small, fixed, and hand-curated rather than a
//! fuzzy matcher: an unmapped divergent spelling simply fails the
//! vocabulary filter downstream and is excluded from the analysis.

/// Map a raw ingredient string to its canonical form
///
/// Total function: lowercases and trims, applies the synonym table once,
/// and passes unmapped names through unchanged.
pub fn normalize(raw: &str) -> String {
    let folded = raw.trim().to_lowercase();

    let mapped = match folded.as_str() {
        "lemon juice" => "fresh lemon juice",
        // All rum qualifiers collapse to the base spirit
        "white rum" | "light rum" | "dark rum" | "gold rum" | "aged rum" | "añejo rum"
        | "anejo rum" => "rum",
        // Diacritic variant
        "jägermeister" => "jagermeister",
        _ => return folded,
    };

    mapped.to_string()
}
