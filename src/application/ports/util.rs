// src/application/ports/util.rs

/// Deterministic title-to-base-slug normalization: lowercase,
/// transliterate, collapse non-alphanumeric runs to a hyphen, trim.
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;
}
