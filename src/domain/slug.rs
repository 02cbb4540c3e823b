// src/domain/slug.rs
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::util::SlugGenerator;
use crate::domain::errors::{DomainError, DomainResult};

/// Base used when a title normalizes to the empty string (empty or
/// all-punctuation input). Uniqueness probing still applies on top of it.
pub const FALLBACK_SLUG_BASE: &str = "untitled";

/// URL-safe identifier: lowercase ASCII alphanumerics separated by single
/// hyphens, no leading or trailing hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let well_formed = !value.is_empty()
            && !value.starts_with('-')
            && !value.ends_with('-')
            && !value.contains("--")
            && value
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

        if well_formed {
            Ok(Self(value))
        } else {
            Err(DomainError::Validation(
                "slug must be lowercase alphanumerics separated by single hyphens".into(),
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

/// Point query against the record set owning a slug column. Implemented by
/// the article, tag, and category repositories; tests inject a map-backed
/// stub.
#[async_trait]
pub trait SlugLookup: Send + Sync {
    async fn slug_exists(&self, candidate: &str) -> DomainResult<bool>;
}

/// Derives a unique slug for a new record from human-readable source text.
///
/// The assigner never writes; the caller persists the returned slug and the
/// storage layer's UNIQUE constraint turns a concurrent-create race into a
/// `Conflict` the caller can retry with fresh existence information.
pub struct SlugAssigner {
    generator: Arc<dyn SlugGenerator>,
}

impl SlugAssigner {
    pub fn new(generator: Arc<dyn SlugGenerator>) -> Self {
        Self { generator }
    }

    /// Normalize `source` and probe `lookup` for the first free candidate:
    /// the base itself, then `base-1`, `base-2`, ...
    pub async fn assign<L>(&self, source: &str, lookup: &L) -> DomainResult<Slug>
    where
        L: SlugLookup + ?Sized,
    {
        let base = self.generator.slugify(source);
        let base = if base.is_empty() {
            FALLBACK_SLUG_BASE.to_string()
        } else {
            base
        };

        let mut candidate = base.clone();
        let mut counter = 1u64;
        loop {
            if !lookup.slug_exists(&candidate).await? {
                return Slug::new(candidate);
            }
            candidate = format!("{base}-{counter}");
            counter += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::util::DefaultSlugGenerator;
    use std::collections::HashSet;

    struct TakenSlugs(HashSet<String>);

    impl TakenSlugs {
        fn new(slugs: &[&str]) -> Self {
            Self(slugs.iter().map(|s| s.to_string()).collect())
        }
    }

    #[async_trait]
    impl SlugLookup for TakenSlugs {
        async fn slug_exists(&self, candidate: &str) -> DomainResult<bool> {
            Ok(self.0.contains(candidate))
        }
    }

    fn assigner() -> SlugAssigner {
        SlugAssigner::new(Arc::new(DefaultSlugGenerator))
    }

    #[test]
    fn slug_accepts_kebab_case() {
        assert!(Slug::new("world-news").is_ok());
        assert!(Slug::new("a1-b2-c3").is_ok());
    }

    #[test]
    fn slug_rejects_malformed_input() {
        for bad in ["", "-lead", "trail-", "dou--ble", "Upper", "with space", "utf√"] {
            assert!(Slug::new(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[tokio::test]
    async fn fresh_title_keeps_normalized_base() {
        let slug = assigner()
            .assign("Breaking: Market Update!", &TakenSlugs::new(&[]))
            .await
            .unwrap();
        assert_eq!(slug.as_str(), "breaking-market-update");
    }

    #[tokio::test]
    async fn collision_appends_first_counter() {
        let slug = assigner()
            .assign("World News", &TakenSlugs::new(&["world-news"]))
            .await
            .unwrap();
        assert_eq!(slug.as_str(), "world-news-1");
    }

    #[tokio::test]
    async fn counter_skips_every_taken_suffix() {
        let slug = assigner()
            .assign("A", &TakenSlugs::new(&["a", "a-1", "a-2"]))
            .await
            .unwrap();
        assert_eq!(slug.as_str(), "a-3");
    }

    #[tokio::test]
    async fn normalization_is_deterministic() {
        let lookup = TakenSlugs::new(&[]);
        let first = assigner().assign("Étude №5: intro", &lookup).await.unwrap();
        let second = assigner().assign("Étude №5: intro", &lookup).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn empty_normalization_falls_back() {
        let slug = assigner().assign("!!!", &TakenSlugs::new(&[])).await.unwrap();
        assert_eq!(slug.as_str(), FALLBACK_SLUG_BASE);

        let slug = assigner()
            .assign("", &TakenSlugs::new(&[FALLBACK_SLUG_BASE]))
            .await
            .unwrap();
        assert_eq!(slug.as_str(), "untitled-1");
    }
}
