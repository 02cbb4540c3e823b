// src/application/commands/articles/service.rs
use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        article::{ArticleReadRepository, ArticleWriteRepository},
        slug::{Slug, SlugAssigner},
        taxonomy::{CategoryId, CategoryRepository, TagId, TagRepository},
    },
};

pub struct ArticleCommandService {
    pub(super) write_repo: Arc<dyn ArticleWriteRepository>,
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) tag_repo: Arc<dyn TagRepository>,
    pub(super) category_repo: Arc<dyn CategoryRepository>,
    pub(super) slug_assigner: Arc<SlugAssigner>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ArticleCommandService {
    pub fn new(
        write_repo: Arc<dyn ArticleWriteRepository>,
        read_repo: Arc<dyn ArticleReadRepository>,
        tag_repo: Arc<dyn TagRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        slug_assigner: Arc<SlugAssigner>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            tag_repo,
            category_repo,
            slug_assigner,
            clock,
        }
    }

    pub(super) fn parse_slugs(raw: &[String]) -> ApplicationResult<Vec<Slug>> {
        raw.iter()
            .map(|s| Slug::new(s.clone()).map_err(ApplicationError::from))
            .collect()
    }

    /// Resolve tag slugs to ids, rejecting the request when any are unknown.
    pub(super) async fn resolve_tags(&self, raw: &[String]) -> ApplicationResult<Vec<TagId>> {
        if raw.is_empty() {
            return Ok(vec![]);
        }
        let slugs = Self::parse_slugs(raw)?;
        let tags = self.tag_repo.find_by_slugs(&slugs).await?;
        if tags.len() != slugs.len() {
            let found: Vec<&str> = tags.iter().map(|t| t.slug.as_str()).collect();
            let missing: Vec<&str> = slugs
                .iter()
                .map(Slug::as_str)
                .filter(|s| !found.contains(s))
                .collect();
            return Err(ApplicationError::validation(format!(
                "unknown tags: {}",
                missing.join(", ")
            )));
        }
        Ok(tags.into_iter().map(|t| t.id).collect())
    }

    pub(super) async fn resolve_categories(
        &self,
        raw: &[String],
    ) -> ApplicationResult<Vec<CategoryId>> {
        if raw.is_empty() {
            return Ok(vec![]);
        }
        let slugs = Self::parse_slugs(raw)?;
        let categories = self.category_repo.find_by_slugs(&slugs).await?;
        if categories.len() != slugs.len() {
            let found: Vec<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
            let missing: Vec<&str> = slugs
                .iter()
                .map(Slug::as_str)
                .filter(|s| !found.contains(s))
                .collect();
            return Err(ApplicationError::validation(format!(
                "unknown categories: {}",
                missing.join(", ")
            )));
        }
        Ok(categories.into_iter().map(|c| c.id).collect())
    }
}
