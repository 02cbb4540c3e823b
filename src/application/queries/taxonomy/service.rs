// src/application/queries/taxonomy/service.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::{CategoryDto, TagDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        slug::Slug,
        taxonomy::{CategoryRepository, TagRepository},
    },
};

pub struct TaxonomyQueryService {
    tag_repo: Arc<dyn TagRepository>,
    category_repo: Arc<dyn CategoryRepository>,
}

impl TaxonomyQueryService {
    pub fn new(
        tag_repo: Arc<dyn TagRepository>,
        category_repo: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            tag_repo,
            category_repo,
        }
    }

    pub async fn list_tags(&self) -> ApplicationResult<Vec<TagDto>> {
        let tags = self.tag_repo.list().await?;
        Ok(tags.into_iter().map(Into::into).collect())
    }

    pub async fn get_tag_by_slug(&self, slug: String) -> ApplicationResult<TagDto> {
        let slug = Slug::new(slug)?;
        self.tag_repo
            .find_by_slug(&slug)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found("tag not found"))
    }

    pub async fn list_categories(&self) -> ApplicationResult<Vec<CategoryDto>> {
        let categories = self.category_repo.list().await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    pub async fn get_category_by_slug(&self, slug: String) -> ApplicationResult<CategoryDto> {
        let slug = Slug::new(slug)?;
        self.category_repo
            .find_by_slug(&slug)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found("category not found"))
    }
}
