// src/domain/taxonomy/repository.rs
use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::slug::{Slug, SlugLookup};
use crate::domain::taxonomy::entity::{Category, NewCategory, NewTag, Tag};

#[async_trait]
pub trait TagRepository: SlugLookup {
    async fn insert(&self, tag: NewTag) -> DomainResult<Tag>;
    async fn list(&self) -> DomainResult<Vec<Tag>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Tag>>;
    /// Resolve a batch of slugs; absent slugs are simply missing from the
    /// result, letting the caller report which ones.
    async fn find_by_slugs(&self, slugs: &[Slug]) -> DomainResult<Vec<Tag>>;
}

#[async_trait]
pub trait CategoryRepository: SlugLookup {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category>;
    async fn list(&self) -> DomainResult<Vec<Category>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Category>>;
    async fn find_by_slugs(&self, slugs: &[Slug]) -> DomainResult<Vec<Category>>;
}
