// src/domain/article/repository.rs
use async_trait::async_trait;

use crate::domain::article::entity::{Article, ArticleUpdate, NewArticle};
use crate::domain::article::value_objects::{ArticleId, ArticleListCursor, ArticleStatus};
use crate::domain::errors::DomainResult;
use crate::domain::slug::{Slug, SlugLookup};

#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;
    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article>;
    async fn delete(&self, id: ArticleId) -> DomainResult<()>;
}

/// Listing constraints assembled by the query layer. `include_unpublished`
/// false forces published-only regardless of the status filter.
#[derive(Debug, Clone, Default)]
pub struct ArticleListFilter {
    pub include_unpublished: bool,
    pub status: Option<ArticleStatus>,
    pub tag: Option<Slug>,
    pub category: Option<Slug>,
    pub featured: Option<bool>,
    pub search: Option<String>,
}

#[async_trait]
pub trait ArticleReadRepository: SlugLookup {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Article>>;
    async fn list_page(
        &self,
        filter: &ArticleListFilter,
        limit: u32,
        cursor: Option<ArticleListCursor>,
    ) -> DomainResult<(Vec<Article>, Option<ArticleListCursor>)>;
    async fn increment_view_count(&self, id: ArticleId) -> DomainResult<()>;
}
