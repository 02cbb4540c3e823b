// src/application/dto/articles.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::taxonomy::{CategoryDto, TagDto};
use crate::domain::article::{Article, ArticleStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub author_id: i64,
    pub status: ArticleStatus,
    pub is_featured: bool,
    pub view_count: i64,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<TagDto>,
    pub categories: Vec<CategoryDto>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.into(),
            title: article.title.into(),
            slug: article.slug.into(),
            summary: article.summary,
            body: article.body.into(),
            source: article.source,
            source_url: article.source_url,
            image_url: article.image_url,
            author_id: article.author_id.into(),
            status: article.status,
            is_featured: article.is_featured,
            view_count: article.view_count,
            published_at: article.published_at,
            created_at: article.created_at,
            updated_at: article.updated_at,
            tags: article.tags.into_iter().map(Into::into).collect(),
            categories: article.categories.into_iter().map(Into::into).collect(),
        }
    }
}
