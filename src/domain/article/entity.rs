// src/domain/article/entity.rs
use chrono::{DateTime, Utc};

use crate::domain::article::value_objects::{ArticleBody, ArticleId, ArticleStatus, ArticleTitle};
use crate::domain::slug::Slug;
use crate::domain::taxonomy::{Category, CategoryId, Tag, TagId};
use crate::domain::user::UserId;

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub slug: Slug,
    pub summary: String,
    pub body: ArticleBody,
    pub source: Option<String>,
    pub source_url: Option<String>,
    pub image_url: Option<String>,
    pub author_id: UserId,
    pub status: ArticleStatus,
    pub is_featured: bool,
    pub view_count: i64,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<Tag>,
    pub categories: Vec<Category>,
}

impl Article {
    pub fn is_published(&self) -> bool {
        self.status == ArticleStatus::Published
    }

    /// Idempotent; `published_at` is set on the first publish only, so the
    /// public date survives an archive / re-publish cycle.
    pub fn publish(&mut self, now: DateTime<Utc>) {
        self.status = ArticleStatus::Published;
        if self.published_at.is_none() {
            self.published_at = Some(now);
        }
        self.updated_at = now;
    }

    pub fn archive(&mut self, now: DateTime<Utc>) {
        self.status = ArticleStatus::Archived;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub slug: Slug,
    pub summary: String,
    pub body: ArticleBody,
    pub source: Option<String>,
    pub source_url: Option<String>,
    pub image_url: Option<String>,
    pub author_id: UserId,
    pub status: ArticleStatus,
    pub is_featured: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tag_ids: Vec<TagId>,
    pub category_ids: Vec<CategoryId>,
}

#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub status: ArticleStatus,
    pub published_at: Option<DateTime<Utc>>,
}

/// Partial write against an article row, guarded by the optimistic
/// `original_updated_at` check. The slug is deliberately absent: it is
/// assigned at creation and never rewritten.
#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub id: ArticleId,
    pub title: Option<ArticleTitle>,
    pub summary: Option<String>,
    pub body: Option<ArticleBody>,
    pub source: Option<String>,
    pub source_url: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: Option<bool>,
    pub status_change: Option<StatusUpdate>,
    pub tag_ids: Option<Vec<TagId>>,
    pub category_ids: Option<Vec<CategoryId>>,
    pub original_updated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleUpdate {
    pub fn new(id: ArticleId, original_updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            summary: None,
            body: None,
            source: None,
            source_url: None,
            image_url: None,
            is_featured: None,
            status_change: None,
            tag_ids: None,
            category_ids: None,
            original_updated_at,
            updated_at: original_updated_at,
        }
    }

    pub fn with_title(mut self, title: ArticleTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_summary(mut self, summary: String) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_body(mut self, body: ArticleBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_status_change(
        mut self,
        status: ArticleStatus,
        published_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.status_change = Some(StatusUpdate {
            status,
            published_at,
        });
        self
    }

    pub fn set_updated_at(&mut self, updated_at: DateTime<Utc>) {
        self.updated_at = updated_at;
    }
}
