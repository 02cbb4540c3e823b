// src/infrastructure/repositories/postgres_taxonomy.rs
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{Slug, SlugLookup};
use crate::domain::taxonomy::{
    Category, CategoryId, CategoryRepository, NewCategory, NewTag, Tag, TagId, TagRepository,
};

#[derive(Clone)]
pub struct PostgresTagRepository {
    pool: PgPool,
}

impl PostgresTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TagRow {
    id: i64,
    name: String,
    slug: String,
}

impl TryFrom<TagRow> for Tag {
    type Error = DomainError;

    fn try_from(row: TagRow) -> Result<Self, Self::Error> {
        Ok(Tag {
            id: TagId::new(row.id)?,
            name: row.name,
            slug: Slug::new(row.slug)?,
        })
    }
}

#[async_trait]
impl SlugLookup for PostgresTagRepository {
    async fn slug_exists(&self, candidate: &str) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM tags WHERE slug = $1)")
            .bind(candidate)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn insert(&self, tag: NewTag) -> DomainResult<Tag> {
        let row = sqlx::query_as::<_, TagRow>(
            "INSERT INTO tags (name, slug) VALUES ($1, $2) RETURNING id, name, slug",
        )
        .bind(&tag.name)
        .bind(tag.slug.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Tag::try_from(row)
    }

    async fn list(&self) -> DomainResult<Vec<Tag>> {
        let rows = sqlx::query_as::<_, TagRow>("SELECT id, name, slug FROM tags ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Tag::try_from).collect()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Tag>> {
        let row = sqlx::query_as::<_, TagRow>("SELECT id, name, slug FROM tags WHERE slug = $1")
            .bind(slug.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Tag::try_from).transpose()
    }

    async fn find_by_slugs(&self, slugs: &[Slug]) -> DomainResult<Vec<Tag>> {
        if slugs.is_empty() {
            return Ok(vec![]);
        }
        let raw: Vec<&str> = slugs.iter().map(Slug::as_str).collect();
        let rows = sqlx::query_as::<_, TagRow>(
            "SELECT id, name, slug FROM tags WHERE slug = ANY($1) ORDER BY name",
        )
        .bind(&raw)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Tag::try_from).collect()
    }
}

#[derive(Clone)]
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    slug: String,
    description: String,
    parent_id: Option<i64>,
}

impl TryFrom<CategoryRow> for Category {
    type Error = DomainError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Category {
            id: CategoryId::new(row.id)?,
            name: row.name,
            slug: Slug::new(row.slug)?,
            description: row.description,
            parent_id: row.parent_id.map(CategoryId::new).transpose()?,
        })
    }
}

#[async_trait]
impl SlugLookup for PostgresCategoryRepository {
    async fn slug_exists(&self, candidate: &str) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM categories WHERE slug = $1)")
            .bind(candidate)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO categories (name, slug, description, parent_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, slug, description, parent_id",
        )
        .bind(&category.name)
        .bind(category.slug.as_str())
        .bind(&category.description)
        .bind(category.parent_id.map(i64::from))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Category::try_from(row)
    }

    async fn list(&self) -> DomainResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, description, parent_id FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Category::try_from).collect()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, description, parent_id FROM categories WHERE slug = $1",
        )
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Category::try_from).transpose()
    }

    async fn find_by_slugs(&self, slugs: &[Slug]) -> DomainResult<Vec<Category>> {
        if slugs.is_empty() {
            return Ok(vec![]);
        }
        let raw: Vec<&str> = slugs.iter().map(Slug::as_str).collect();
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, description, parent_id FROM categories
             WHERE slug = ANY($1) ORDER BY name",
        )
        .bind(&raw)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Category::try_from).collect()
    }
}
