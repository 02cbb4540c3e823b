// src/infrastructure/repositories/postgres_article.rs
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::map_sqlx;
use crate::domain::article::{
    Article, ArticleBody, ArticleId, ArticleListCursor, ArticleListFilter, ArticleReadRepository,
    ArticleStatus, ArticleTitle, ArticleUpdate, ArticleWriteRepository, NewArticle,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{Slug, SlugLookup};
use crate::domain::taxonomy::{Category, CategoryId, Tag, TagId};
use crate::domain::user::UserId;

const ARTICLE_COLUMNS: &str = "id, title, slug, summary, body, source, source_url, image_url, \
     author_id, status, is_featured, view_count, published_at, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresArticleWriteRepository {
    pool: PgPool,
}

impl PostgresArticleWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresArticleReadRepository {
    pool: PgPool,
}

impl PostgresArticleReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    slug: String,
    summary: String,
    body: String,
    source: Option<String>,
    source_url: Option<String>,
    image_url: Option<String>,
    author_id: i64,
    status: String,
    is_featured: bool,
    view_count: i64,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ArticleRow {
    fn into_article(self, tags: Vec<Tag>, categories: Vec<Category>) -> DomainResult<Article> {
        Ok(Article {
            id: ArticleId::new(self.id)?,
            title: ArticleTitle::new(self.title)?,
            slug: Slug::new(self.slug)?,
            summary: self.summary,
            body: ArticleBody::new(self.body)?,
            source: self.source,
            source_url: self.source_url,
            image_url: self.image_url,
            author_id: UserId::new(self.author_id)?,
            status: self.status.parse::<ArticleStatus>()?,
            is_featured: self.is_featured,
            view_count: self.view_count,
            published_at: self.published_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
            tags,
            categories,
        })
    }
}

#[derive(Debug, FromRow)]
struct ArticleTagRow {
    article_id: i64,
    id: i64,
    name: String,
    slug: String,
}

#[derive(Debug, FromRow)]
struct ArticleCategoryRow {
    article_id: i64,
    id: i64,
    name: String,
    slug: String,
    description: String,
    parent_id: Option<i64>,
}

/// Hydrate the tag and category links for a batch of article rows with two
/// `ANY($ids)` queries instead of per-row lookups.
async fn load_taxonomy(
    pool: &PgPool,
    article_ids: &[i64],
) -> DomainResult<(HashMap<i64, Vec<Tag>>, HashMap<i64, Vec<Category>>)> {
    if article_ids.is_empty() {
        return Ok((HashMap::new(), HashMap::new()));
    }

    let tag_rows = sqlx::query_as::<_, ArticleTagRow>(
        "SELECT at.article_id, t.id, t.name, t.slug
         FROM article_tags at
         JOIN tags t ON t.id = at.tag_id
         WHERE at.article_id = ANY($1)
         ORDER BY t.name",
    )
    .bind(article_ids)
    .fetch_all(pool)
    .await
    .map_err(map_sqlx)?;

    let mut tags: HashMap<i64, Vec<Tag>> = HashMap::new();
    for row in tag_rows {
        tags.entry(row.article_id).or_default().push(Tag {
            id: TagId::new(row.id)?,
            name: row.name,
            slug: Slug::new(row.slug)?,
        });
    }

    let category_rows = sqlx::query_as::<_, ArticleCategoryRow>(
        "SELECT ac.article_id, c.id, c.name, c.slug, c.description, c.parent_id
         FROM article_categories ac
         JOIN categories c ON c.id = ac.category_id
         WHERE ac.article_id = ANY($1)
         ORDER BY c.name",
    )
    .bind(article_ids)
    .fetch_all(pool)
    .await
    .map_err(map_sqlx)?;

    let mut categories: HashMap<i64, Vec<Category>> = HashMap::new();
    for row in category_rows {
        categories.entry(row.article_id).or_default().push(Category {
            id: CategoryId::new(row.id)?,
            name: row.name,
            slug: Slug::new(row.slug)?,
            description: row.description,
            parent_id: row.parent_id.map(CategoryId::new).transpose()?,
        });
    }

    Ok((tags, categories))
}

async fn hydrate_rows(pool: &PgPool, rows: Vec<ArticleRow>) -> DomainResult<Vec<Article>> {
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let (mut tags, mut categories) = load_taxonomy(pool, &ids).await?;

    rows.into_iter()
        .map(|row| {
            let row_tags = tags.remove(&row.id).unwrap_or_default();
            let row_categories = categories.remove(&row.id).unwrap_or_default();
            row.into_article(row_tags, row_categories)
        })
        .collect()
}

async fn hydrate_row(pool: &PgPool, row: ArticleRow) -> DomainResult<Article> {
    let mut articles = hydrate_rows(pool, vec![row]).await?;
    articles
        .pop()
        .ok_or_else(|| DomainError::Persistence("hydration dropped a row".into()))
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleWriteRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            title,
            slug,
            summary,
            body,
            source,
            source_url,
            image_url,
            author_id,
            status,
            is_featured,
            published_at,
            created_at,
            updated_at,
            tag_ids,
            category_ids,
        } = article;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "INSERT INTO articles (title, slug, summary, body, source, source_url, image_url, \
             author_id, status, is_featured, published_at, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {ARTICLE_COLUMNS}",
        ))
        .bind(title.as_str())
        .bind(slug.as_str())
        .bind(&summary)
        .bind(body.as_str())
        .bind(&source)
        .bind(&source_url)
        .bind(&image_url)
        .bind(i64::from(author_id))
        .bind(status.as_str())
        .bind(is_featured)
        .bind(published_at)
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        link_taxonomy(&mut tx, row.id, &tag_ids, &category_ids).await?;

        tx.commit().await.map_err(map_sqlx)?;

        hydrate_row(&self.pool, row).await
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let ArticleUpdate {
            id,
            title,
            summary,
            body,
            source,
            source_url,
            image_url,
            is_featured,
            status_change,
            tag_ids,
            category_ids,
            original_updated_at,
            updated_at,
        } = update;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE articles SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(String::from(title));
        }
        if let Some(summary) = summary {
            builder.push(", summary = ");
            builder.push_bind(summary);
        }
        if let Some(body) = body {
            builder.push(", body = ");
            builder.push_bind(String::from(body));
        }
        if let Some(source) = source {
            builder.push(", source = ");
            builder.push_bind(source);
        }
        if let Some(source_url) = source_url {
            builder.push(", source_url = ");
            builder.push_bind(source_url);
        }
        if let Some(image_url) = image_url {
            builder.push(", image_url = ");
            builder.push_bind(image_url);
        }
        if let Some(is_featured) = is_featured {
            builder.push(", is_featured = ");
            builder.push_bind(is_featured);
        }
        if let Some(state) = status_change {
            builder.push(", status = ");
            builder.push_bind(state.status.as_str());
            builder.push(", published_at = ");
            builder.push_bind(state.published_at);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" AND updated_at = ");
        builder.push_bind(original_updated_at);
        builder.push(" RETURNING ");
        builder.push(ARTICLE_COLUMNS);

        let maybe_row = builder
            .build_query_as::<ArticleRow>()
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let row = maybe_row
            .ok_or_else(|| DomainError::Conflict("article update conflict, please retry".into()))?;

        if let Some(tag_ids) = tag_ids {
            sqlx::query("DELETE FROM article_tags WHERE article_id = $1")
                .bind(row.id)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
            link_tags(&mut tx, row.id, &tag_ids).await?;
        }
        if let Some(category_ids) = category_ids {
            sqlx::query("DELETE FROM article_categories WHERE article_id = $1")
                .bind(row.id)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
            link_categories(&mut tx, row.id, &category_ids).await?;
        }

        tx.commit().await.map_err(map_sqlx)?;

        hydrate_row(&self.pool, row).await
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }
        Ok(())
    }
}

async fn link_taxonomy(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    article_id: i64,
    tag_ids: &[TagId],
    category_ids: &[CategoryId],
) -> DomainResult<()> {
    link_tags(tx, article_id, tag_ids).await?;
    link_categories(tx, article_id, category_ids).await
}

async fn link_tags(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    article_id: i64,
    tag_ids: &[TagId],
) -> DomainResult<()> {
    if tag_ids.is_empty() {
        return Ok(());
    }
    let ids: Vec<i64> = tag_ids.iter().copied().map(i64::from).collect();
    sqlx::query(
        "INSERT INTO article_tags (article_id, tag_id)
         SELECT $1, unnest($2::BIGINT[])",
    )
    .bind(article_id)
    .bind(&ids)
    .execute(&mut **tx)
    .await
    .map_err(map_sqlx)?;
    Ok(())
}

async fn link_categories(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    article_id: i64,
    category_ids: &[CategoryId],
) -> DomainResult<()> {
    if category_ids.is_empty() {
        return Ok(());
    }
    let ids: Vec<i64> = category_ids.iter().copied().map(i64::from).collect();
    sqlx::query(
        "INSERT INTO article_categories (article_id, category_id)
         SELECT $1, unnest($2::BIGINT[])",
    )
    .bind(article_id)
    .bind(&ids)
    .execute(&mut **tx)
    .await
    .map_err(map_sqlx)?;
    Ok(())
}

fn apply_filter<'a>(builder: &mut QueryBuilder<'a, Postgres>, filter: &'a ArticleListFilter) {
    // WHERE TRUE keeps every later clause a plain AND.
    builder.push(" WHERE TRUE");

    if !filter.include_unpublished {
        builder.push(" AND status = 'published'");
    } else if let Some(status) = filter.status {
        builder.push(" AND status = ");
        builder.push_bind(status.as_str());
    }

    if let Some(tag) = &filter.tag {
        builder.push(
            " AND EXISTS (SELECT 1 FROM article_tags at JOIN tags t ON t.id = at.tag_id \
             WHERE at.article_id = articles.id AND t.slug = ",
        );
        builder.push_bind(tag.as_str());
        builder.push(")");
    }

    if let Some(category) = &filter.category {
        builder.push(
            " AND EXISTS (SELECT 1 FROM article_categories ac \
             JOIN categories c ON c.id = ac.category_id \
             WHERE ac.article_id = articles.id AND c.slug = ",
        );
        builder.push_bind(category.as_str());
        builder.push(")");
    }

    if let Some(featured) = filter.featured {
        builder.push(" AND is_featured = ");
        builder.push_bind(featured);
    }

    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        builder.push(" AND (title ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR summary ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR body ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }
}

#[async_trait]
impl SlugLookup for PostgresArticleReadRepository {
    async fn slug_exists(&self, candidate: &str) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM articles WHERE slug = $1)")
            .bind(candidate)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleReadRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1",
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        match row {
            Some(row) => Ok(Some(hydrate_row(&self.pool, row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE slug = $1",
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        match row {
            Some(row) => Ok(Some(hydrate_row(&self.pool, row).await?)),
            None => Ok(None),
        }
    }

    async fn list_page(
        &self,
        filter: &ArticleListFilter,
        limit: u32,
        cursor: Option<ArticleListCursor>,
    ) -> DomainResult<(Vec<Article>, Option<ArticleListCursor>)> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles"
        ));
        apply_filter(&mut builder, filter);

        if let Some(cursor) = &cursor {
            builder.push(" AND (created_at, id) < (");
            builder.push_bind(cursor.created_at);
            builder.push(", ");
            builder.push_bind(cursor.id);
            builder.push(")");
        }

        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        // Over-fetch one row to learn whether another page exists.
        builder.push_bind(i64::from(limit) + 1);

        let mut rows = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let next_cursor = if rows.len() > limit as usize {
            rows.truncate(limit as usize);
            rows.last()
                .map(|row| ArticleListCursor::new(row.created_at, row.id))
        } else {
            None
        };

        let articles = hydrate_rows(&self.pool, rows).await?;
        Ok((articles, next_cursor))
    }

    async fn increment_view_count(&self, id: ArticleId) -> DomainResult<()> {
        sqlx::query("UPDATE articles SET view_count = view_count + 1 WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }
}
