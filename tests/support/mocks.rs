// tests/support/mocks.rs
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

use newsdesk::application::dto::{AuthTokenDto, AuthenticatedUser, TokenSubject};
use newsdesk::application::error::{ApplicationError, ApplicationResult};
use newsdesk::application::ports::security::{PasswordHasher, TokenManager};
use newsdesk::application::ports::time::Clock;
use newsdesk::domain::article::{
    Article, ArticleId, ArticleListCursor, ArticleListFilter, ArticleReadRepository,
    ArticleUpdate, ArticleWriteRepository, NewArticle,
};
use newsdesk::domain::errors::{DomainError, DomainResult};
use newsdesk::domain::slug::{Slug, SlugLookup};
use newsdesk::domain::taxonomy::{
    Category, CategoryId, CategoryRepository, NewCategory, NewTag, Tag, TagId, TagRepository,
};
use newsdesk::domain::user::{NewUser, User, UserId, UserRepository, UserUpdate, Username};

static FIXED_NOW: Lazy<DateTime<Utc>> = Lazy::new(|| {
    DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
        .expect("invalid RFC3339 in tests/support/mocks.rs")
        .with_timezone(&Utc)
});

pub fn fixed_now() -> DateTime<Utc> {
    *FIXED_NOW
}

#[derive(Clone)]
pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        fixed_now()
    }
}

/* -------------------------------- articles -------------------------------- */

/// Map-backed article store shared by the write and read repository traits.
#[derive(Default)]
pub struct InMemoryArticleRepo {
    articles: Mutex<HashMap<i64, Article>>,
    tags: Vec<Tag>,
    categories: Vec<Category>,
    next_id: AtomicI64,
}

impl InMemoryArticleRepo {
    pub fn new() -> Self {
        Self {
            articles: Mutex::new(HashMap::new()),
            tags: vec![],
            categories: vec![],
            next_id: AtomicI64::new(1),
        }
    }

    /// Known taxonomy entries used to hydrate inserted link ids.
    pub fn with_taxonomy(tags: Vec<Tag>, categories: Vec<Category>) -> Self {
        Self {
            articles: Mutex::new(HashMap::new()),
            tags,
            categories,
            next_id: AtomicI64::new(1),
        }
    }

    fn tags_for(&self, ids: &[TagId]) -> Vec<Tag> {
        self.tags
            .iter()
            .filter(|tag| ids.contains(&tag.id))
            .cloned()
            .collect()
    }

    fn categories_for(&self, ids: &[CategoryId]) -> Vec<Category> {
        self.categories
            .iter()
            .filter(|category| ids.contains(&category.id))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl SlugLookup for InMemoryArticleRepo {
    async fn slug_exists(&self, candidate: &str) -> DomainResult<bool> {
        let map = self.articles.lock().unwrap();
        Ok(map.values().any(|a| a.slug.as_str() == candidate))
    }
}

#[async_trait]
impl ArticleWriteRepository for InMemoryArticleRepo {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let mut map = self.articles.lock().unwrap();
        if map
            .values()
            .any(|existing| existing.slug == article.slug)
        {
            return Err(DomainError::Conflict("article slug already exists".into()));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = Article {
            id: ArticleId::new(id)?,
            title: article.title,
            slug: article.slug,
            summary: article.summary,
            body: article.body,
            source: article.source,
            source_url: article.source_url,
            image_url: article.image_url,
            author_id: article.author_id,
            status: article.status,
            is_featured: article.is_featured,
            view_count: 0,
            published_at: article.published_at,
            created_at: article.created_at,
            updated_at: article.updated_at,
            tags: self.tags_for(&article.tag_ids),
            categories: self.categories_for(&article.category_ids),
        };
        map.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let mut map = self.articles.lock().unwrap();
        let article = map
            .get_mut(&i64::from(update.id))
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;

        if article.updated_at != update.original_updated_at {
            return Err(DomainError::Conflict(
                "article update conflict, please retry".into(),
            ));
        }

        if let Some(title) = update.title {
            article.title = title;
        }
        if let Some(summary) = update.summary {
            article.summary = summary;
        }
        if let Some(body) = update.body {
            article.body = body;
        }
        if let Some(source) = update.source {
            article.source = Some(source);
        }
        if let Some(source_url) = update.source_url {
            article.source_url = Some(source_url);
        }
        if let Some(image_url) = update.image_url {
            article.image_url = Some(image_url);
        }
        if let Some(is_featured) = update.is_featured {
            article.is_featured = is_featured;
        }
        if let Some(state) = update.status_change {
            article.status = state.status;
            article.published_at = state.published_at;
        }
        if let Some(tag_ids) = update.tag_ids {
            article.tags = self.tags_for(&tag_ids);
        }
        if let Some(category_ids) = update.category_ids {
            article.categories = self.categories_for(&category_ids);
        }
        article.updated_at = update.updated_at;

        Ok(article.clone())
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let mut map = self.articles.lock().unwrap();
        map.remove(&i64::from(id))
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("article not found".into()))
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryArticleRepo {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let map = self.articles.lock().unwrap();
        Ok(map.get(&i64::from(id)).cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Article>> {
        let map = self.articles.lock().unwrap();
        Ok(map.values().find(|a| &a.slug == slug).cloned())
    }

    async fn list_page(
        &self,
        filter: &ArticleListFilter,
        limit: u32,
        cursor: Option<ArticleListCursor>,
    ) -> DomainResult<(Vec<Article>, Option<ArticleListCursor>)> {
        let map = self.articles.lock().unwrap();
        let mut articles: Vec<Article> = map
            .values()
            .filter(|article| {
                if !filter.include_unpublished {
                    if !article.is_published() {
                        return false;
                    }
                } else if let Some(status) = filter.status {
                    if article.status != status {
                        return false;
                    }
                }
                if let Some(tag) = &filter.tag {
                    if !article.tags.iter().any(|t| &t.slug == tag) {
                        return false;
                    }
                }
                if let Some(category) = &filter.category {
                    if !article.categories.iter().any(|c| &c.slug == category) {
                        return false;
                    }
                }
                if let Some(featured) = filter.featured {
                    if article.is_featured != featured {
                        return false;
                    }
                }
                if let Some(search) = &filter.search {
                    let needle = search.to_lowercase();
                    if !article.title.as_str().to_lowercase().contains(&needle)
                        && !article.summary.to_lowercase().contains(&needle)
                        && !article.body.as_str().to_lowercase().contains(&needle)
                    {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        articles.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| i64::from(b.id).cmp(&i64::from(a.id)))
        });

        if let Some(cursor) = cursor {
            articles.retain(|a| {
                (a.created_at, i64::from(a.id)) < (cursor.created_at, cursor.id)
            });
        }

        let has_more = articles.len() > limit as usize;
        articles.truncate(limit as usize);
        let next_cursor = if has_more {
            articles
                .last()
                .map(|a| ArticleListCursor::new(a.created_at, a.id.into()))
        } else {
            None
        };

        Ok((articles, next_cursor))
    }

    async fn increment_view_count(&self, id: ArticleId) -> DomainResult<()> {
        let mut map = self.articles.lock().unwrap();
        let article = map
            .get_mut(&i64::from(id))
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        article.view_count += 1;
        Ok(())
    }
}

/* -------------------------------- taxonomy -------------------------------- */

#[derive(Default)]
pub struct InMemoryTagRepo {
    tags: Mutex<Vec<Tag>>,
    next_id: AtomicI64,
}

impl InMemoryTagRepo {
    pub fn new() -> Self {
        Self {
            tags: Mutex::new(vec![]),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn with_tags(tags: Vec<Tag>) -> Self {
        let next = tags.iter().map(|t| i64::from(t.id)).max().unwrap_or(0) + 1;
        Self {
            tags: Mutex::new(tags),
            next_id: AtomicI64::new(next),
        }
    }
}

#[async_trait]
impl SlugLookup for InMemoryTagRepo {
    async fn slug_exists(&self, candidate: &str) -> DomainResult<bool> {
        let tags = self.tags.lock().unwrap();
        Ok(tags.iter().any(|t| t.slug.as_str() == candidate))
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepo {
    async fn insert(&self, tag: NewTag) -> DomainResult<Tag> {
        let mut tags = self.tags.lock().unwrap();
        if tags.iter().any(|t| t.slug == tag.slug) {
            return Err(DomainError::Conflict("tag slug already exists".into()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = Tag {
            id: TagId::new(id)?,
            name: tag.name,
            slug: tag.slug,
        };
        tags.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> DomainResult<Vec<Tag>> {
        Ok(self.tags.lock().unwrap().clone())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Tag>> {
        let tags = self.tags.lock().unwrap();
        Ok(tags.iter().find(|t| &t.slug == slug).cloned())
    }

    async fn find_by_slugs(&self, slugs: &[Slug]) -> DomainResult<Vec<Tag>> {
        let tags = self.tags.lock().unwrap();
        Ok(tags
            .iter()
            .filter(|t| slugs.contains(&t.slug))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryCategoryRepo {
    categories: Mutex<Vec<Category>>,
    next_id: AtomicI64,
}

impl InMemoryCategoryRepo {
    pub fn new() -> Self {
        Self {
            categories: Mutex::new(vec![]),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn with_categories(categories: Vec<Category>) -> Self {
        let next = categories.iter().map(|c| i64::from(c.id)).max().unwrap_or(0) + 1;
        Self {
            categories: Mutex::new(categories),
            next_id: AtomicI64::new(next),
        }
    }
}

#[async_trait]
impl SlugLookup for InMemoryCategoryRepo {
    async fn slug_exists(&self, candidate: &str) -> DomainResult<bool> {
        let categories = self.categories.lock().unwrap();
        Ok(categories.iter().any(|c| c.slug.as_str() == candidate))
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepo {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        let mut categories = self.categories.lock().unwrap();
        if categories.iter().any(|c| c.slug == category.slug) {
            return Err(DomainError::Conflict(
                "category slug already exists".into(),
            ));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = Category {
            id: CategoryId::new(id)?,
            name: category.name,
            slug: category.slug,
            description: category.description,
            parent_id: category.parent_id,
        };
        categories.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> DomainResult<Vec<Category>> {
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Category>> {
        let categories = self.categories.lock().unwrap();
        Ok(categories.iter().find(|c| &c.slug == slug).cloned())
    }

    async fn find_by_slugs(&self, slugs: &[Slug]) -> DomainResult<Vec<Category>> {
        let categories = self.categories.lock().unwrap();
        Ok(categories
            .iter()
            .filter(|c| slugs.contains(&c.slug))
            .cloned()
            .collect())
    }
}

/* -------------------------------- users -------------------------------- */

#[derive(Default)]
pub struct InMemoryUserRepo {
    users: Mutex<HashMap<i64, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn with_users(users: Vec<User>) -> Self {
        let next = users.iter().map(|u| i64::from(u.id)).max().unwrap_or(0) + 1;
        Self {
            users: Mutex::new(users.into_iter().map(|u| (i64::from(u.id), u)).collect()),
            next_id: AtomicI64::new(next),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn count(&self) -> DomainResult<u64> {
        Ok(self.users.lock().unwrap().len() as u64)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|u| u.username.as_str() == new_user.username.as_str())
        {
            return Err(DomainError::Conflict("username already exists".into()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = User {
            id: UserId::new(id)?,
            username: new_user.username,
            password_hash: new_user.password_hash,
            role: new_user.role,
            bio: new_user.bio,
            is_active: new_user.is_active,
            created_at: new_user.created_at,
        };
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, update: UserUpdate) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(&i64::from(update.id))
            .ok_or_else(|| DomainError::NotFound("user not found".into()))?;

        if let Some(is_active) = update.is_active {
            user.is_active = is_active;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(bio) = update.bio {
            user.bio = Some(bio);
        }

        Ok(user.clone())
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .values()
            .find(|u| u.username.as_str() == username.as_str())
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.get(&i64::from(id)).cloned())
    }
}

/* -------------------------------- ports -------------------------------- */

/// Reversible stand-in for the Argon2 hasher.
pub struct DummyPasswordHasher;

#[async_trait]
impl PasswordHasher for DummyPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash == format!("hashed:{password}") {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}

pub struct DummyTokenManager;

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let issued_at = fixed_now();
        let expires_at = issued_at + chrono::Duration::hours(1);
        Ok(AuthTokenDto {
            token: format!("token-{}", subject.username),
            issued_at,
            expires_at,
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, _token: &str) -> ApplicationResult<AuthenticatedUser> {
        Err(ApplicationError::unauthorized(
            "dummy token manager cannot authenticate",
        ))
    }
}
