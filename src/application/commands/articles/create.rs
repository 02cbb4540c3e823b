// src/application/commands/articles/create.rs
use super::{ArticleCommandService, capability::ensure_capability};
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser},
        error::ApplicationResult,
    },
    domain::{
        article::{ArticleBody, ArticleStatus, ArticleTitle, NewArticle},
        slug::Slug,
    },
};

pub struct CreateArticleCommand {
    pub title: String,
    pub body: String,
    pub summary: Option<String>,
    /// Explicit slug; when absent one is derived from the title.
    pub slug: Option<String>,
    pub source: Option<String>,
    pub source_url: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub publish: bool,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
}

impl ArticleCommandService {
    pub async fn create_article(
        &self,
        actor: &AuthenticatedUser,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        ensure_capability(actor, "articles", "create")?;

        let title = ArticleTitle::new(command.title)?;
        let body = ArticleBody::new(command.body)?;
        let tag_ids = self.resolve_tags(&command.tags).await?;
        let category_ids = self.resolve_categories(&command.categories).await?;

        // A supplied slug is validated but not deduplicated here; the unique
        // constraint reports the conflict. Derived slugs go through the
        // assigner.
        let slug = match command.slug {
            Some(raw) => Slug::new(raw)?,
            None => {
                self.slug_assigner
                    .assign(title.as_str(), self.read_repo.as_ref())
                    .await?
            }
        };

        let now = self.clock.now();
        let new_article = NewArticle {
            title,
            slug,
            summary: command.summary.unwrap_or_default(),
            body,
            source: command.source,
            source_url: command.source_url,
            image_url: command.image_url,
            author_id: actor.id,
            status: if command.publish {
                ArticleStatus::Published
            } else {
                ArticleStatus::Draft
            },
            is_featured: command.is_featured,
            published_at: if command.publish { Some(now) } else { None },
            created_at: now,
            updated_at: now,
            tag_ids,
            category_ids,
        };

        let created = self.write_repo.insert(new_article).await?;
        tracing::info!(article_id = i64::from(created.id), slug = %created.slug, "article created");
        Ok(created.into())
    }
}
