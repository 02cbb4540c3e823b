// src/application/commands/articles/update.rs
use super::ArticleCommandService;
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{
        ArticleBody, ArticleId, ArticleTitle, ArticleUpdate,
        specifications::CanUpdateArticleSpec,
    },
};

pub struct UpdateArticleCommand {
    pub id: i64,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub source: Option<String>,
    pub source_url: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
}

impl ArticleCommandService {
    /// Content updates leave the slug untouched: it is a permanent public
    /// identifier assigned at creation, stable across title changes.
    pub async fn update_article(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(command.id)?;
        let article = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let update_spec = CanUpdateArticleSpec::new(&actor.capabilities, &article, actor.id);
        if !update_spec.is_satisfied() {
            return Err(ApplicationError::forbidden(
                "insufficient privileges to update article",
            ));
        }

        let mut update = ArticleUpdate::new(id, article.updated_at);

        if let Some(title) = command.title {
            update = update.with_title(ArticleTitle::new(title)?);
        }
        if let Some(summary) = command.summary {
            update = update.with_summary(summary);
        }
        if let Some(body) = command.body {
            update = update.with_body(ArticleBody::new(body)?);
        }
        update.source = command.source;
        update.source_url = command.source_url;
        update.image_url = command.image_url;
        update.is_featured = command.is_featured;

        if let Some(tags) = command.tags {
            update.tag_ids = Some(self.resolve_tags(&tags).await?);
        }
        if let Some(categories) = command.categories {
            update.category_ids = Some(self.resolve_categories(&categories).await?);
        }

        update.set_updated_at(self.clock.now());

        let updated = self.write_repo.update(update).await?;
        Ok(updated.into())
    }
}
