// src/application/commands/articles/status.rs
use super::{ArticleCommandService, capability::ensure_capability};
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{ArticleId, ArticleUpdate},
};

pub struct PublishArticleCommand {
    pub id: i64,
}

pub struct ArchiveArticleCommand {
    pub id: i64,
}

impl ArticleCommandService {
    pub async fn publish_article(
        &self,
        actor: &AuthenticatedUser,
        command: PublishArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        ensure_capability(actor, "articles", "publish")?;
        let id = ArticleId::new(command.id)?;
        let mut article = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        if article.is_published() {
            return Ok(article.into());
        }

        let original_updated_at = article.updated_at;
        article.publish(self.clock.now());

        let mut update = ArticleUpdate::new(id, original_updated_at)
            .with_status_change(article.status, article.published_at);
        update.set_updated_at(article.updated_at);

        let updated = self.write_repo.update(update).await?;
        tracing::info!(article_id = i64::from(updated.id), "article published");
        Ok(updated.into())
    }

    pub async fn archive_article(
        &self,
        actor: &AuthenticatedUser,
        command: ArchiveArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        ensure_capability(actor, "articles", "publish")?;
        let id = ArticleId::new(command.id)?;
        let mut article = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let original_updated_at = article.updated_at;
        article.archive(self.clock.now());

        let mut update = ArticleUpdate::new(id, original_updated_at)
            .with_status_change(article.status, article.published_at);
        update.set_updated_at(article.updated_at);

        let updated = self.write_repo.update(update).await?;
        tracing::info!(article_id = i64::from(updated.id), "article archived");
        Ok(updated.into())
    }
}
