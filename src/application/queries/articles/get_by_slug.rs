// src/application/queries/articles/get_by_slug.rs
use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{article::Article, slug::Slug},
};

pub struct GetArticleBySlugQuery {
    pub slug: String,
}

impl ArticleQueryService {
    pub async fn get_article_by_slug(
        &self,
        actor: Option<&AuthenticatedUser>,
        query: GetArticleBySlugQuery,
    ) -> ApplicationResult<ArticleDto> {
        let slug = Slug::new(query.slug)?;
        let mut article = self
            .read_repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        ensure_actor_can_view(actor, &article)?;

        // Reader traffic drives the counter; authors previewing their own
        // drafts do not inflate it.
        if article.is_published() {
            self.read_repo.increment_view_count(article.id).await?;
            article.view_count += 1;
        }

        Ok(article.into())
    }
}

fn ensure_actor_can_view(
    actor: Option<&AuthenticatedUser>,
    article: &Article,
) -> ApplicationResult<()> {
    if article.is_published() {
        return Ok(());
    }

    // Unpublished articles are indistinguishable from absent ones for
    // outsiders.
    let actor = actor.ok_or_else(|| ApplicationError::not_found("article not found"))?;
    if !actor.has_capability("articles", "view:drafts") && actor.id != article.author_id {
        return Err(ApplicationError::not_found("article not found"));
    }

    Ok(())
}
