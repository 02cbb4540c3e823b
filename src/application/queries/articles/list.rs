// src/application/queries/articles/list.rs
use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser, CursorPage},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{ArticleListCursor, ArticleListFilter, ArticleStatus},
        errors::DomainError,
        slug::Slug,
    },
};

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

pub struct ListArticlesQuery {
    pub include_drafts: bool,
    pub status: Option<String>,
    pub tag: Option<String>,
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub limit: u32,
    pub cursor: Option<String>,
}

impl ArticleQueryService {
    pub async fn list_articles(
        &self,
        actor: Option<&AuthenticatedUser>,
        query: ListArticlesQuery,
    ) -> ApplicationResult<CursorPage<ArticleDto>> {
        let include_unpublished = normalize_draft_access(actor, query.include_drafts)?;

        let status = match query.status {
            Some(raw) if include_unpublished => Some(
                raw.parse::<ArticleStatus>()
                    .map_err(ApplicationError::from)?,
            ),
            Some(_) => {
                return Err(ApplicationError::forbidden(
                    "status filtering requires draft access",
                ));
            }
            None => None,
        };

        let filter = ArticleListFilter {
            include_unpublished,
            status,
            tag: query.tag.map(Slug::new).transpose()?,
            category: query.category.map(Slug::new).transpose()?,
            featured: query.featured,
            search: query
                .search
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty()),
        };

        let limit = if query.limit == 0 {
            DEFAULT_LIMIT
        } else {
            query.limit.min(MAX_LIMIT)
        };
        let cursor = decode_cursor(query.cursor.as_deref())?;

        let (records, next_cursor) = self.read_repo.list_page(&filter, limit, cursor).await?;

        let items = records.into_iter().map(Into::into).collect();
        Ok(CursorPage::new(
            items,
            next_cursor.map(|cursor| cursor.encode()),
        ))
    }
}

fn normalize_draft_access(
    actor: Option<&AuthenticatedUser>,
    include_drafts: bool,
) -> ApplicationResult<bool> {
    if !include_drafts {
        return Ok(false);
    }
    let actor = actor
        .ok_or_else(|| ApplicationError::forbidden("authentication required for draft access"))?;
    if !actor.has_capability("articles", "view:drafts") {
        return Err(ApplicationError::forbidden(
            "missing capability articles:view:drafts",
        ));
    }
    Ok(true)
}

fn decode_cursor(token: Option<&str>) -> ApplicationResult<Option<ArticleListCursor>> {
    match token {
        Some(value) => match ArticleListCursor::decode(value) {
            Ok(cursor) => Ok(Some(cursor)),
            Err(DomainError::Validation(msg)) => Err(ApplicationError::validation(msg)),
            Err(other) => Err(ApplicationError::from(other)),
        },
        None => Ok(None),
    }
}
