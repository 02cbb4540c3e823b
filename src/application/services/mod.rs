// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{
            articles::ArticleCommandService, taxonomy::TaxonomyCommandService,
            users::UserCommandService,
        },
        ports::{
            security::{PasswordHasher, TokenManager},
            time::Clock,
            util::SlugGenerator,
        },
        queries::{
            articles::ArticleQueryService, taxonomy::TaxonomyQueryService,
            users::UserQueryService,
        },
    },
    domain::{
        article::{ArticleReadRepository, ArticleWriteRepository},
        slug::SlugAssigner,
        taxonomy::{CategoryRepository, TagRepository},
        user::UserRepository,
    },
};

/// Wiring container handed to the HTTP layer; owns every command/query
/// service plus the token manager used by the auth extractors.
pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub article_commands: Arc<ArticleCommandService>,
    pub taxonomy_commands: Arc<TaxonomyCommandService>,
    pub article_queries: Arc<ArticleQueryService>,
    pub taxonomy_queries: Arc<TaxonomyQueryService>,
    pub user_queries: Arc<UserQueryService>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        article_write_repo: Arc<dyn ArticleWriteRepository>,
        article_read_repo: Arc<dyn ArticleReadRepository>,
        tag_repo: Arc<dyn TagRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
    ) -> Self {
        let slug_assigner = Arc::new(SlugAssigner::new(Arc::clone(&slugger)));

        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&token_manager),
            Arc::clone(&clock),
        ));

        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&article_write_repo),
            Arc::clone(&article_read_repo),
            Arc::clone(&tag_repo),
            Arc::clone(&category_repo),
            Arc::clone(&slug_assigner),
            Arc::clone(&clock),
        ));

        let taxonomy_commands = Arc::new(TaxonomyCommandService::new(
            Arc::clone(&tag_repo),
            Arc::clone(&category_repo),
            Arc::clone(&slug_assigner),
        ));

        let article_queries = Arc::new(ArticleQueryService::new(Arc::clone(&article_read_repo)));
        let taxonomy_queries = Arc::new(TaxonomyQueryService::new(
            Arc::clone(&tag_repo),
            Arc::clone(&category_repo),
        ));
        let user_queries = Arc::new(UserQueryService::new(Arc::clone(&user_repo)));

        Self {
            user_commands,
            article_commands,
            taxonomy_commands,
            article_queries,
            taxonomy_queries,
            user_queries,
            token_manager,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }
}
