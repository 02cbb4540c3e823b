// src/application/commands/taxonomy/service.rs
use std::sync::Arc;

use crate::domain::{
    slug::SlugAssigner,
    taxonomy::{CategoryRepository, TagRepository},
};

pub struct TaxonomyCommandService {
    pub(super) tag_repo: Arc<dyn TagRepository>,
    pub(super) category_repo: Arc<dyn CategoryRepository>,
    pub(super) slug_assigner: Arc<SlugAssigner>,
}

impl TaxonomyCommandService {
    pub fn new(
        tag_repo: Arc<dyn TagRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        slug_assigner: Arc<SlugAssigner>,
    ) -> Self {
        Self {
            tag_repo,
            category_repo,
            slug_assigner,
        }
    }
}
