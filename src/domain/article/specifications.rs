// src/domain/article/specifications.rs
use std::collections::HashSet;

use crate::domain::article::entity::Article;
use crate::domain::user::{Capability, UserId};

pub struct CanUpdateArticleSpec<'a> {
    capabilities: &'a HashSet<Capability>,
    article: &'a Article,
    user_id: UserId,
}

impl<'a> CanUpdateArticleSpec<'a> {
    pub fn new(
        capabilities: &'a HashSet<Capability>,
        article: &'a Article,
        user_id: UserId,
    ) -> Self {
        Self {
            capabilities,
            article,
            user_id,
        }
    }

    pub fn is_satisfied(&self) -> bool {
        has_capability(self.capabilities, "articles", "update:any")
            || (has_capability(self.capabilities, "articles", "update:own")
                && self.article.author_id == self.user_id)
    }
}

pub struct CanDeleteArticleSpec<'a> {
    capabilities: &'a HashSet<Capability>,
    article: &'a Article,
    user_id: UserId,
}

impl<'a> CanDeleteArticleSpec<'a> {
    pub fn new(
        capabilities: &'a HashSet<Capability>,
        article: &'a Article,
        user_id: UserId,
    ) -> Self {
        Self {
            capabilities,
            article,
            user_id,
        }
    }

    pub fn is_satisfied(&self) -> bool {
        has_capability(self.capabilities, "articles", "delete:any")
            || (has_capability(self.capabilities, "articles", "delete:own")
                && self.article.author_id == self.user_id)
    }
}

fn has_capability(capabilities: &HashSet<Capability>, resource: &str, action: &str) -> bool {
    capabilities.iter().any(|cap| cap.matches(resource, action))
}
