// src/application/commands/taxonomy/create.rs
use super::TaxonomyCommandService;
use crate::{
    application::{
        commands::articles::ensure_capability,
        dto::{AuthenticatedUser, CategoryDto, TagDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        slug::Slug,
        taxonomy::{NewCategory, NewTag},
    },
};

pub struct CreateTagCommand {
    pub name: String,
    pub slug: Option<String>,
}

pub struct CreateCategoryCommand {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    /// Slug of the parent category, for nested sections.
    pub parent: Option<String>,
}

impl TaxonomyCommandService {
    pub async fn create_tag(
        &self,
        actor: &AuthenticatedUser,
        command: CreateTagCommand,
    ) -> ApplicationResult<TagDto> {
        ensure_capability(actor, "taxonomy", "manage")?;

        let slug = match command.slug {
            Some(raw) => Slug::new(raw)?,
            None => {
                self.slug_assigner
                    .assign(&command.name, self.tag_repo.as_ref())
                    .await?
            }
        };

        let tag = self.tag_repo.insert(NewTag::new(command.name, slug)?).await?;
        tracing::info!(tag_id = i64::from(tag.id), slug = %tag.slug, "tag created");
        Ok(tag.into())
    }

    pub async fn create_category(
        &self,
        actor: &AuthenticatedUser,
        command: CreateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        ensure_capability(actor, "taxonomy", "manage")?;

        let parent_id = match command.parent {
            Some(raw) => {
                let parent_slug = Slug::new(raw)?;
                let parent = self
                    .category_repo
                    .find_by_slug(&parent_slug)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found("parent category not found"))?;
                Some(parent.id)
            }
            None => None,
        };

        let slug = match command.slug {
            Some(raw) => Slug::new(raw)?,
            None => {
                self.slug_assigner
                    .assign(&command.name, self.category_repo.as_ref())
                    .await?
            }
        };

        let category = self
            .category_repo
            .insert(NewCategory::new(
                command.name,
                slug,
                command.description.unwrap_or_default(),
                parent_id,
            )?)
            .await?;
        tracing::info!(category_id = i64::from(category.id), slug = %category.slug, "category created");
        Ok(category.into())
    }
}
