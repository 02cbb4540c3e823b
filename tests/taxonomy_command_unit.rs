// tests/taxonomy_command_unit.rs
use std::sync::Arc;

mod support;

use newsdesk::application::commands::taxonomy::{
    CreateCategoryCommand, CreateTagCommand, TaxonomyCommandService,
};
use newsdesk::application::error::ApplicationError;
use newsdesk::application::queries::taxonomy::TaxonomyQueryService;
use newsdesk::domain::slug::SlugAssigner;
use newsdesk::domain::user::Role;
use newsdesk::infrastructure::util::DefaultSlugGenerator;
use support::{InMemoryCategoryRepo, InMemoryTagRepo, actor};

fn services() -> (TaxonomyCommandService, TaxonomyQueryService) {
    let tag_repo = Arc::new(InMemoryTagRepo::new());
    let category_repo = Arc::new(InMemoryCategoryRepo::new());
    let assigner = Arc::new(SlugAssigner::new(Arc::new(DefaultSlugGenerator)));
    let commands = TaxonomyCommandService::new(
        tag_repo.clone(),
        category_repo.clone(),
        assigner,
    );
    let queries = TaxonomyQueryService::new(tag_repo, category_repo);
    (commands, queries)
}

fn tag_command(name: &str) -> CreateTagCommand {
    CreateTagCommand {
        name: name.to_string(),
        slug: None,
    }
}

#[tokio::test]
async fn tag_slug_is_derived_and_kept_unique() {
    let (commands, _) = services();
    let admin = actor(1, Role::Admin);

    let first = commands
        .create_tag(&admin, tag_command("Local Politics"))
        .await
        .unwrap();
    assert_eq!(first.slug, "local-politics");

    let second = commands
        .create_tag(&admin, tag_command("Local Politics"))
        .await
        .unwrap();
    assert_eq!(second.slug, "local-politics-1");
}

#[tokio::test]
async fn taxonomy_management_is_admin_only() {
    let (commands, _) = services();
    let author = actor(1, Role::Author);

    let err = commands
        .create_tag(&author, tag_command("Sport"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
}

#[tokio::test]
async fn category_parent_is_resolved_by_slug() {
    let (commands, queries) = services();
    let admin = actor(1, Role::Admin);

    let parent = commands
        .create_category(
            &admin,
            CreateCategoryCommand {
                name: "Technology".to_string(),
                slug: None,
                description: None,
                parent: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(parent.slug, "technology");
    assert_eq!(parent.parent_id, None);

    let child = commands
        .create_category(
            &admin,
            CreateCategoryCommand {
                name: "Mobile".to_string(),
                slug: None,
                description: Some("Phones and tablets".to_string()),
                parent: Some("technology".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(child.parent_id, Some(parent.id));

    let fetched = queries
        .get_category_by_slug("mobile".to_string())
        .await
        .unwrap();
    assert_eq!(fetched.description, "Phones and tablets");
}

#[tokio::test]
async fn unknown_parent_category_is_rejected() {
    let (commands, _) = services();
    let admin = actor(1, Role::Admin);

    let err = commands
        .create_category(
            &admin,
            CreateCategoryCommand {
                name: "Orphan".to_string(),
                slug: None,
                description: None,
                parent: Some("missing".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn explicit_slugs_are_validated() {
    let (commands, _) = services();
    let admin = actor(1, Role::Admin);

    let err = commands
        .create_tag(
            &admin,
            CreateTagCommand {
                name: "Economy".to_string(),
                slug: Some("Not A Slug".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Domain(_)));
}
