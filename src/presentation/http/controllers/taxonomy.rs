// src/presentation/http/controllers/taxonomy.rs
use axum::{Extension, Json, extract::Path};
use serde::Deserialize;

use crate::application::{
    commands::taxonomy::{CreateCategoryCommand, CreateTagCommand},
    dto::{CategoryDto, TagDto},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;

#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent: Option<String>,
}

pub async fn list_tags(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<TagDto>>> {
    state
        .services
        .taxonomy_queries
        .list_tags()
        .await
        .into_http()
        .map(Json)
}

pub async fn get_tag_by_slug(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<TagDto>> {
    state
        .services
        .taxonomy_queries
        .get_tag_by_slug(slug)
        .await
        .into_http()
        .map(Json)
}

pub async fn create_tag(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateTagRequest>,
) -> HttpResult<Json<TagDto>> {
    state
        .services
        .taxonomy_commands
        .create_tag(
            &user,
            CreateTagCommand {
                name: payload.name,
                slug: payload.slug,
            },
        )
        .await
        .into_http()
        .map(Json)
}

pub async fn list_categories(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<CategoryDto>>> {
    state
        .services
        .taxonomy_queries
        .list_categories()
        .await
        .into_http()
        .map(Json)
}

pub async fn get_category_by_slug(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<CategoryDto>> {
    state
        .services
        .taxonomy_queries
        .get_category_by_slug(slug)
        .await
        .into_http()
        .map(Json)
}

pub async fn create_category(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateCategoryRequest>,
) -> HttpResult<Json<CategoryDto>> {
    state
        .services
        .taxonomy_commands
        .create_category(
            &user,
            CreateCategoryCommand {
                name: payload.name,
                slug: payload.slug,
                description: payload.description,
                parent: payload.parent,
            },
        )
        .await
        .into_http()
        .map(Json)
}
