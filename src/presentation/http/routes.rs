// src/presentation/http/routes.rs
use std::time::Duration;

use axum::{
    Extension, Json, Router,
    http::Method,
    routing::{get, patch, post, put},
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::presentation::http::controllers::{articles, auth, taxonomy};
use crate::presentation::http::state::HttpState;

pub fn build_router(state: HttpState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(tower_http::cors::Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health))
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route(
            "/api/v1/auth/me",
            get(auth::profile).patch(auth::update_profile),
        )
        .route("/api/v1/users/{id}", patch(auth::update_user))
        .route(
            "/api/v1/articles",
            get(articles::list_articles).post(articles::create_article),
        )
        .route(
            "/api/v1/articles/by-slug/{slug}",
            get(articles::get_article_by_slug),
        )
        .route(
            "/api/v1/articles/{id}",
            put(articles::update_article).delete(articles::delete_article),
        )
        .route("/api/v1/articles/{id}/publish", post(articles::publish_article))
        .route("/api/v1/articles/{id}/archive", post(articles::archive_article))
        .route(
            "/api/v1/tags",
            get(taxonomy::list_tags).post(taxonomy::create_tag),
        )
        .route("/api/v1/tags/{slug}", get(taxonomy::get_tag_by_slug))
        .route(
            "/api/v1/categories",
            get(taxonomy::list_categories).post(taxonomy::create_category),
        )
        .route(
            "/api/v1/categories/{slug}",
            get(taxonomy::get_category_by_slug),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
