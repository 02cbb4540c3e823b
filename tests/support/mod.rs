// tests/support/mod.rs
#![allow(dead_code)]

pub mod mocks;

use newsdesk::application::dto::AuthenticatedUser;
use newsdesk::domain::user::{Role, UserId};

pub use mocks::{
    DummyPasswordHasher, DummyTokenManager, FixedClock, InMemoryArticleRepo,
    InMemoryCategoryRepo, InMemoryTagRepo, InMemoryUserRepo, fixed_now,
};

/// A token-authenticated actor carrying the role's default capabilities.
pub fn actor(id: i64, role: Role) -> AuthenticatedUser {
    AuthenticatedUser {
        id: UserId::new(id).unwrap(),
        username: format!("user-{id}"),
        role,
        capabilities: role.default_capabilities(),
        issued_at: fixed_now(),
        expires_at: fixed_now() + chrono::Duration::hours(1),
    }
}
