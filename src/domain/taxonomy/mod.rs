pub mod entity;
pub mod repository;

pub use entity::{Category, CategoryId, NewCategory, NewTag, Tag, TagId};
pub use repository::{CategoryRepository, TagRepository};
