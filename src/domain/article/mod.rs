pub mod entity;
pub mod repository;
pub mod specifications;
pub mod value_objects;

pub use entity::{Article, ArticleUpdate, NewArticle, StatusUpdate};
pub use repository::{ArticleListFilter, ArticleReadRepository, ArticleWriteRepository};
pub use value_objects::{ArticleBody, ArticleId, ArticleListCursor, ArticleStatus, ArticleTitle};
