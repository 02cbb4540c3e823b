mod capability;
mod create;
mod delete;
mod service;
mod status;
mod update;

pub(crate) use capability::ensure_capability;
pub use create::CreateArticleCommand;
pub use delete::DeleteArticleCommand;
pub use service::ArticleCommandService;
pub use status::{ArchiveArticleCommand, PublishArticleCommand};
pub use update::UpdateArticleCommand;
