pub mod articles;
pub mod auth;
pub mod pagination;
pub mod taxonomy;
pub mod users;

pub use articles::ArticleDto;
pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use pagination::CursorPage;
pub use taxonomy::{CategoryDto, TagDto};
pub use users::{CapabilityView, UserDto, UserProfileDto};
