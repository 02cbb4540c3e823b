// src/application/commands/users/update.rs
use super::UserCommandService;
use crate::{
    application::{
        commands::articles::ensure_capability,
        dto::{AuthenticatedUser, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{Role, UserId, UserUpdate},
};

pub struct UpdateUserCommand {
    pub user_id: i64,
    pub is_active: Option<bool>,
    pub role: Option<Role>,
}

pub struct UpdateProfileCommand {
    pub bio: Option<String>,
}

impl UserCommandService {
    /// Administrative role / activation changes.
    pub async fn update_user(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateUserCommand,
    ) -> ApplicationResult<UserDto> {
        ensure_capability(actor, "users", "update")?;

        let id = UserId::new(command.user_id)?;
        if id == actor.id && command.is_active == Some(false) {
            return Err(ApplicationError::validation(
                "cannot deactivate your own account",
            ));
        }

        let mut update = UserUpdate::new(id);
        if let Some(is_active) = command.is_active {
            update = update.with_is_active(is_active);
        }
        if let Some(role) = command.role {
            update = update.with_role(role);
        }

        let user = self.user_repo.update(update).await?;
        tracing::info!(user_id = i64::from(user.id), role = %user.role, "user updated");
        Ok(user.into())
    }

    /// Self-service profile edits.
    pub async fn update_profile(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateProfileCommand,
    ) -> ApplicationResult<UserDto> {
        let mut update = UserUpdate::new(actor.id);
        if let Some(bio) = command.bio {
            update = update.with_bio(bio);
        }

        let user = self.user_repo.update(update).await?;
        Ok(user.into())
    }
}
