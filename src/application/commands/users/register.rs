// src/application/commands/users/register.rs
use super::{UserCommandService, password::validate_password};
use crate::{
    application::{
        dto::{AuthenticatedUser, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{NewUser, PasswordHash, Role, Username},
};

pub struct RegisterUserCommand {
    pub username: String,
    pub password: String,
    pub role: Option<Role>,
}

impl UserCommandService {
    /// Registration is open. The very first account becomes the admin that
    /// bootstraps the instance; afterwards new accounts default to reader,
    /// and a requested role is honored only for callers holding
    /// `users:update`.
    pub async fn register(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: RegisterUserCommand,
    ) -> ApplicationResult<UserDto> {
        let username = Username::new(command.username)?;
        validate_password(&command.password)?;

        let existing = self.user_repo.count().await?;
        let role = determine_role(existing, actor, command.role)?;

        if self.user_repo.find_by_username(&username).await?.is_some() {
            return Err(ApplicationError::conflict("username already exists"));
        }

        let hashed = self.password_hasher.hash(&command.password).await?;
        let password_hash = PasswordHash::new(hashed)?;
        let new_user = NewUser::new(username, password_hash, role, self.clock.now());
        let user = self.user_repo.insert(new_user).await?;
        tracing::info!(user_id = i64::from(user.id), role = %user.role, "user registered");
        Ok(user.into())
    }
}

fn determine_role(
    existing: u64,
    actor: Option<&AuthenticatedUser>,
    requested: Option<Role>,
) -> ApplicationResult<Role> {
    if existing == 0 {
        return Ok(Role::Admin);
    }
    match requested {
        None | Some(Role::Reader) => Ok(Role::Reader),
        Some(role) => {
            let actor = actor.ok_or_else(|| {
                ApplicationError::forbidden("elevated roles require administrative privileges")
            })?;
            if !actor.has_capability("users", "update") {
                return Err(ApplicationError::forbidden(
                    "elevated roles require administrative privileges",
                ));
            }
            Ok(role)
        }
    }
}
