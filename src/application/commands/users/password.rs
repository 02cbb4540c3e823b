// src/application/commands/users/password.rs
use crate::application::error::{ApplicationError, ApplicationResult};

const MIN_PASSWORD_LEN: usize = 8;

pub(super) fn validate_password(password: &str) -> ApplicationResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApplicationError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    Ok(())
}
