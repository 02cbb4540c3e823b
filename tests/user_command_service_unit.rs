// tests/user_command_service_unit.rs
use std::sync::Arc;

mod support;

use newsdesk::application::commands::users::{
    LoginUserCommand, RegisterUserCommand, UpdateUserCommand, UserCommandService,
};
use newsdesk::application::error::ApplicationError;
use newsdesk::application::queries::users::UserQueryService;
use newsdesk::domain::user::Role;
use support::{DummyPasswordHasher, DummyTokenManager, FixedClock, InMemoryUserRepo, actor};

fn services() -> (UserCommandService, UserQueryService) {
    let repo = Arc::new(InMemoryUserRepo::new());
    let commands = UserCommandService::new(
        repo.clone(),
        Arc::new(DummyPasswordHasher),
        Arc::new(DummyTokenManager),
        Arc::new(FixedClock),
    );
    let queries = UserQueryService::new(repo);
    (commands, queries)
}

fn register_command(username: &str) -> RegisterUserCommand {
    RegisterUserCommand {
        username: username.to_string(),
        password: "correct horse".to_string(),
        role: None,
    }
}

#[tokio::test]
async fn first_account_bootstraps_admin_then_readers() {
    let (commands, _) = services();

    let first = commands.register(None, register_command("founder")).await.unwrap();
    assert_eq!(first.role, Role::Admin);

    let second = commands.register(None, register_command("visitor")).await.unwrap();
    assert_eq!(second.role, Role::Reader);
}

#[tokio::test]
async fn elevated_roles_require_admin_caller() {
    let (commands, _) = services();
    commands.register(None, register_command("founder")).await.unwrap();

    let mut command = register_command("writer");
    command.role = Some(Role::Author);
    let err = commands.register(None, command).await.unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));

    let admin = actor(1, Role::Admin);
    let mut command = register_command("writer");
    command.role = Some(Role::Author);
    let user = commands.register(Some(&admin), command).await.unwrap();
    assert_eq!(user.role, Role::Author);
}

#[tokio::test]
async fn duplicate_usernames_conflict() {
    let (commands, _) = services();
    commands.register(None, register_command("founder")).await.unwrap();

    let err = commands
        .register(None, register_command("founder"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Conflict(_)));
}

#[tokio::test]
async fn short_passwords_are_rejected() {
    let (commands, _) = services();

    let err = commands
        .register(
            None,
            RegisterUserCommand {
                username: "founder".to_string(),
                password: "short".to_string(),
                role: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Validation(_)));
}

#[tokio::test]
async fn login_verifies_credentials() {
    let (commands, _) = services();
    commands.register(None, register_command("founder")).await.unwrap();

    let result = commands
        .login(LoginUserCommand {
            username: "founder".to_string(),
            password: "correct horse".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(result.user.username, "founder");
    assert_eq!(result.token.token, "token-founder");

    let err = commands
        .login(LoginUserCommand {
            username: "founder".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Unauthorized(_)));
}

#[tokio::test]
async fn deactivated_accounts_cannot_login() {
    let (commands, _) = services();
    commands.register(None, register_command("founder")).await.unwrap();
    let target = commands.register(None, register_command("visitor")).await.unwrap();

    let admin = actor(1, Role::Admin);
    commands
        .update_user(
            &admin,
            UpdateUserCommand {
                user_id: target.id,
                is_active: Some(false),
                role: None,
            },
        )
        .await
        .unwrap();

    let err = commands
        .login(LoginUserCommand {
            username: "visitor".to_string(),
            password: "correct horse".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
}

#[tokio::test]
async fn admins_cannot_deactivate_themselves() {
    let (commands, _) = services();
    commands.register(None, register_command("founder")).await.unwrap();

    let admin = actor(1, Role::Admin);
    let err = commands
        .update_user(
            &admin,
            UpdateUserCommand {
                user_id: 1,
                is_active: Some(false),
                role: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Validation(_)));
}

#[tokio::test]
async fn profile_reports_capabilities() {
    let (commands, queries) = services();
    commands.register(None, register_command("founder")).await.unwrap();

    let admin = actor(1, Role::Admin);
    let profile = queries.get_profile(&admin).await.unwrap();
    assert_eq!(profile.user.username, "founder");
    assert!(
        profile
            .capabilities
            .iter()
            .any(|cap| cap.resource == "taxonomy" && cap.action == "manage")
    );
}
