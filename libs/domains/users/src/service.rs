//! User service - credentials and account state

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{AdminSeed, CreateUser, User, UserResponse};
use crate::repository::UserRepository;

const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 128;

pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a user with a hashed password
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;
        validate_password(&input.password)?;

        let password_hash = hash_password(&input.password)?;
        let user = User::new(
            input.email.trim().to_lowercase(),
            input.name.trim().to_string(),
            password_hash,
            input.roles,
        );

        let created = self.repository.create(user).await?;
        Ok(created.into())
    }

    /// Make sure the configured administrator exists.
    ///
    /// An existing account with the same email is left untouched, password
    /// included, so restarts never reset it.
    pub async fn seed_admin(&self, seed: AdminSeed) -> UserResult<UserResponse> {
        if let Some(existing) = self.repository.get_by_email(&seed.email).await? {
            tracing::debug!(user_id = %existing.id, "Admin account already present");
            return Ok(existing.into());
        }

        let admin = self.create_user(seed.into()).await?;
        tracing::info!(user_id = %admin.id, email = %admin.email, "Seeded admin account");
        Ok(admin)
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<UserResponse> {
        self.repository
            .get_by_id(id)
            .await?
            .map(Into::into)
            .ok_or(UserError::NotFound(id))
    }

    /// Check an email/password pair and stamp the login.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    #[instrument(skip(self, password))]
    pub async fn verify_credentials(&self, email: &str, password: &str) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_email(email.trim())
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(UserError::Inactive);
        }

        let user = self.repository.record_login(user.id).await?;
        Ok(user.into())
    }

    /// Enable or disable an account
    #[instrument(skip(self))]
    pub async fn set_active(&self, id: Uuid, active: bool) -> UserResult<UserResponse> {
        let user = self.repository.set_active(id, active).await?;
        Ok(user.into())
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn validate_password(password: &str) -> UserResult<()> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(UserError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    if len > MAX_PASSWORD_LEN {
        return Err(UserError::Validation(format!(
            "Password cannot exceed {} characters",
            MAX_PASSWORD_LEN
        )));
    }

    if !password.chars().any(|c| c.is_alphabetic()) || !password.chars().any(|c| c.is_ascii_digit())
    {
        return Err(UserError::Validation(
            "Password must contain letters and digits".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::repository::MockUserRepository;

    fn create_input(password: &str) -> CreateUser {
        CreateUser {
            email: "Mecanico@Taller.test".to_string(),
            name: " Mecánico ".to_string(),
            password: password.to_string(),
            roles: vec![],
        }
    }

    fn stored_user(password: &str, active: bool) -> User {
        let mut user = User::new(
            "admin@taller.test".to_string(),
            "Admin".to_string(),
            hash_password(password).unwrap(),
            vec![Role::Admin],
        );
        user.is_active = active;
        user
    }

    #[tokio::test]
    async fn test_create_user_normalizes_and_hashes() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_create()
            .withf(|user: &User| {
                user.email == "mecanico@taller.test"
                    && user.name == "Mecánico"
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(mock_repo);
        let created = service.create_user(create_input("clave1234")).await.unwrap();

        assert_eq!(created.roles, vec!["user".to_string()]);
    }

    #[tokio::test]
    async fn test_create_user_rejects_weak_password() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_create().never();

        let service = UserService::new(mock_repo);

        for weak in ["short1", "onlyletters", "1234567890"] {
            let result = service.create_user(create_input(weak)).await;
            assert!(matches!(result, Err(UserError::Validation(_))), "{weak}");
        }
    }

    #[tokio::test]
    async fn test_seed_admin_is_idempotent() {
        let existing = stored_user("clave1234", true);
        let existing_id = existing.id;

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_email()
            .withf(|email: &str| email == "admin@taller.test")
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo.expect_create().never();

        let service = UserService::new(mock_repo);
        let admin = service
            .seed_admin(AdminSeed {
                email: "admin@taller.test".to_string(),
                name: "Admin".to_string(),
                password: "otraClave99".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(admin.id, existing_id);
    }

    #[tokio::test]
    async fn test_verify_credentials_wrong_password() {
        let user = stored_user("clave1234", true);

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        mock_repo.expect_record_login().never();

        let service = UserService::new(mock_repo);
        let result = service
            .verify_credentials("admin@taller.test", "incorrecta1")
            .await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_verify_credentials_unknown_email() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_get_by_email().returning(|_| Ok(None));

        let service = UserService::new(mock_repo);
        let result = service
            .verify_credentials("nadie@taller.test", "clave1234")
            .await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_verify_credentials_inactive_account() {
        let user = stored_user("clave1234", false);

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        mock_repo.expect_record_login().never();

        let service = UserService::new(mock_repo);
        let result = service
            .verify_credentials("admin@taller.test", "clave1234")
            .await;

        assert!(matches!(result, Err(UserError::Inactive)));
    }

    #[tokio::test]
    async fn test_verify_credentials_records_login() {
        let user = stored_user("clave1234", true);
        let user_id = user.id;

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        mock_repo
            .expect_record_login()
            .withf(move |id: &Uuid| *id == user_id)
            .times(1)
            .returning(|id| {
                let mut user = User::new(
                    "admin@taller.test".to_string(),
                    "Admin".to_string(),
                    String::new(),
                    vec![Role::Admin],
                );
                user.id = id;
                user.last_login_at = Some(chrono::Utc::now());
                Ok(user)
            });

        let service = UserService::new(mock_repo);
        let logged = service
            .verify_credentials(" admin@taller.test ", "clave1234")
            .await
            .unwrap();

        assert_eq!(logged.id, user_id);
        assert!(logged.last_login_at.is_some());
    }
}
