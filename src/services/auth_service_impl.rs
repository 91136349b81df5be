//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use chrono::Local;

use crate::config::SecurityConfig;
use crate::db::{NewViewer, Store, hash_password, verify_password};
use crate::services::auth_service::{
    AuthError, AuthService, AuthenticatedUser, ChangePasswordInput, RegisterInput, Role,
};

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, input: RegisterInput) -> Result<AuthenticatedUser, AuthError> {
        if self.store.username_taken(&input.username).await? {
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = hash_password(input.password, &self.security).await?;
        let viewer = self
            .store
            .create_viewer(NewViewer {
                username: input.username,
                password_hash,
                fname: input.fname,
                lname: input.lname,
                street: input.street,
                city: input.city,
                state: input.state,
                zipcode: input.zipcode,
                cid: input.cid,
                open_date: Local::now().date_naive(),
            })
            .await?;

        Ok(AuthenticatedUser {
            user_id: viewer.account,
            role: Role::Viewer,
            username: viewer.username,
            display_name: format!("{} {}", viewer.fname, viewer.lname),
        })
    }

    /// Admin accounts are checked first; usernames are unique across both tables.
    async fn login(&self, username: &str, password: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(admin) = self.store.find_admin_by_username(username).await? {
            if verify_password(admin.password_hash, password.to_string()).await? {
                return Ok(AuthenticatedUser {
                    user_id: admin.admin_id,
                    role: Role::Admin,
                    username: admin.username,
                    display_name: format!("{} {}", admin.fname, admin.lname),
                });
            }
            return Err(AuthError::InvalidCredentials);
        }

        let Some(viewer) = self.store.find_viewer_by_username(username).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(viewer.password_hash.clone(), password.to_string()).await? {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(AuthenticatedUser {
            user_id: viewer.account,
            role: Role::Viewer,
            username: viewer.username,
            display_name: format!("{} {}", viewer.fname, viewer.lname),
        })
    }

    async fn change_password(
        &self,
        account: i32,
        input: ChangePasswordInput,
    ) -> Result<(), AuthError> {
        let viewer = self
            .store
            .get_viewer(account)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !verify_password(viewer.password_hash.clone(), input.old_password).await? {
            return Err(AuthError::WrongPassword);
        }

        let stored_answer = viewer
            .security_answer
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| {
                AuthError::Validation("Security answer not set for this account".to_string())
            })?;

        if stored_answer != input.security_answer.trim() {
            return Err(AuthError::WrongSecurityAnswer);
        }

        let password_hash = hash_password(input.new_password, &self.security).await?;
        self.store
            .update_viewer_password(account, password_hash)
            .await?;

        Ok(())
    }

    async fn security_question(&self, account: i32) -> Result<Option<String>, AuthError> {
        let viewer = self
            .store
            .get_viewer(account)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(viewer.security_question.filter(|q| !q.trim().is_empty()))
    }
}
