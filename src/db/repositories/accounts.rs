use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use tokio::task;

use crate::config::SecurityConfig;
use crate::entities::{admin, prelude::*, viewer};

/// Monthly charge applied to self-registered viewers.
pub const DEFAULT_MONTHLY_CHARGE: f64 = 9.99;

/// Fields required to open a viewer account.
#[derive(Debug, Clone)]
pub struct NewViewer {
    pub username: String,
    pub password_hash: String,
    pub fname: String,
    pub lname: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub cid: i32,
    pub open_date: NaiveDate,
}

pub struct AccountRepository {
    conn: DatabaseConnection,
}

impl AccountRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find_admin_by_username(&self, username: &str) -> Result<Option<admin::Model>> {
        let row = Admin::find()
            .filter(admin::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query admin by username")?;

        Ok(row)
    }

    pub async fn find_viewer_by_username(&self, username: &str) -> Result<Option<viewer::Model>> {
        let row = Viewer::find()
            .filter(viewer::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query viewer by username")?;

        Ok(row)
    }

    /// Usernames are unique across both account tables.
    pub async fn username_taken(&self, username: &str) -> Result<bool> {
        if self.find_admin_by_username(username).await?.is_some() {
            return Ok(true);
        }

        Ok(self.find_viewer_by_username(username).await?.is_some())
    }

    pub async fn create_viewer(&self, input: NewViewer) -> Result<viewer::Model> {
        let active = viewer::ActiveModel {
            username: Set(input.username),
            password_hash: Set(input.password_hash),
            fname: Set(input.fname),
            lname: Set(input.lname),
            street: Set(input.street),
            city: Set(input.city),
            state: Set(input.state),
            zipcode: Set(input.zipcode),
            open_date: Set(input.open_date),
            mcharge: Set(DEFAULT_MONTHLY_CHARGE),
            cid: Set(input.cid),
            security_question: Set(None),
            security_answer: Set(None),
            ..Default::default()
        };

        let row = active
            .insert(&self.conn)
            .await
            .context("Failed to insert viewer account")?;

        Ok(row)
    }

    pub async fn update_viewer_password(&self, account: i32, password_hash: String) -> Result<()> {
        let row = Viewer::find_by_id(account)
            .one(&self.conn)
            .await
            .context("Failed to query viewer for password update")?
            .ok_or_else(|| anyhow::anyhow!("Viewer not found: {account}"))?;

        let mut active: viewer::ActiveModel = row.into();
        active.password_hash = Set(password_hash);
        active.update(&self.conn).await?;

        Ok(())
    }
}

/// Verify a password against a stored hash.
/// Runs on the blocking pool because Argon2 is CPU-intensive and would
/// stall the async runtime if run inline.
pub async fn verify_password(password_hash: String, password: String) -> Result<bool> {
    let is_valid = task::spawn_blocking(move || {
        let parsed_hash = PasswordHash::new(&password_hash)
            .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

        let argon2 = Argon2::default();
        Ok::<bool, anyhow::Error>(
            argon2
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok(),
        )
    })
    .await
    .context("Password verification task panicked")??;

    Ok(is_valid)
}

/// Hash a password with Argon2id on the blocking pool, using the tuned
/// cost parameters from config.
pub async fn hash_password(password: String, config: &SecurityConfig) -> Result<String> {
    let config = config.clone();
    let hash = task::spawn_blocking(move || hash_password_sync(&password, &config))
        .await
        .context("Password hashing task panicked")??;

    Ok(hash)
}

fn hash_password_sync(password: &str, cfg: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        cfg.argon2_memory_cost_kib,
        cfg.argon2_time_cost,
        cfg.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify_round_trip() {
        let cfg = SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        };

        let hash = hash_password("hunter2!".to_string(), &cfg).await.unwrap();
        assert!(hash.starts_with("$argon2id$"));

        assert!(
            verify_password(hash.clone(), "hunter2!".to_string())
                .await
                .unwrap()
        );
        assert!(
            !verify_password(hash, "wrong-password".to_string())
                .await
                .unwrap()
        );
    }
}
