/// User model and database operations
///
/// This module provides the User model and CRUD operations for managing
/// user accounts. Users own notes; a note is only visible to its author.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BLOB PRIMARY KEY,
///     username TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL,
///     created_at TEXT NOT NULL,
///     last_login_at TEXT
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use notehub_shared::models::user::{CreateUser, User};
/// use notehub_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::in_memory()).await?;
///
/// let user = User::create(
///     &pool,
///     CreateUser {
///         username: "author".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     },
/// )
/// .await?;
///
/// let found = User::find_by_username(&pool, "author").await?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// User model representing an account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Login name, unique across all users
    pub username: String,

    /// Argon2id password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the user last logged in (None if never logged in)
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Login name
    pub username: String,

    /// Argon2id password hash (NOT the plaintext password!)
    pub password_hash: String,
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Username already exists (unique constraint violation)
    /// - Database connection fails
    pub async fn create(pool: &SqlitePool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, username, password_hash, created_at, last_login_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.username)
        .bind(data.password_hash)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// Returns the user if found, None otherwise.
    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at, last_login_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by username
    ///
    /// Returns the user if found, None otherwise.
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at, last_login_at
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Checks whether a username is already taken
    pub async fn username_exists(pool: &SqlitePool, username: &str) -> Result<bool, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(pool)
            .await?;

        Ok(count > 0)
    }

    /// Updates the last login timestamp for a user
    ///
    /// Called after successful authentication. Returns true if the user was
    /// found and updated.
    pub async fn update_last_login(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET last_login_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts total number of users
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::db::pool::{create_pool, DatabaseConfig};

    async fn test_pool() -> SqlitePool {
        let pool = create_pool(DatabaseConfig::in_memory())
            .await
            .expect("Pool should open");
        run_migrations(&pool).await.expect("Migrations should run");
        pool
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let pool = test_pool().await;

        let user = User::create(
            &pool,
            CreateUser {
                username: "author".to_string(),
                password_hash: "hash".to_string(),
            },
        )
        .await
        .expect("Create should succeed");

        assert_eq!(user.username, "author");
        assert!(user.last_login_at.is_none());

        let by_id = User::find_by_id(&pool, user.id).await.unwrap().unwrap();
        assert_eq!(by_id.id, user.id);

        let by_name = User::find_by_username(&pool, "author").await.unwrap().unwrap();
        assert_eq!(by_name.id, user.id);

        assert!(User::find_by_username(&pool, "nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let pool = test_pool().await;

        let data = CreateUser {
            username: "taken".to_string(),
            password_hash: "hash".to_string(),
        };
        User::create(&pool, data.clone()).await.expect("First create succeeds");

        assert!(User::username_exists(&pool, "taken").await.unwrap());
        assert!(User::create(&pool, data).await.is_err());
        assert_eq!(User::count(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_last_login() {
        let pool = test_pool().await;

        let user = User::create(
            &pool,
            CreateUser {
                username: "author".to_string(),
                password_hash: "hash".to_string(),
            },
        )
        .await
        .unwrap();

        assert!(User::update_last_login(&pool, user.id).await.unwrap());

        let reloaded = User::find_by_id(&pool, user.id).await.unwrap().unwrap();
        assert!(reloaded.last_login_at.is_some());

        assert!(!User::update_last_login(&pool, Uuid::new_v4()).await.unwrap());
    }
}
