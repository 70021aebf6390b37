/// Database models for Notehub
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts and authentication
/// - `note`: Personal notes with unique slugs
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
/// # Ok(())
/// # }
/// ```

pub mod note;
pub mod user;
