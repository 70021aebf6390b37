/// Note model and database operations
///
/// This module provides the Note model: a personal text note owned by a
/// single user and addressed by a globally unique, URL-safe slug. The slug
/// is supplied by the user or derived from the title (see [`crate::slug`]);
/// the UNIQUE constraint on the column is the transactional backstop for
/// the uniqueness invariant.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE notes (
///     id BLOB PRIMARY KEY,
///     title TEXT NOT NULL,
///     text TEXT NOT NULL,
///     slug TEXT NOT NULL UNIQUE,
///     author_id BLOB NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TEXT NOT NULL,
///     updated_at TEXT NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use notehub_shared::models::note::{CreateNote, Note};
/// use notehub_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example(author_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::in_memory()).await?;
///
/// let note = Note::create(
///     &pool,
///     CreateNote {
///         title: "Shopping list".to_string(),
///         text: "milk, bread".to_string(),
///         slug: None, // derived from the title
///         author_id,
///     },
/// )
/// .await?;
/// assert_eq!(note.slug, "shopping-list");
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::slug::resolve_slug;

/// Note model representing one personal note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    /// Unique note ID (UUID v4)
    pub id: Uuid,

    /// Short title, required
    pub title: String,

    /// Body text, required
    pub text: String,

    /// URL-safe identifier, unique across all notes
    pub slug: String,

    /// Owning user; fixed at creation
    pub author_id: Uuid,

    /// When the note was created
    pub created_at: DateTime<Utc>,

    /// When the note was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new note
#[derive(Debug, Clone)]
pub struct CreateNote {
    /// Note title
    pub title: String,

    /// Note body
    pub text: String,

    /// Explicit slug; derived from the title when None or empty
    pub slug: Option<String>,

    /// Owning user
    pub author_id: Uuid,
}

/// Input for updating an existing note
///
/// The author cannot be changed; all content fields are replaced.
#[derive(Debug, Clone)]
pub struct UpdateNote {
    /// New title
    pub title: String,

    /// New body
    pub text: String,

    /// New slug; derived from the new title when None or empty
    pub slug: Option<String>,
}

impl Note {
    /// Creates a new note in the database
    ///
    /// When no slug is supplied it is derived from the title.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The slug already exists (unique constraint violation)
    /// - Database connection fails
    pub async fn create(pool: &SqlitePool, data: CreateNote) -> Result<Self, sqlx::Error> {
        let slug = resolve_slug(data.slug.as_deref(), &data.title);
        let now = Utc::now();

        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (id, title, text, slug, author_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, title, text, slug, author_id, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.title)
        .bind(data.text)
        .bind(slug)
        .bind(data.author_id)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(note)
    }

    /// Finds a note by its slug
    ///
    /// Returns the note if found, None otherwise. Callers enforcing the
    /// author-only rule should go through
    /// [`crate::auth::authorization::load_note_for`] instead.
    pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Self>, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, title, text, slug, author_id, created_at, updated_at
            FROM notes
            WHERE slug = ?
            "#,
        )
        .bind(slug)
        .fetch_optional(pool)
        .await?;

        Ok(note)
    }

    /// Finds a note by ID
    pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, title, text, slug, author_id, created_at, updated_at
            FROM notes
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(note)
    }

    /// Lists all notes owned by a user, in insertion order
    pub async fn list_by_author(
        pool: &SqlitePool,
        author_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, title, text, slug, author_id, created_at, updated_at
            FROM notes
            WHERE author_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(author_id)
        .fetch_all(pool)
        .await?;

        Ok(notes)
    }

    /// Checks whether a slug is already taken
    ///
    /// `exclude_id` skips one note, so that editing a note without changing
    /// its slug does not collide with itself.
    pub async fn slug_exists(
        pool: &SqlitePool,
        slug: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, sqlx::Error> {
        let (count,): (i64,) = match exclude_id {
            Some(id) => {
                sqlx::query_as("SELECT COUNT(*) FROM notes WHERE slug = ? AND id != ?")
                    .bind(slug)
                    .bind(id)
                    .fetch_one(pool)
                    .await?
            }
            None => {
                sqlx::query_as("SELECT COUNT(*) FROM notes WHERE slug = ?")
                    .bind(slug)
                    .fetch_one(pool)
                    .await?
            }
        };

        Ok(count > 0)
    }

    /// Updates an existing note's content
    ///
    /// When no slug is supplied it is derived from the new title. The
    /// `updated_at` timestamp is refreshed; returns the updated note, or
    /// None if the note doesn't exist.
    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        data: UpdateNote,
    ) -> Result<Option<Self>, sqlx::Error> {
        let slug = resolve_slug(data.slug.as_deref(), &data.title);

        let note = sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes
            SET title = ?, text = ?, slug = ?, updated_at = ?
            WHERE id = ?
            RETURNING id, title, text, slug, author_id, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.text)
        .bind(slug)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(note)
    }

    /// Deletes a note by ID
    ///
    /// Returns true if the note was deleted, false if it didn't exist.
    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts total number of notes
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notes")
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
    use crate::models::user::{CreateUser, User};

    async fn test_pool() -> SqlitePool {
        let pool = create_pool(DatabaseConfig::in_memory())
            .await
            .expect("Pool should open");
        run_migrations(&pool).await.expect("Migrations should run");
        pool
    }

    async fn test_user(pool: &SqlitePool, username: &str) -> User {
        User::create(
            pool,
            CreateUser {
                username: username.to_string(),
                password_hash: "hash".to_string(),
            },
        )
        .await
        .expect("User create should succeed")
    }

    #[tokio::test]
    async fn test_create_with_explicit_slug() {
        let pool = test_pool().await;
        let author = test_user(&pool, "author").await;

        let note = Note::create(
            &pool,
            CreateNote {
                title: "A note".to_string(),
                text: "body".to_string(),
                slug: Some("custom-slug".to_string()),
                author_id: author.id,
            },
        )
        .await
        .unwrap();

        assert_eq!(note.slug, "custom-slug");
        assert_eq!(note.author_id, author.id);

        let found = Note::find_by_slug(&pool, "custom-slug").await.unwrap().unwrap();
        assert_eq!(found, note);
    }

    #[tokio::test]
    async fn test_create_derives_slug_from_title() {
        let pool = test_pool().await;
        let author = test_user(&pool, "author").await;

        let note = Note::create(
            &pool,
            CreateNote {
                title: "Заголовок".to_string(),
                text: "Текст".to_string(),
                slug: None,
                author_id: author.id,
            },
        )
        .await
        .unwrap();

        assert_eq!(note.slug, "zagolovok");
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_rejected_by_store() {
        let pool = test_pool().await;
        let author = test_user(&pool, "author").await;

        let make = |slug: &str| CreateNote {
            title: "Title".to_string(),
            text: "body".to_string(),
            slug: Some(slug.to_string()),
            author_id: author.id,
        };

        Note::create(&pool, make("taken")).await.unwrap();
        assert!(Note::create(&pool, make("taken")).await.is_err());
        assert_eq!(Note::count(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_slug_exists_excludes_given_note() {
        let pool = test_pool().await;
        let author = test_user(&pool, "author").await;

        let note = Note::create(
            &pool,
            CreateNote {
                title: "Title".to_string(),
                text: "body".to_string(),
                slug: Some("mine".to_string()),
                author_id: author.id,
            },
        )
        .await
        .unwrap();

        assert!(Note::slug_exists(&pool, "mine", None).await.unwrap());
        assert!(!Note::slug_exists(&pool, "mine", Some(note.id)).await.unwrap());
        assert!(!Note::slug_exists(&pool, "other", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_by_author_is_scoped_to_owner() {
        let pool = test_pool().await;
        let author = test_user(&pool, "author").await;
        let reader = test_user(&pool, "reader").await;

        let note = Note::create(
            &pool,
            CreateNote {
                title: "Mine".to_string(),
                text: "body".to_string(),
                slug: None,
                author_id: author.id,
            },
        )
        .await
        .unwrap();

        let own = Note::list_by_author(&pool, author.id).await.unwrap();
        assert_eq!(own, vec![note]);

        let other = Note::list_by_author(&pool, reader.id).await.unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_content() {
        let pool = test_pool().await;
        let author = test_user(&pool, "author").await;

        let note = Note::create(
            &pool,
            CreateNote {
                title: "Old".to_string(),
                text: "old body".to_string(),
                slug: None,
                author_id: author.id,
            },
        )
        .await
        .unwrap();

        let updated = Note::update(
            &pool,
            note.id,
            UpdateNote {
                title: "New title".to_string(),
                text: "new body".to_string(),
                slug: Some("new-slug".to_string()),
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.title, "New title");
        assert_eq!(updated.text, "new body");
        assert_eq!(updated.slug, "new-slug");
        assert_eq!(updated.author_id, author.id);

        assert!(Note::update(
            &pool,
            Uuid::new_v4(),
            UpdateNote {
                title: "x".to_string(),
                text: "y".to_string(),
                slug: None,
            },
        )
        .await
        .unwrap()
        .is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = test_pool().await;
        let author = test_user(&pool, "author").await;

        let note = Note::create(
            &pool,
            CreateNote {
                title: "Doomed".to_string(),
                text: "body".to_string(),
                slug: None,
                author_id: author.id,
            },
        )
        .await
        .unwrap();

        assert!(Note::delete(&pool, note.id).await.unwrap());
        assert!(!Note::delete(&pool, note.id).await.unwrap());
        assert_eq!(Note::count(&pool).await.unwrap(), 0);
    }
}
