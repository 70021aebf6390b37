/// Authorization predicate for note access
///
/// Every single-note operation (detail, edit, delete) is author-only.
/// A note that exists but belongs to someone else is reported as not found,
/// never as forbidden, so the response does not confirm the slug's
/// existence to other users.
///
/// # Example
///
/// ```no_run
/// use notehub_shared::auth::authorization::load_note_for;
/// use sqlx::SqlitePool;
/// use uuid::Uuid;
///
/// # async fn example(pool: SqlitePool, user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let note = load_note_for(&pool, "my-note", user_id).await?;
/// println!("title: {}", note.title);
/// # Ok(())
/// # }
/// ```

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::note::Note;

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Note does not exist, or exists but is not owned by the requester
    #[error("Note not found")]
    NotFound,

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Checks whether a user is the author of a note
pub fn is_author(note: &Note, user_id: Uuid) -> bool {
    note.author_id == user_id
}

/// Requires that the user is the note's author
///
/// # Errors
///
/// Returns `AuthzError::NotFound` for non-authors. Deliberately not a
/// forbidden error: the caller must not learn that the note exists.
pub fn require_author(note: &Note, user_id: Uuid) -> Result<(), AuthzError> {
    if is_author(note, user_id) {
        Ok(())
    } else {
        Err(AuthzError::NotFound)
    }
}

/// Loads a note by slug on behalf of a user, enforcing the author-only rule
///
/// # Errors
///
/// Returns `AuthzError::NotFound` when the slug does not exist or the note
/// belongs to another user
pub async fn load_note_for(
    pool: &SqlitePool,
    slug: &str,
    user_id: Uuid,
) -> Result<Note, AuthzError> {
    let note = Note::find_by_slug(pool, slug)
        .await?
        .ok_or(AuthzError::NotFound)?;

    require_author(&note, user_id)?;

    Ok(note)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::db::pool::{create_pool, DatabaseConfig};
    use crate::models::note::CreateNote;
    use crate::models::user::{CreateUser, User};

    async fn fixture() -> (SqlitePool, User, User, Note) {
        let pool = create_pool(DatabaseConfig::in_memory())
            .await
            .expect("Pool should open");
        run_migrations(&pool).await.expect("Migrations should run");

        let author = User::create(
            &pool,
            CreateUser {
                username: "author".to_string(),
                password_hash: "hash".to_string(),
            },
        )
        .await
        .unwrap();

        let reader = User::create(
            &pool,
            CreateUser {
                username: "reader".to_string(),
                password_hash: "hash".to_string(),
            },
        )
        .await
        .unwrap();

        let note = Note::create(
            &pool,
            CreateNote {
                title: "A note".to_string(),
                text: "body".to_string(),
                slug: None,
                author_id: author.id,
            },
        )
        .await
        .unwrap();

        (pool, author, reader, note)
    }

    #[tokio::test]
    async fn test_author_passes_checks() {
        let (pool, author, _, note) = fixture().await;

        assert!(is_author(&note, author.id));
        assert!(require_author(&note, author.id).is_ok());

        let loaded = load_note_for(&pool, &note.slug, author.id).await.unwrap();
        assert_eq!(loaded.id, note.id);
    }

    #[tokio::test]
    async fn test_non_author_gets_not_found() {
        let (pool, _, reader, note) = fixture().await;

        assert!(!is_author(&note, reader.id));
        assert!(matches!(
            require_author(&note, reader.id),
            Err(AuthzError::NotFound)
        ));
        assert!(matches!(
            load_note_for(&pool, &note.slug, reader.id).await,
            Err(AuthzError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_missing_slug_is_not_found() {
        let (pool, author, _, _) = fixture().await;

        assert!(matches!(
            load_note_for(&pool, "no-such-slug", author.id).await,
            Err(AuthzError::NotFound)
        ));
    }
}
