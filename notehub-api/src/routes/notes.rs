/// Note pages
///
/// The core of the service: list, create, view, edit, and delete personal
/// notes. Every route here sits behind the session middleware; anonymous
/// requests never reach these handlers. The author-only rule for
/// single-note pages is enforced through
/// [`notehub_shared::auth::authorization::load_note_for`], which reports
/// other users' notes as not found.
///
/// # Endpoints
///
/// - `GET  /notes/` - list own notes
/// - `GET  /notes/add` - blank note form
/// - `POST /notes/add` - create a note, redirect to the success page
/// - `GET  /notes/done` - success page
/// - `GET  /notes/note/:slug` - note detail (author only)
/// - `GET  /notes/edit/:slug` - prefilled edit form (author only)
/// - `POST /notes/edit/:slug` - update a note (author only)
/// - `GET  /notes/delete/:slug` - delete confirmation (author only)
/// - `POST /notes/delete/:slug` - delete a note (author only)
///
/// Create and edit share one form. A submission whose slug (supplied or
/// derived from the title) is already taken redisplays the form with a
/// `slug` field error carrying the conflicting value plus the fixed
/// warning suffix; nothing is persisted.

use crate::{
    app::AppState,
    error::{redirect_found, PageResult},
    routes::{collect_field_errors, FieldErrors, FormContext, FormPage},
};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use notehub_shared::{
    auth::{authorization::load_note_for, session::AuthContext},
    models::note::{CreateNote, Note, UpdateNote},
    slug::{resolve_slug, SLUG_TAKEN_WARNING},
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use validator::Validate;

/// Path of the success page, the redirect target after a mutation
pub const SUCCESS_URL: &str = "/notes/done";

/// Note create/edit form fields
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NoteForm {
    /// Note title
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    /// Note body
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,

    /// Explicit slug; derived from the title when omitted or empty
    #[validate(length(max = 100, message = "Slug must be at most 100 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// Outcome of cleaning a note form
enum CleanedForm {
    /// All checks passed; `slug` is the resolved (supplied or derived) value
    Valid { slug: String },

    /// One or more fields failed; redisplay with these messages
    Invalid(FieldErrors),
}

impl NoteForm {
    /// Prefills the form from an existing note (edit page)
    fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            text: note.text.clone(),
            slug: Some(note.slug.clone()),
        }
    }

    /// Validates field constraints and the slug-uniqueness invariant
    ///
    /// `editing` excludes that note from the uniqueness check, so keeping
    /// a slug while editing does not collide with itself. The store's
    /// UNIQUE constraint remains the transactional backstop for races.
    async fn clean(
        &self,
        pool: &SqlitePool,
        editing: Option<&Note>,
    ) -> Result<CleanedForm, sqlx::Error> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => collect_field_errors(&e),
        };

        let slug = resolve_slug(self.slug.as_deref(), &self.title);
        if !errors.contains_key("slug")
            && !slug.is_empty()
            && Note::slug_exists(pool, &slug, editing.map(|note| note.id)).await?
        {
            errors
                .entry("slug".to_string())
                .or_default()
                .push(format!("{}{}", slug, SLUG_TAKEN_WARNING));
        }

        if errors.is_empty() {
            Ok(CleanedForm::Valid { slug })
        } else {
            Ok(CleanedForm::Invalid(errors))
        }
    }
}

/// Note list context
#[derive(Debug, Serialize)]
pub struct NoteListContext {
    /// The requesting user's notes, insertion order
    pub notes: Vec<Note>,
}

/// Single-note context (detail and delete-confirmation pages)
#[derive(Debug, Serialize)]
pub struct NoteDetailContext {
    /// The requested note
    pub note: Note,
}

/// Success page context
#[derive(Debug, Serialize)]
pub struct SuccessContext {
    /// Page identifier for the template
    pub page: &'static str,

    /// Acknowledgement shown after create/edit/delete
    pub message: &'static str,
}

/// Note list page
///
/// Only the requesting user's notes appear; other users' notes are never
/// in the collection.
pub async fn note_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> PageResult<Json<NoteListContext>> {
    let notes = Note::list_by_author(&state.db, auth.user_id).await?;
    Ok(Json(NoteListContext { notes }))
}

/// Blank note form page
pub async fn add_page(Extension(_auth): Extension<AuthContext>) -> Json<FormPage<NoteForm>> {
    Json(FormPage {
        form: FormContext::unbound(NoteForm::default()),
    })
}

/// Create action
///
/// On success persists a note owned by the requester and redirects (302)
/// to the success page; on validation failure redisplays the form with
/// errors and persists nothing.
pub async fn create_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(form): Json<NoteForm>,
) -> PageResult<Response> {
    match form.clean(&state.db, None).await? {
        CleanedForm::Valid { slug } => {
            Note::create(
                &state.db,
                CreateNote {
                    title: form.title.clone(),
                    text: form.text.clone(),
                    slug: Some(slug),
                    author_id: auth.user_id,
                },
            )
            .await?;
            Ok(redirect_found(SUCCESS_URL))
        }
        CleanedForm::Invalid(errors) => Ok(Json(FormPage {
            form: FormContext::with_errors(form, errors),
        })
        .into_response()),
    }
}

/// Success page
pub async fn success_page(Extension(_auth): Extension<AuthContext>) -> Json<SuccessContext> {
    Json(SuccessContext {
        page: "success",
        message: "Done!",
    })
}

/// Note detail page (author only)
pub async fn note_detail(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(slug): Path<String>,
) -> PageResult<Json<NoteDetailContext>> {
    let note = load_note_for(&state.db, &slug, auth.user_id).await?;
    Ok(Json(NoteDetailContext { note }))
}

/// Prefilled edit form page (author only)
pub async fn edit_page(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(slug): Path<String>,
) -> PageResult<Json<FormPage<NoteForm>>> {
    let note = load_note_for(&state.db, &slug, auth.user_id).await?;
    Ok(Json(FormPage {
        form: FormContext::unbound(NoteForm::from_note(&note)),
    }))
}

/// Edit action (author only)
pub async fn update_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(slug): Path<String>,
    Json(form): Json<NoteForm>,
) -> PageResult<Response> {
    let note = load_note_for(&state.db, &slug, auth.user_id).await?;

    match form.clean(&state.db, Some(&note)).await? {
        CleanedForm::Valid { slug } => {
            Note::update(
                &state.db,
                note.id,
                UpdateNote {
                    title: form.title.clone(),
                    text: form.text.clone(),
                    slug: Some(slug),
                },
            )
            .await?;
            Ok(redirect_found(SUCCESS_URL))
        }
        CleanedForm::Invalid(errors) => Ok(Json(FormPage {
            form: FormContext::with_errors(form, errors),
        })
        .into_response()),
    }
}

/// Delete confirmation page (author only)
pub async fn delete_page(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(slug): Path<String>,
) -> PageResult<Json<NoteDetailContext>> {
    let note = load_note_for(&state.db, &slug, auth.user_id).await?;
    Ok(Json(NoteDetailContext { note }))
}

/// Delete action (author only)
pub async fn delete_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(slug): Path<String>,
) -> PageResult<Response> {
    let note = load_note_for(&state.db, &slug, auth.user_id).await?;
    Note::delete(&state.db, note.id).await?;
    Ok(redirect_found(SUCCESS_URL))
}
