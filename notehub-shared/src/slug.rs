/// Slug derivation policy for note identifiers
///
/// A slug is the URL-safe unique identifier of a note. Users may supply one
/// explicitly; when they don't, it is derived deterministically from the
/// note title by transliteration and normalization (the `slug` crate, which
/// lowercases, transliterates non-ASCII, and hyphenates). The same title
/// always yields the same slug.
///
/// # Example
///
/// ```
/// use notehub_shared::slug::{derive_slug, resolve_slug};
///
/// assert_eq!(derive_slug("Заголовок"), "zagolovok");
/// assert_eq!(derive_slug("Shopping list #2"), "shopping-list-2");
///
/// assert_eq!(resolve_slug(Some("custom-slug"), "Title"), "custom-slug");
/// assert_eq!(resolve_slug(None, "Title"), "title");
/// ```

/// Maximum length of a slug, in characters.
pub const SLUG_MAX_LEN: usize = 100;

/// Fixed suffix appended to a conflicting slug value in the field-level
/// validation error shown when a supplied slug is already taken.
pub const SLUG_TAKEN_WARNING: &str =
    " - this slug already exists, please provide a unique value!";

/// Derives a slug from a note title.
///
/// Deterministic: transliterates and normalizes the title, then truncates
/// to [`SLUG_MAX_LEN`] characters. The output is ASCII.
pub fn derive_slug(title: &str) -> String {
    let derived = slug::slugify(title);
    if derived.len() > SLUG_MAX_LEN {
        derived.chars().take(SLUG_MAX_LEN).collect()
    } else {
        derived
    }
}

/// Resolves the slug for a note being created or edited.
///
/// An explicit, non-empty slug is used verbatim (uniqueness is checked
/// separately); otherwise the slug is derived from the title.
pub fn resolve_slug(explicit: Option<&str>, title: &str) -> String {
    match explicit {
        Some(slug) if !slug.is_empty() => slug.to_string(),
        _ => derive_slug(title),
    }
}
