/// Page handlers
///
/// This module contains all route handlers organized by page group:
///
/// - `home`: Public landing page
/// - `health`: Health check endpoint
/// - `auth`: Signup, login, and logout pages
/// - `notes`: The note pages (list, add, success, detail, edit, delete)
///
/// Template rendering is out of scope; each page handler returns the
/// context its template would receive as a JSON document, and forms are
/// JSON request bodies.

pub mod auth;
pub mod health;
pub mod home;
pub mod notes;

use serde::Serialize;
use std::collections::BTreeMap;

/// Per-field validation messages, keyed by field name
///
/// Form-wide errors use the `__all__` key.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Key for errors that do not belong to a single field
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Context view of a form: the submitted (or initial) values plus
/// per-field error messages
#[derive(Debug, Serialize)]
pub struct FormContext<T: Serialize> {
    /// Field values to prefill the form with
    pub values: T,

    /// Validation messages, empty for an unbound or valid form
    pub errors: FieldErrors,
}

impl<T: Serialize> FormContext<T> {
    /// A form with no errors (initial display)
    pub fn unbound(values: T) -> Self {
        Self {
            values,
            errors: FieldErrors::new(),
        }
    }

    /// A redisplayed form carrying validation errors
    pub fn with_errors(values: T, errors: FieldErrors) -> Self {
        Self { values, errors }
    }
}

/// Page context wrapping a form, for form-bearing pages
#[derive(Debug, Serialize)]
pub struct FormPage<T: Serialize> {
    /// The form the page's template renders
    pub form: FormContext<T>,
}

/// Collects `validator` derive output into per-field message lists
pub fn collect_field_errors(errors: &validator::ValidationErrors) -> FieldErrors {
    let mut collected = FieldErrors::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "Validation failed".to_string());
            collected
                .entry(field.to_string())
                .or_insert_with(Vec::new)
                .push(message);
        }
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Default, Serialize, Deserialize, Validate)]
    struct DemoForm {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
    }

    #[test]
    fn test_collect_field_errors() {
        let form = DemoForm { name: String::new() };
        let errors = form.validate().unwrap_err();

        let collected = collect_field_errors(&errors);
        assert_eq!(collected["name"], vec!["Name is required".to_string()]);
    }

    #[test]
    fn test_unbound_form_has_no_errors() {
        let context = FormContext::unbound(DemoForm::default());
        assert!(context.errors.is_empty());
    }
}
