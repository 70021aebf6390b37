/// Authentication pages
///
/// Signup, login, and logout. Logging in issues a session token (see
/// `notehub_shared::auth::jwt`) delivered in an HttpOnly cookie; logging
/// out clears the cookie.
///
/// # Endpoints
///
/// - `GET  /auth/signup` - signup form
/// - `POST /auth/signup` - create an account, redirect to login
/// - `GET  /auth/login` - login form
/// - `POST /auth/login` - authenticate, set cookie, redirect to `next`
/// - `GET  /auth/logout` - clear the session cookie
///
/// Failed submissions redisplay the form (200) with field-level messages;
/// invalid credentials produce a form-wide message under `__all__` without
/// revealing whether the username exists.

use crate::{
    app::AppState,
    error::{redirect_found, PageError, PageResult},
    routes::{collect_field_errors, FieldErrors, FormContext, FormPage, NON_FIELD_ERRORS},
};
use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use notehub_shared::{
    auth::{jwt, password, session},
    models::user::{CreateUser, User},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Path of the login page, the redirect target for anonymous requests
pub const LOGIN_URL: &str = "/auth/login";

/// Login form fields
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    /// Login name
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Plaintext password; never serialized back into the page context
    #[serde(default, skip_serializing)]
    pub password: String,

    /// Where to go after a successful login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Signup form fields
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SignupForm {
    /// Desired login name
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,

    /// Plaintext password; never serialized back into the page context
    #[serde(default, skip_serializing)]
    pub password: String,
}

/// Logout page context
#[derive(Debug, Serialize)]
pub struct LogoutContext {
    /// Page identifier for the template
    pub page: &'static str,

    /// Whether a session was cleared
    pub logged_out: bool,
}

/// Login form page
pub async fn login_page() -> Json<FormPage<LoginForm>> {
    Json(FormPage {
        form: FormContext::unbound(LoginForm::default()),
    })
}

/// Login action
///
/// On success sets the session cookie and redirects (302) to the `next`
/// target, defaulting to the home page. On bad credentials redisplays the
/// form with a form-wide error; the message does not distinguish unknown
/// usernames from wrong passwords.
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> PageResult<Response> {
    let errors = match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => collect_field_errors(&e),
    };
    if !errors.is_empty() {
        return Ok(Json(FormPage {
            form: FormContext::with_errors(form, errors),
        })
        .into_response());
    }

    let user = match User::find_by_username(&state.db, &form.username).await? {
        Some(user) => user,
        None => return Ok(invalid_credentials(form)),
    };

    if !password::verify_password(&form.password, &user.password_hash)? {
        return Ok(invalid_credentials(form));
    }

    User::update_last_login(&state.db, user.id).await?;

    let claims = jwt::Claims::new(user.id);
    let token = jwt::create_token(&claims, state.session_secret())?;

    // Only same-site targets; an absolute `next` would be an open redirect.
    let target = form
        .next
        .clone()
        .filter(|next| next.starts_with('/') && !next.starts_with("//"))
        .unwrap_or_else(|| "/".to_string());

    let mut response = redirect_found(&target);
    set_cookie(&mut response, &session::session_cookie(&token))?;
    Ok(response)
}

/// Signup form page
pub async fn signup_page() -> Json<FormPage<SignupForm>> {
    Json(FormPage {
        form: FormContext::unbound(SignupForm::default()),
    })
}

/// Signup action
///
/// Creates the account and redirects (302) to the login page. Duplicate
/// usernames and weak passwords redisplay the form with field errors.
pub async fn signup(
    State(state): State<AppState>,
    Json(form): Json<SignupForm>,
) -> PageResult<Response> {
    let mut errors = match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => collect_field_errors(&e),
    };

    if let Err(message) = password::validate_password_strength(&form.password) {
        errors.entry("password".to_string()).or_default().push(message);
    }

    if !errors.contains_key("username")
        && User::username_exists(&state.db, &form.username).await?
    {
        errors
            .entry("username".to_string())
            .or_default()
            .push("This username is already taken".to_string());
    }

    if !errors.is_empty() {
        return Ok(Json(FormPage {
            form: FormContext::with_errors(form, errors),
        })
        .into_response());
    }

    let password_hash = password::hash_password(&form.password)?;
    User::create(
        &state.db,
        CreateUser {
            username: form.username.clone(),
            password_hash,
        },
    )
    .await?;

    Ok(redirect_found(LOGIN_URL))
}

/// Logout action
///
/// Clears the session cookie. Public and idempotent: logging out while
/// not logged in is a no-op.
pub async fn logout() -> PageResult<Response> {
    let mut response = Json(LogoutContext {
        page: "logout",
        logged_out: true,
    })
    .into_response();
    set_cookie(&mut response, &session::clear_session_cookie())?;
    Ok(response)
}

/// Builds the invalid-credentials form redisplay
fn invalid_credentials(form: LoginForm) -> Response {
    let mut errors = FieldErrors::new();
    errors
        .entry(NON_FIELD_ERRORS.to_string())
        .or_default()
        .push("Invalid username or password".to_string());

    Json(FormPage {
        form: FormContext::with_errors(form, errors),
    })
    .into_response()
}

fn set_cookie(response: &mut Response, cookie: &str) -> Result<(), PageError> {
    let value = HeaderValue::from_str(cookie)
        .map_err(|e| PageError::InternalError(format!("Invalid cookie value: {}", e)))?;
    response.headers_mut().insert(header::SET_COOKIE, value);
    Ok(())
}
