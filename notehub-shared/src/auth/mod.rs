/// Authentication and authorization utilities
///
/// This module provides the security primitives for Notehub:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and validation
/// - [`jwt`]: session token generation and validation
/// - [`session`]: session cookie parsing and the request auth context
/// - [`authorization`]: the author-only access predicate for notes
///
/// # Example
///
/// ```no_run
/// use notehub_shared::auth::password::{hash_password, verify_password};
/// use notehub_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // Session token generation
/// let claims = Claims::new(Uuid::new_v4());
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long!!")?;
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod jwt;
pub mod password;
pub mod session;
