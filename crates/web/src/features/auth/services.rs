use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::LazyLock;

use storage::{
    dto::auth::{LoginRequest, RegisterRequest},
    models::{NewUser, User},
    repository::UserStore,
};

use crate::error::{WebError, WebResult};
use crate::tokens::TokenService;

pub fn hash_password(password: &str) -> WebResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| WebError::InternalServerError(format!("failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, password_hash: &str) -> WebResult<bool> {
    let parsed = PasswordHash::new(password_hash).map_err(|e| {
        WebError::InternalServerError(format!("stored password hash is unreadable: {}", e))
    })?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Verified against on unknown emails so both login failures take the same time.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("not-a-real-password").ok());

/// Register a new account
pub async fn register(users: &dyn UserStore, request: &RegisterRequest) -> WebResult<User> {
    let new_user = NewUser {
        name: request.name.clone(),
        email: request.email.clone(),
        password_hash: hash_password(&request.password)?,
    };

    Ok(users.create(&new_user).await?)
}

/// Check credentials, returning the matching account
pub async fn authenticate(users: &dyn UserStore, request: &LoginRequest) -> WebResult<User> {
    let Some(user) = users.find_by_email(&request.email).await? else {
        if let Some(hash) = DUMMY_HASH.as_deref() {
            let _ = verify_password(&request.password, hash);
        }
        tracing::warn!("Login failed: unknown email");
        return Err(WebError::InvalidCredentials);
    };

    if !verify_password(&request.password, &user.password_hash)? {
        tracing::warn!(user_id = %user.id, "Login failed: wrong password");
        return Err(WebError::InvalidCredentials);
    }

    Ok(user)
}

/// Check credentials and issue a bearer token
pub async fn login(
    users: &dyn UserStore,
    tokens: &TokenService,
    request: &LoginRequest,
) -> WebResult<String> {
    let user = authenticate(users, request).await?;
    let token = tokens.issue(user.id, &user.email)?;

    tracing::info!(user_id = %user.id, "Issued bearer token");
    Ok(token)
}
