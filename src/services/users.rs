use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use secrecy::ExposeSecret;

use crate::{
    config::AuthConfig,
    database::DbPool,
    error::{Error, Result},
    models::users::{LoginResult, LoginUser, NewUser, RegisterUser, User},
    queries::users,
    services::jwt,
    validation,
};

/// Registers a new user with input validation and password hashing.
///
/// The plaintext password is checked for length at input time and only the
/// argon2 hash is stored. A duplicate email surfaces as a field-level
/// validation error.
pub async fn register_user(pool: &DbPool, register: RegisterUser) -> Result<User> {
    let name = validation::validate_user_name(&register.name)?;
    let email = validation::validate_email(&register.email, "email")?;
    validation::validate_password(&register.password)?;

    // Hash the password using Argon2
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(register.password.as_bytes(), &salt)
        .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?
        .to_string();

    let new_user = NewUser {
        name,
        email,
        password_hash,
    };

    let user = users::create_user(pool, new_user).await?;

    tracing::info!(operation = "register_user", user_id = %user.id, "User registered");

    Ok(user)
}

/// Authenticates a user and issues a bearer token.
///
/// Unknown email and wrong password both produce the same
/// invalid-credentials response; the caller cannot probe for registered
/// addresses.
pub async fn login_user(pool: &DbPool, login: LoginUser, auth: &AuthConfig) -> Result<LoginResult> {
    let email = login.email.trim().to_lowercase();

    let user = users::find_user_by_email(pool, &email)
        .await?
        .ok_or(Error::InvalidCredentials)?;

    if !verify_password(&login.password, &user.password_hash)? {
        return Err(Error::InvalidCredentials);
    }

    let token = jwt::generate_jwt(
        user.id,
        auth.jwt_secret.expose_secret(),
        auth.token_ttl_minutes,
    )?;
    let expires_at = Utc::now() + Duration::minutes(auth.token_ttl_minutes);

    tracing::info!(operation = "login_user", user_id = %user.id, "Login successful");

    Ok(LoginResult {
        user: (&user).into(),
        token,
        expires_at,
    })
}

/// Verifies a password against a stored argon2 hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| Error::Internal(format!("Invalid password hash: {}", e)))?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::Internal(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}
