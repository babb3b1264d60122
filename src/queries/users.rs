use uuid::Uuid;

use crate::{
    database::DbPool,
    error::{Error, Result},
    models::users::{NewUser, User},
};

/// Creates a new user in the database.
pub async fn create_user(pool: &DbPool, new_user: NewUser) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, email, password_hash)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, email, password_hash, created_at, updated_at
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(&new_user.name)
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        let error_msg = e.to_string().to_lowercase();

        // Check for unique constraint violations
        if error_msg.contains("unique")
            || error_msg.contains("duplicate key")
            || error_msg.contains("users_email_key")
        {
            Error::validation("email", "User already exists")
        } else {
            Error::Sqlx(e)
        }
    })?;

    Ok(user)
}

/// Gets a single user by their email address. The user may not exist.
pub async fn find_user_by_email(pool: &DbPool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, created_at, updated_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(Error::Sqlx)?;

    Ok(user)
}
