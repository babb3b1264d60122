//! Bearer-token minting and verification.
//!
//! Tokens are HS256 JWTs whose `sub` claim is the user id; the candidate
//! routes trust that claim without a per-request user lookup, so issuing
//! and verifying both live here, next to the header parsing.

use crate::error::{Error, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by an issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a UUID string
    pub sub: String,
    /// Expiration, Unix seconds
    pub exp: i64,
    /// Issue time, Unix seconds
    pub iat: i64,
}

/// Mints a bearer token for a user, valid for `expiration_minutes` from
/// now (the lifetime comes from `auth.token_ttl_minutes`).
pub fn generate_jwt(user_id: Uuid, secret: &str, expiration_minutes: i64) -> Result<String> {
    let now = Utc::now();
    let expiration = now + Duration::minutes(expiration_minutes);

    let claims = Claims {
        sub: user_id.to_string(),
        exp: expiration.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| Error::Internal(format!("Failed to generate JWT: {}", e)))
}

/// Checks a token's signature and expiration and returns its claims.
///
/// Expired tokens and bad signatures get distinct messages; everything
/// else is reported as a generic invalid token.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|e| {
        let error_msg = e.to_string().to_lowercase();
        if error_msg.contains("expired") {
            Error::Authentication("Token has expired".to_string())
        } else if error_msg.contains("signature") {
            Error::Authentication("Invalid token signature".to_string())
        } else {
            Error::Authentication(format!("Invalid token: {}", e))
        }
    })?;

    Ok(token_data.claims)
}

/// Verifies a token and parses its `sub` claim into a user id.
pub fn get_user_id_from_token(token: &str, secret: &str) -> Result<Uuid> {
    let claims = verify_jwt(token, secret)?;
    Uuid::parse_str(&claims.sub)
        .map_err(|_| Error::Internal("Invalid user_id in token".to_string()))
}

/// Full Authorization-header path: parse the `Bearer <token>` value,
/// verify it, and return the authenticated user id.
pub fn authenticate_jwt_token(auth_header: Option<&str>, secret: &str) -> Result<Uuid> {
    let token = extract_token_from_header(auth_header)?;
    get_user_id_from_token(&token, secret)
}

/// Pulls the token out of a `Bearer <token>` header value. A missing
/// header, a different scheme, and an empty token are separate failures.
fn extract_token_from_header(auth_header: Option<&str>) -> Result<String> {
    match auth_header {
        Some(header) if header.starts_with("Bearer ") => {
            let token = header[7..].to_string();
            if token.is_empty() {
                return Err(Error::Authentication("Empty token".to_string()));
            }
            Ok(token)
        }
        Some(_) => Err(Error::Authentication(
            "Invalid Authorization header format. Expected: 'Bearer <token>'".to_string(),
        )),
        None => Err(Error::Authentication(
            "Missing Authorization header".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_jwt() {
        let user_id = Uuid::now_v7();
        let secret = "test-secret-key-for-testing";
        let token = generate_jwt(user_id, secret, 60).unwrap();
        assert!(!token.is_empty());
        assert!(token.contains('.'));
    }

    #[test]
    fn test_verify_jwt_valid() {
        let user_id = Uuid::now_v7();
        let secret = "test-secret-key-for-testing";
        let token = generate_jwt(user_id, secret, 60).unwrap();
        let claims = verify_jwt(&token, secret).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
    }

    #[test]
    fn test_verify_jwt_invalid_signature() {
        let user_id = Uuid::now_v7();
        let secret = "test-secret-key-for-testing";
        let token = generate_jwt(user_id, secret, 60).unwrap();
        let result = verify_jwt(&token, "wrong-secret");
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_jwt_invalid_format() {
        let result = verify_jwt("invalid.token.here", "test-secret-key-for-testing");
        assert!(result.is_err());
    }

    #[test]
    fn test_get_user_id_from_token() {
        let user_id = Uuid::now_v7();
        let secret = "test-secret-key-for-testing";
        let token = generate_jwt(user_id, secret, 60).unwrap();
        let extracted_id = get_user_id_from_token(&token, secret).unwrap();
        assert_eq!(extracted_id, user_id);
    }

    #[test]
    fn test_extract_token_from_header_valid() {
        let token = "my-jwt-token";
        let header = format!("Bearer {}", token);
        let extracted = extract_token_from_header(Some(&header)).unwrap();
        assert_eq!(extracted, token);
    }

    #[test]
    fn test_extract_token_from_header_missing() {
        assert!(extract_token_from_header(None).is_err());
    }

    #[test]
    fn test_extract_token_from_header_invalid_format() {
        assert!(extract_token_from_header(Some("InvalidFormat")).is_err());
    }

    #[test]
    fn test_extract_token_from_header_empty() {
        assert!(extract_token_from_header(Some("Bearer ")).is_err());
    }
}
