use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

use super::repo::User;
use crate::error::ApiError;
use crate::state::AppState;

pub(crate) fn is_valid_username(name: &str) -> bool {
    lazy_static! {
        static ref USERNAME_RE: Regex =
            Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]{0,63}$").unwrap();
    }
    USERNAME_RE.is_match(name)
}

/// Resolves the `X-User` header to a user row, creating the row on first
/// contact, and yields its id.
#[derive(Debug)]
pub struct Identity(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let username = parts
            .headers
            .get("x-user")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing X-User header".into()))?;

        if !is_valid_username(username) {
            return Err(ApiError::Unauthorized("Invalid X-User header".into()));
        }

        let user = User::upsert_by_username(&state.db, username).await?;
        Ok(Identity(user.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_usernames() {
        assert!(is_valid_username("alice"));
        assert!(is_valid_username("bob42"));
        assert!(is_valid_username("a.b-c_d"));
    }

    #[test]
    fn rejects_empty_and_oversized() {
        assert!(!is_valid_username(""));
        assert!(!is_valid_username(&"x".repeat(65)));
        assert!(is_valid_username(&"x".repeat(64)));
    }

    #[test]
    fn rejects_leading_punctuation_and_whitespace() {
        assert!(!is_valid_username(".alice"));
        assert!(!is_valid_username("-alice"));
        assert!(!is_valid_username("al ice"));
        assert!(!is_valid_username("alice!"));
    }
}
