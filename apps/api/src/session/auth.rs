//! Shared-password gate and the session extractor for protected routes.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// Header carrying the token returned by `POST /api/v1/session/login`.
pub const SESSION_HEADER: &str = "x-session-id";

/// Compares a submitted password with the team password in constant time.
///
/// The submission is padded or truncated to the expected length first, so the
/// comparison cost depends only on the team password.
pub fn password_matches(submitted: &str, expected: &str) -> bool {
    let expected = expected.as_bytes();
    let mut candidate = vec![0u8; expected.len()];
    for (slot, byte) in candidate.iter_mut().zip(submitted.bytes()) {
        *slot = byte;
    }
    let same_len = (submitted.len() as u64).ct_eq(&(expected.len() as u64));
    (candidate.as_slice().ct_eq(expected) & same_len).into()
}

/// A live session, resolved from the `x-session-id` header. Resolving it
/// refreshes the session's idle clock.
/// Rejects with 401 when the header is missing, malformed, unknown or expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentSession(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .ok_or(AppError::Unauthorized)?;

        if !state.sessions.touch(id).await {
            return Err(AppError::Unauthorized);
        }
        Ok(CurrentSession(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_matches_exactly() {
        assert!(password_matches("team-secret", "team-secret"));
        assert!(!password_matches("team-secreT", "team-secret"));
        assert!(!password_matches("team", "team-secret"));
        assert!(!password_matches("", "team-secret"));
    }

    #[test]
    fn test_prefix_and_padding_do_not_match() {
        // a prefix padded with NULs must not collide with the real password
        assert!(!password_matches("team\0\0\0\0\0\0\0", "team-secret"));
        assert!(!password_matches("team-secret-and-more", "team-secret"));
        assert!(!password_matches("team-secret\0", "team-secret"));
        assert!(password_matches("", ""));
    }
}
