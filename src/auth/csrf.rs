use moka::future::Cache;
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::time::Duration;

use crate::error::CrmError;

const TOKEN_LEN: usize = 40;

/// Per-session form tokens.
///
/// One outstanding token per session. Any submission consumes it, matching or
/// not, so every rendered form fetches a fresh one.
#[derive(Clone)]
pub struct CsrfGuard {
    tokens: Cache<String, String>,
}

impl CsrfGuard {
    pub fn new(ttl: Duration) -> Self {
        let tokens = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(100_000)
            .build();

        Self { tokens }
    }

    /// Issue a token for the session, replacing any earlier one.
    pub async fn issue(&self, session_id: &str) -> String {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();

        self.tokens
            .insert(session_id.to_string(), token.clone())
            .await;
        token
    }

    pub async fn validate(&self, session_id: &str, supplied: &str) -> bool {
        match self.tokens.remove(session_id).await {
            Some(expected) => !supplied.is_empty() && tokens_match(&expected, supplied),
            None => false,
        }
    }

    /// Like [`CsrfGuard::validate`] but yields the generic rejection error.
    pub async fn verify(&self, session_id: &str, supplied: &str) -> Result<(), CrmError> {
        if self.validate(session_id, supplied).await {
            Ok(())
        } else {
            tracing::warn!("Rejected mutation with invalid CSRF token");
            Err(CrmError::InvalidRequest)
        }
    }
}

/// Length-then-content comparison that does not short-circuit on the first differing byte.
fn tokens_match(expected: &str, supplied: &str) -> bool {
    let (a, b) = (expected.as_bytes(), supplied.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> CsrfGuard {
        CsrfGuard::new(Duration::from_secs(60))
    }

    #[tokio::test]
    async fn issued_token_validates_once() {
        let guard = guard();
        let token = guard.issue("session-a").await;

        assert_eq!(token.len(), TOKEN_LEN);
        assert!(guard.validate("session-a", &token).await);
        assert!(!guard.validate("session-a", &token).await);
    }

    #[tokio::test]
    async fn token_is_bound_to_its_session() {
        let guard = guard();
        let token = guard.issue("session-a").await;
        guard.issue("session-b").await;

        assert!(!guard.validate("session-b", &token).await);
    }

    #[tokio::test]
    async fn mismatch_and_absence_are_rejected() {
        let guard = guard();
        assert!(!guard.validate("session-a", "anything").await);

        guard.issue("session-a").await;
        assert!(!guard.validate("session-a", "").await);

        let token = guard.issue("session-a").await;
        let forged: String = token.chars().rev().collect();
        assert!(matches!(
            guard.verify("session-a", &forged).await,
            Err(CrmError::InvalidRequest)
        ));
    }

    #[tokio::test]
    async fn reissue_replaces_previous_token() {
        let guard = guard();
        let first = guard.issue("session-a").await;
        let second = guard.issue("session-a").await;

        assert!(!guard.validate("session-a", &first).await);
        let third = guard.issue("session-a").await;
        assert!(guard.validate("session-a", &third).await);
        assert_ne!(first, second);
    }
}
