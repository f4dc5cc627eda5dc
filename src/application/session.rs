// Session context - Explicit authenticated session for guarded routes
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub email: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no active session")]
    NotAuthenticated,
    #[error("session token does not match")]
    InvalidToken,
    #[error("session token must not be empty")]
    EmptyToken,
    #[error("another session is already active")]
    AlreadyActive,
}

/// Holds at most one session. Established after authentication, ended on logout.
#[derive(Debug, Default)]
pub struct SessionContext {
    current: RwLock<Option<Session>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refused while a session with a different token is active. Presenting
    /// the active token again refreshes the stored session.
    pub async fn establish(&self, session: Session) -> Result<(), SessionError> {
        if session.token.trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }

        let mut current = self.current.write().await;
        if let Some(active) = current.as_ref() {
            if active.token != session.token {
                tracing::warn!(
                    "Refusing session for {}: {} is signed in",
                    session.email,
                    active.email
                );
                return Err(SessionError::AlreadyActive);
            }
        }
        tracing::info!("Session established for {}", session.email);
        *current = Some(session);
        Ok(())
    }

    /// Returns the ended session, if there was one.
    pub async fn end(&self) -> Option<Session> {
        let ended = self.current.write().await.take();
        if let Some(session) = &ended {
            tracing::info!("Session ended for {}", session.email);
        }
        ended
    }

    pub async fn authorize(&self, token: &str) -> Result<Session, SessionError> {
        match self.current.read().await.as_ref() {
            None => Err(SessionError::NotAuthenticated),
            Some(session) if session.token == token => Ok(session.clone()),
            Some(_) => Err(SessionError::InvalidToken),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            token: "jwt-123".to_string(),
            email: "user@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let context = SessionContext::new();
        assert_eq!(
            context.authorize("jwt-123").await,
            Err(SessionError::NotAuthenticated)
        );

        context.establish(session()).await.unwrap();
        assert_eq!(context.authorize("jwt-123").await, Ok(session()));
        assert_eq!(
            context.authorize("other").await,
            Err(SessionError::InvalidToken)
        );

        assert_eq!(context.end().await, Some(session()));
        assert_eq!(context.end().await, None);
        assert_eq!(
            context.authorize("jwt-123").await,
            Err(SessionError::NotAuthenticated)
        );
    }

    #[tokio::test]
    async fn test_second_session_is_refused() {
        let context = SessionContext::new();
        context.establish(session()).await.unwrap();

        let intruder = Session {
            token: "jwt-456".to_string(),
            email: "other@example.com".to_string(),
        };
        assert_eq!(
            context.establish(intruder.clone()).await,
            Err(SessionError::AlreadyActive)
        );
        assert_eq!(context.authorize("jwt-123").await, Ok(session()));
        assert_eq!(
            context.authorize("jwt-456").await,
            Err(SessionError::InvalidToken)
        );

        // Same token again is accepted
        assert_eq!(context.establish(session()).await, Ok(()));

        context.end().await;
        assert_eq!(context.establish(intruder).await, Ok(()));
        assert!(context.authorize("jwt-456").await.is_ok());
    }

    #[tokio::test]
    async fn test_rejects_empty_token() {
        let context = SessionContext::new();
        let empty = Session {
            token: " ".to_string(),
            ..session()
        };
        assert_eq!(context.establish(empty).await, Err(SessionError::EmptyToken));
        assert_eq!(
            context.authorize(" ").await,
            Err(SessionError::NotAuthenticated)
        );
    }
}
