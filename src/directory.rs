//! Account directory: maps an opaque bearer credential to an [`Actor`].

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::actor::Actor;

#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn resolve_actor(&self, credential: &str) -> Result<Actor, AppError>;
}

/// Token table kept in memory. Tokens are random and carry no claims.
#[derive(Default)]
pub struct TokenDirectory {
    tokens: DashMap<String, Actor>,
}

impl TokenDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh token for `actor`.
    pub fn enroll(&self, actor: Actor) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.tokens.insert(token.clone(), actor);
        token
    }

    /// Binds a token supplied from configuration, such as the operator token.
    pub fn enroll_with(&self, token: &str, actor: Actor) {
        self.tokens.insert(token.trim().to_string(), actor);
    }
}

#[async_trait]
impl AccountDirectory for TokenDirectory {
    async fn resolve_actor(&self, credential: &str) -> Result<Actor, AppError> {
        self.tokens
            .get(credential.trim())
            .map(|entry| *entry.value())
            .ok_or_else(|| AppError::Forbidden("invalid or expired credential".to_string()))
    }
}
