use std::collections::HashMap;

use async_trait::async_trait;
use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use super::config::AuthConfig;

/// Caller identity attached to an authenticated request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub user_id: String,
    pub admin: bool,
}

impl Principal {
    /// Identity used when no tokens are configured
    pub fn local_admin() -> Self {
        Self {
            user_id: "local".to_string(),
            admin: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,
}

#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Principal, AuthError>;

    /// When false every request is served as [`Principal::local_admin`]
    fn requires_token(&self) -> bool {
        true
    }
}

/// Verifies bearer tokens against the `[[auth.tokens]]` table
pub struct StaticTokenVerifier {
    tokens: HashMap<String, Principal>,
}

impl StaticTokenVerifier {
    pub fn from_config(config: &AuthConfig) -> Self {
        let tokens = config
            .tokens
            .iter()
            .filter(|t| !t.token.is_empty())
            .map(|t| {
                (
                    t.token.clone(),
                    Principal {
                        user_id: t.user_id.clone(),
                        admin: t.admin,
                    },
                )
            })
            .collect();
        Self { tokens }
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }
        self.tokens
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }

    fn requires_token(&self) -> bool {
        !self.tokens.is_empty()
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let value = header.ok_or(AuthError::MissingToken)?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .ok_or(AuthError::InvalidToken)?
        .trim();

    if token.is_empty() {
        Err(AuthError::MissingToken)
    } else {
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::TokenFileConfig;

    fn verifier() -> StaticTokenVerifier {
        StaticTokenVerifier::from_config(&AuthConfig {
            tokens: vec![
                TokenFileConfig {
                    token: "admin-token".into(),
                    user_id: "alice".into(),
                    admin: true,
                },
                TokenFileConfig {
                    token: "viewer-token".into(),
                    user_id: "bob".into(),
                    admin: false,
                },
            ],
        })
    }

    #[tokio::test]
    async fn test_verify_known_tokens() {
        let verifier = verifier();
        let admin = verifier.verify("admin-token").await.unwrap();
        assert!(admin.admin);
        assert_eq!(admin.user_id, "alice");

        let viewer = verifier.verify("viewer-token").await.unwrap();
        assert!(!viewer.admin);
    }

    #[tokio::test]
    async fn test_verify_rejects_unknown() {
        let verifier = verifier();
        assert_eq!(
            verifier.verify("nope").await,
            Err(AuthError::InvalidToken)
        );
        assert_eq!(verifier.verify("").await, Err(AuthError::MissingToken));
    }

    #[test]
    fn test_open_when_unconfigured() {
        let verifier = StaticTokenVerifier::from_config(&AuthConfig::default());
        assert!(!verifier.requires_token());
        assert!(self::verifier().requires_token());
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(Some("Bearer abc")), Ok("abc"));
        assert_eq!(bearer_token(Some("bearer abc ")), Ok("abc"));
        assert_eq!(bearer_token(None), Err(AuthError::MissingToken));
        assert_eq!(bearer_token(Some("Bearer ")), Err(AuthError::MissingToken));
        assert_eq!(bearer_token(Some("Basic abc")), Err(AuthError::InvalidToken));
    }
}
