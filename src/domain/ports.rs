use crate::utils::error::Result;
use async_trait::async_trait;

/// Supplies the bearer token attached to each request.
///
/// Token acquisition lives outside this crate; implementations wrap whatever
/// credential source the caller already has.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn token(&self) -> Result<Option<String>>;
}

/// A token acquired ahead of time.
#[derive(Clone)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticToken").field("token", &"<redacted>").finish()
    }
}

#[async_trait]
impl Authorizer for StaticToken {
    async fn token(&self) -> Result<Option<String>> {
        Ok(Some(self.token.clone()))
    }
}

/// Sends requests without an `Authorization` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

#[async_trait]
impl Authorizer for Anonymous {
    async fn token(&self) -> Result<Option<String>> {
        Ok(None)
    }
}
