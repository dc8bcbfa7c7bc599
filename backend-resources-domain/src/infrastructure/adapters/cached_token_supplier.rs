use async_trait::async_trait;
use keycloak::{KeycloakError, KeycloakTokenSupplier};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::application::ports::auth::*;
use crate::domain::errors::AuthError;

/// Admin token supplier for [`keycloak::KeycloakAdmin`] that caches the
/// access token and re-acquires it shortly before it expires.
///
/// Clones share one token cache.
#[derive(Clone)]
pub struct CachedAdminTokenSupplier {
    token_manager: Arc<dyn TokenManager>,
    credentials: AdminCredentials,
    refresh_threshold_seconds: i64,
    cached: Arc<RwLock<Option<AuthToken>>>,
}

impl CachedAdminTokenSupplier {
    pub fn new(
        token_manager: Arc<dyn TokenManager>,
        credentials: AdminCredentials,
        refresh_threshold_seconds: u64,
    ) -> Self {
        Self {
            token_manager,
            credentials,
            refresh_threshold_seconds: i64::try_from(refresh_threshold_seconds).unwrap_or(i64::MAX),
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Current admin access token, acquiring a fresh one when needed
    pub async fn access_token(&self) -> Result<String, AuthError> {
        if let Some(token) = self.cached.read().await.as_ref() {
            if !token.is_expiring_soon(self.refresh_threshold_seconds) {
                return Ok(token.access_token.clone());
            }
        }

        let mut cached = self.cached.write().await;

        // Another request may have refreshed while we waited for the lock.
        if let Some(token) = cached.as_ref() {
            if !token.is_expiring_soon(self.refresh_threshold_seconds) {
                return Ok(token.access_token.clone());
            }
        }

        debug!(
            "Acquiring admin token for '{}' in realm '{}'",
            self.credentials.username, self.credentials.realm
        );
        let token = self.token_manager.acquire_token(&self.credentials).await?;
        let access_token = token.access_token.clone();
        *cached = Some(token);

        Ok(access_token)
    }
}

#[async_trait]
impl KeycloakTokenSupplier for CachedAdminTokenSupplier {
    async fn get(&self, _url: &str) -> Result<String, KeycloakError> {
        self.access_token().await.map_err(|e| {
            warn!("Admin token unavailable: {}", e);
            KeycloakError::HttpFailure {
                status: 401,
                body: None,
                text: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingTokenManager {
        calls: AtomicUsize,
        expires_in: i64,
    }

    #[async_trait]
    impl TokenManager for CountingTokenManager {
        async fn acquire_token(&self, _: &AdminCredentials) -> Result<AuthToken, AuthError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(AuthToken::new(format!("token-{n}"), self.expires_in, None))
        }

        async fn introspect_token(&self, _: &str) -> Result<TokenInfo, AuthError> {
            Ok(TokenInfo::default())
        }
    }

    fn supplier_with_threshold(
        expires_in: i64,
        refresh_threshold_seconds: u64,
    ) -> (Arc<CountingTokenManager>, CachedAdminTokenSupplier) {
        let manager = Arc::new(CountingTokenManager {
            calls: AtomicUsize::new(0),
            expires_in,
        });
        let credentials = AdminCredentials::new(
            "admin".to_string(),
            "admin".to_string(),
            "master".to_string(),
            "admin-cli".to_string(),
        );
        let supplier =
            CachedAdminTokenSupplier::new(manager.clone(), credentials, refresh_threshold_seconds);
        (manager, supplier)
    }

    fn supplier(expires_in: i64) -> (Arc<CountingTokenManager>, CachedAdminTokenSupplier) {
        supplier_with_threshold(expires_in, 30)
    }

    #[tokio::test]
    async fn fresh_token_is_reused() {
        let (manager, supplier) = supplier(300);

        assert_eq!(supplier.access_token().await.unwrap(), "token-1");
        assert_eq!(supplier.access_token().await.unwrap(), "token-1");
        assert_eq!(manager.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn token_inside_refresh_window_is_replaced() {
        let (manager, supplier) = supplier(10);

        assert_eq!(supplier.access_token().await.unwrap(), "token-1");
        assert_eq!(supplier.get("http://localhost:8080").await.unwrap(), "token-2");
        assert_eq!(manager.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn clones_share_the_cached_token() {
        let (manager, supplier) = supplier(300);
        let clone = supplier.clone();

        assert_eq!(supplier.access_token().await.unwrap(), "token-1");
        assert_eq!(clone.access_token().await.unwrap(), "token-1");
        assert_eq!(manager.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn oversized_threshold_refreshes_instead_of_panicking() {
        let (manager, supplier) = supplier_with_threshold(300, 99_999_999_999_999_999);

        assert_eq!(supplier.access_token().await.unwrap(), "token-1");
        assert_eq!(supplier.access_token().await.unwrap(), "token-2");
        assert_eq!(manager.calls.load(Ordering::SeqCst), 2);
    }
}
